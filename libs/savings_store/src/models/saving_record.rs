use chrono::{DateTime, Utc};
use csv_client::models::SavingRow;
use serde::Serialize;

use super::DeviceId;
use crate::error::RowError;
use crate::timestamp::parse_instant;

/// One savings measurement. `device_id` is not checked against the device
/// list; records of unknown devices are simply never returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingRecord {
    pub device_id: DeviceId,
    #[serde(rename = "timestamp")]
    pub ingestion_timestamp: DateTime<Utc>,
    pub device_timestamp: DateTime<Utc>,
    pub carbon_saved: f64,
    pub fuel_saved: f64,
}

impl TryFrom<SavingRow> for SavingRecord {
    type Error = RowError;

    fn try_from(row: SavingRow) -> Result<Self, Self::Error> {
        let ingestion_timestamp = parse_instant(&row.timestamp).ok_or_else(|| {
            RowError::InvalidTimestamp {
                field: "timestamp",
                value: row.timestamp.clone(),
            }
        })?;
        let device_timestamp =
            parse_instant(&row.device_timestamp).ok_or_else(|| {
                RowError::InvalidTimestamp {
                    field: "device_timestamp",
                    value: row.device_timestamp.clone(),
                }
            })?;

        Ok(SavingRecord {
            device_id: row.device_id,
            ingestion_timestamp,
            device_timestamp,
            carbon_saved: finite("carbon_saved", row.carbon_saved)?,
            fuel_saved: finite("fuel_saved", row.fuel_saved)?,
        })
    }
}

// NaN and infinities deserialize as f64 but would poison every sum.
fn finite(field: &'static str, value: f64) -> Result<f64, RowError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RowError::InvalidNumber {
            field,
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(device_timestamp: &str) -> SavingRow {
        SavingRow {
            device_id: 1,
            timestamp: "2023-12-01T05:00:00Z".to_string(),
            device_timestamp: device_timestamp.to_string(),
            carbon_saved: 12.5,
            fuel_saved: 3.0,
        }
    }

    #[test]
    fn test_record_from_row() {
        let record =
            SavingRecord::try_from(row("2023-12-01T00:00:00-05:00")).unwrap();

        assert_eq!(
            record.device_timestamp,
            Utc.with_ymd_and_hms(2023, 12, 1, 5, 0, 0).unwrap()
        );
        assert_eq!(record.carbon_saved, 12.5);
    }

    #[test]
    fn test_record_with_non_finite_amount() {
        let mut nan = row("2023-12-01T05:00:00Z");
        nan.carbon_saved = f64::NAN;
        let mut inf = row("2023-12-01T05:00:00Z");
        inf.fuel_saved = f64::INFINITY;

        assert_eq!(
            SavingRecord::try_from(nan).unwrap_err(),
            RowError::InvalidNumber {
                field: "carbon_saved",
                value: "NaN".to_string(),
            }
        );
        assert_eq!(
            SavingRecord::try_from(inf).unwrap_err(),
            RowError::InvalidNumber {
                field: "fuel_saved",
                value: "inf".to_string(),
            }
        );
    }

    #[test]
    fn test_record_with_bad_timestamp() {
        let err = SavingRecord::try_from(row("yesterday")).unwrap_err();

        assert_eq!(
            err,
            RowError::InvalidTimestamp {
                field: "device_timestamp",
                value: "yesterday".to_string(),
            }
        );
    }
}
