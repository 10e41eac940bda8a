use chrono_tz::Tz;
use csv_client::models::DeviceRow;
use serde::Serialize;

use crate::error::RowError;

pub type DeviceId = i64;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    /// Zone used to read this device's timestamps when the caller gives none.
    pub timezone: Tz,
}

impl TryFrom<DeviceRow> for Device {
    type Error = RowError;

    fn try_from(row: DeviceRow) -> Result<Self, Self::Error> {
        let timezone = row
            .timezone
            .parse::<Tz>()
            .map_err(|_| RowError::UnknownTimezone(row.timezone.clone()))?;

        Ok(Device {
            id: row.id,
            name: row.name,
            timezone,
        })
    }
}
