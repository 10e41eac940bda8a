use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::error::ValidationError;
use crate::models::{Device, SavingRecord};
use crate::timestamp::{localize, parse_naive};

/// The zone a request is evaluated in: the caller's choice, or the
/// device's own zone when none (or an empty value) is given.
pub fn resolve_timezone(
    requested: Option<&str>,
    device: &Device,
) -> Result<Tz, ValidationError> {
    match requested.map(str::trim).filter(|tz| !tz.is_empty()) {
        None => Ok(device.timezone),
        Some(name) => name
            .parse::<Tz>()
            .map_err(|_| ValidationError::InvalidTimezone(name.to_string())),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UpperBound {
    Through(DateTime<Utc>),
    Before(DateTime<Utc>),
}

impl UpperBound {
    fn admits(&self, instant: DateTime<Utc>) -> bool {
        match self {
            UpperBound::Through(end) => instant <= *end,
            UpperBound::Before(end) => instant < *end,
        }
    }
}

enum BoundInput {
    Day(NaiveDate),
    Local(NaiveDateTime),
    Absolute(DateTime<Utc>),
}

impl BoundInput {
    fn parse(value: &str) -> Option<Self> {
        if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
            return Some(BoundInput::Absolute(instant.with_timezone(&Utc)));
        }
        if let Ok(day) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            return Some(BoundInput::Day(day));
        }
        parse_naive(value).map(BoundInput::Local)
    }
}

/// Closed `[start, end]` window over `device_timestamp`.
///
/// Bounds are read in one zone and compared as instants, so the result
/// does not depend on how a record's wall-clock time looks in other zones.
/// A date-only end bound covers that whole local day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRangeFilter {
    start: Option<DateTime<Utc>>,
    end: Option<UpperBound>,
}

impl DateRangeFilter {
    pub fn parse(
        start_date: Option<&str>,
        end_date: Option<&str>,
        timezone: Tz,
    ) -> Result<Self, ValidationError> {
        let start = non_empty(start_date)
            .map(|value| {
                parse_start(value, timezone)
                    .ok_or(ValidationError::InvalidStartDate)
            })
            .transpose()?;
        let end = non_empty(end_date)
            .map(|value| {
                parse_end(value, timezone).ok_or(ValidationError::InvalidEndDate)
            })
            .transpose()?;

        if let (Some(start), Some(end)) = (start, end)
            && !end.admits(start)
        {
            return Err(ValidationError::StartAfterEnd);
        }

        Ok(Self { start, end })
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start.is_none_or(|start| instant >= start)
            && self.end.is_none_or(|end| end.admits(instant))
    }

    /// Keeps the records inside the window. An unbounded filter hands the
    /// input back untouched.
    pub fn apply(&self, records: Vec<SavingRecord>) -> Vec<SavingRecord> {
        if self.is_unbounded() {
            return records;
        }

        records
            .into_iter()
            .filter(|record| self.contains(record.device_timestamp))
            .collect()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_start(value: &str, tz: Tz) -> Option<DateTime<Utc>> {
    let start = match BoundInput::parse(value)? {
        BoundInput::Day(day) => localize(tz, day.and_hms_opt(0, 0, 0)?),
        BoundInput::Local(local) => localize(tz, local),
        BoundInput::Absolute(instant) => return Some(instant),
    };

    Some(start.with_timezone(&Utc))
}

fn parse_end(value: &str, tz: Tz) -> Option<UpperBound> {
    let end = match BoundInput::parse(value)? {
        BoundInput::Day(day) => {
            let next_day = localize(tz, day.succ_opt()?.and_hms_opt(0, 0, 0)?);
            UpperBound::Before(next_day.with_timezone(&Utc))
        }
        BoundInput::Local(local) => {
            UpperBound::Through(localize(tz, local).with_timezone(&Utc))
        }
        BoundInput::Absolute(instant) => UpperBound::Through(instant),
    };

    Some(end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::New_York;
    use chrono_tz::Asia::Tokyo;
    use pretty_assertions::assert_eq;

    fn record_at(instant: DateTime<Utc>) -> SavingRecord {
        SavingRecord {
            device_id: 1,
            ingestion_timestamp: instant,
            device_timestamp: instant,
            carbon_saved: 1.0,
            fuel_saved: 1.0,
        }
    }

    fn new_york_local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        New_York
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn device(timezone: Tz) -> Device {
        Device {
            id: 1,
            name: "Van".to_string(),
            timezone,
        }
    }

    #[test]
    fn test_same_day_window_respects_local_midnight() {
        let late_evening = new_york_local(2023, 12, 1, 23, 30);
        let after_midnight = new_york_local(2023, 12, 2, 0, 30);
        let records = vec![record_at(late_evening), record_at(after_midnight)];

        let filter =
            DateRangeFilter::parse(Some("2023-12-01"), Some("2023-12-01"), New_York)
                .unwrap();
        let filtered = filter.apply(records);

        assert_eq!(filtered, vec![record_at(late_evening)]);
    }

    #[test]
    fn test_unbounded_filter_returns_input() {
        let records = vec![record_at(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())];
        let filter = DateRangeFilter::parse(None, Some("  "), Tokyo).unwrap();

        assert!(filter.is_unbounded());
        assert_eq!(filter.apply(records.clone()), records);
    }

    #[test]
    fn test_start_after_end_is_rejected() {
        let err = DateRangeFilter::parse(Some("2023-12-02"), Some("2023-12-01"), New_York)
            .unwrap_err();
        assert_eq!(err, ValidationError::StartAfterEnd);

        let err = DateRangeFilter::parse(
            Some("2023-12-01T10:00:00"),
            Some("2023-12-01T09:59:59"),
            New_York,
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::StartAfterEnd);
    }

    #[test]
    fn test_equal_bounds_are_allowed() {
        let filter = DateRangeFilter::parse(
            Some("2023-12-01T10:00:00"),
            Some("2023-12-01T10:00:00"),
            New_York,
        )
        .unwrap();

        assert!(filter.contains(new_york_local(2023, 12, 1, 10, 0)));
        assert!(!filter.contains(new_york_local(2023, 12, 1, 10, 1)));
    }

    #[test]
    fn test_invalid_bounds() {
        assert_eq!(
            DateRangeFilter::parse(Some("not-a-date"), None, New_York).unwrap_err(),
            ValidationError::InvalidStartDate
        );
        assert_eq!(
            DateRangeFilter::parse(Some("2023-12-01"), Some("2023-13-45"), New_York)
                .unwrap_err(),
            ValidationError::InvalidEndDate
        );
    }

    #[test]
    fn test_explicit_offset_is_absolute() {
        let filter = DateRangeFilter::parse(
            Some("2023-12-01T00:00:00Z"),
            Some("2023-12-01T23:59:59Z"),
            Tokyo,
        )
        .unwrap();

        assert!(filter.contains(Utc.with_ymd_and_hms(2023, 12, 1, 0, 0, 0).unwrap()));
        assert!(!filter.contains(Utc.with_ymd_and_hms(2023, 12, 2, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_output_is_subset_within_window() {
        let records: Vec<SavingRecord> = (0..72)
            .map(|h| {
                record_at(
                    Utc.with_ymd_and_hms(2023, 11, 30, 0, 0, 0).unwrap()
                        + chrono::TimeDelta::hours(h),
                )
            })
            .collect();
        let filter =
            DateRangeFilter::parse(Some("2023-12-01"), Some("2023-12-01"), Tokyo).unwrap();
        let filtered = filter.apply(records.clone());

        assert_eq!(filtered.len(), 24);
        for record in &filtered {
            assert!(records.contains(record));
            let local = record.device_timestamp.with_timezone(&Tokyo);
            assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2023, 12, 1).unwrap());
        }
    }

    #[test]
    fn test_resolve_timezone() {
        let device = device(New_York);

        assert_eq!(resolve_timezone(None, &device).unwrap(), New_York);
        assert_eq!(resolve_timezone(Some(""), &device).unwrap(), New_York);
        assert_eq!(resolve_timezone(Some("Asia/Tokyo"), &device).unwrap(), Tokyo);
        assert_eq!(
            resolve_timezone(Some("Nowhere/City"), &device).unwrap_err(),
            ValidationError::InvalidTimezone("Nowhere/City".to_string())
        );
        assert_eq!(
            ValidationError::InvalidTimezone("Nowhere/City".to_string())
                .to_string(),
            "invalid timezone: Nowhere/City"
        );
    }
}
