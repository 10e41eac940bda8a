use chrono::{DateTime, NaiveDateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

// DST gaps are at most two hours wide.
const GAP_STEP_MINUTES: i64 = 15;
const GAP_MAX_STEPS: usize = 8;

/// Parses a stored timestamp. Text without an offset is read as UTC.
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&Utc));
    }

    parse_naive(value).map(|naive| naive.and_utc())
}

/// Parses a wall-clock date-time without offset.
pub fn parse_naive(value: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Places a wall-clock time in `tz`.
///
/// Ambiguous times resolve to the earliest instant. Times inside a DST gap
/// move forward to the first wall-clock time that exists.
pub fn localize(tz: Tz, local: NaiveDateTime) -> DateTime<Tz> {
    let mut candidate = local;
    for _ in 0..=GAP_MAX_STEPS {
        if let Some(instant) = tz.from_local_datetime(&candidate).earliest() {
            return instant;
        }
        candidate += TimeDelta::minutes(GAP_STEP_MINUTES);
    }

    tz.from_utc_datetime(&local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};
    use chrono_tz::America::New_York;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_instant_formats() {
        let expected = Utc.with_ymd_and_hms(2023, 12, 1, 4, 30, 0).unwrap();

        assert_eq!(parse_instant("2023-12-01T04:30:00Z"), Some(expected));
        assert_eq!(parse_instant("2023-12-01T04:30:00.000Z"), Some(expected));
        assert_eq!(parse_instant("2023-11-30T23:30:00-05:00"), Some(expected));
        assert_eq!(parse_instant("2023-12-01 04:30:00"), Some(expected));
        assert_eq!(parse_instant(" 2023-12-01T04:30 "), Some(expected));
        assert_eq!(parse_instant("01/12/2023"), None);
    }

    #[test]
    fn test_localize_spring_forward_gap() {
        // 02:30 does not exist in New York on 2024-03-10.
        let local = NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        let instant = localize(New_York, local);

        assert_eq!(instant.hour(), 3);
        assert_eq!(instant.with_timezone(&Utc).hour(), 7);
    }

    #[test]
    fn test_localize_fall_back_picks_earliest() {
        let local = NaiveDate::from_ymd_opt(2024, 11, 3)
            .unwrap()
            .and_hms_opt(1, 30, 0)
            .unwrap();
        let instant = localize(New_York, local);

        // EDT (UTC-4) comes first.
        assert_eq!(instant.with_timezone(&Utc).hour(), 5);
    }
}
