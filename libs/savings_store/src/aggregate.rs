use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, Timelike};
use chrono_tz::Tz;
use serde::Serialize;

use crate::models::SavingRecord;
use crate::timestamp::localize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    #[default]
    Hour,
    Day,
    Month,
    Raw,
}

impl Interval {
    /// Reads the `interval` query value. Missing means hourly; anything
    /// unrecognised falls back to exact-timestamp buckets.
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Interval::Hour,
            Some("hour") => Interval::Hour,
            Some("day") => Interval::Day,
            Some("month") => Interval::Month,
            Some(_) => Interval::Raw,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Hour => "hour",
            Interval::Day => "day",
            Interval::Month => "month",
            Interval::Raw => "raw",
        }
    }

    fn truncate(&self, local: NaiveDateTime) -> NaiveDateTime {
        let truncated = match self {
            Interval::Hour => local.date().and_hms_opt(local.hour(), 0, 0),
            Interval::Day => local.date().and_hms_opt(0, 0, 0),
            Interval::Month => local
                .date()
                .with_day(1)
                .and_then(|first| first.and_hms_opt(0, 0, 0)),
            Interval::Raw => local.with_nanosecond(0),
        };

        truncated.unwrap_or(local)
    }

    fn label(&self, bucket: NaiveDateTime) -> String {
        let format = match self {
            Interval::Hour => "%Y-%m-%d %H:00:00",
            Interval::Day => "%Y-%m-%d",
            Interval::Month => "%b,%Y",
            Interval::Raw => "%Y-%m-%d %H:%M:%S",
        };

        bucket.format(format).to_string()
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Totals {
    pub carbon_saved: f64,
    pub fuel_saved: f64,
    pub count: usize,
}

impl Totals {
    pub fn add(&mut self, record: &SavingRecord) {
        self.carbon_saved += record.carbon_saved;
        self.fuel_saved += record.fuel_saved;
        self.count += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedBucket {
    /// Display key, e.g. `2023-12-01 14:00:00` or `Dec,2023`.
    #[serde(rename = "timestamp")]
    pub bucket_key: String,
    pub period_start: DateTime<FixedOffset>,
    pub carbon_saved: f64,
    pub fuel_saved: f64,
    pub count: usize,
}

/// Sums records per interval, truncating wall-clock time in `timezone`.
///
/// Buckets are keyed and ordered by their local start time, never by the
/// display key.
pub fn aggregate_by_interval(
    records: &[SavingRecord],
    interval: Interval,
    timezone: Tz,
) -> Vec<AggregatedBucket> {
    let mut buckets: BTreeMap<NaiveDateTime, Totals> = BTreeMap::new();
    for record in records {
        let local = record.device_timestamp.with_timezone(&timezone).naive_local();
        buckets
            .entry(interval.truncate(local))
            .or_default()
            .add(record);
    }

    buckets
        .into_iter()
        .map(|(start, totals)| AggregatedBucket {
            bucket_key: interval.label(start),
            period_start: localize(timezone, start).fixed_offset(),
            carbon_saved: totals.carbon_saved,
            fuel_saved: totals.fuel_saved,
            count: totals.count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use chrono_tz::America::New_York;
    use chrono_tz::UTC;
    use pretty_assertions::assert_eq;

    fn record(instant: DateTime<Utc>, carbon: f64, fuel: f64) -> SavingRecord {
        SavingRecord {
            device_id: 1,
            ingestion_timestamp: instant,
            device_timestamp: instant,
            carbon_saved: carbon,
            fuel_saved: fuel,
        }
    }

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn keys(buckets: &[AggregatedBucket]) -> Vec<&str> {
        buckets.iter().map(|b| b.bucket_key.as_str()).collect()
    }

    #[test]
    fn test_interval_from_param() {
        assert_eq!(Interval::from_param(None), Interval::Hour);
        assert_eq!(Interval::from_param(Some("day")), Interval::Day);
        assert_eq!(Interval::from_param(Some("month")), Interval::Month);
        assert_eq!(Interval::from_param(Some("raw")), Interval::Raw);
        assert_eq!(Interval::from_param(Some("fortnight")), Interval::Raw);
    }

    #[test]
    fn test_hourly_buckets_sum_and_count() {
        let records = vec![
            record(utc(2023, 12, 1, 10, 5, 0), 1.0, 0.5),
            record(utc(2023, 12, 1, 10, 55, 0), 2.0, 0.5),
            record(utc(2023, 12, 1, 11, 0, 0), 4.0, 1.0),
        ];
        let buckets = aggregate_by_interval(&records, Interval::Hour, UTC);

        assert_eq!(keys(&buckets), vec!["2023-12-01 10:00:00", "2023-12-01 11:00:00"]);
        assert_eq!(buckets[0].carbon_saved, 3.0);
        assert_eq!(buckets[0].fuel_saved, 1.0);
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets[1].count, 1);
    }

    #[test]
    fn test_month_buckets_sort_across_year_boundary() {
        let records = vec![
            record(utc(2024, 1, 15, 12, 0, 0), 5.0, 1.0),
            record(utc(2023, 11, 3, 12, 0, 0), 1.0, 1.0),
            record(utc(2024, 2, 1, 12, 0, 0), 2.0, 1.0),
            record(utc(2023, 12, 24, 12, 0, 0), 3.0, 1.0),
        ];
        let buckets = aggregate_by_interval(&records, Interval::Month, UTC);

        assert_eq!(keys(&buckets), vec!["Nov,2023", "Dec,2023", "Jan,2024", "Feb,2024"]);
        assert!(buckets.windows(2).all(|w| w[0].period_start < w[1].period_start));
    }

    #[test]
    fn test_day_buckets_use_requested_zone() {
        // 03:00 UTC on Dec 2 is still Dec 1 in New York.
        let records = vec![
            record(utc(2023, 12, 2, 3, 0, 0), 1.0, 1.0),
            record(utc(2023, 12, 2, 6, 0, 0), 1.0, 1.0),
        ];

        let local = aggregate_by_interval(&records, Interval::Day, New_York);
        assert_eq!(keys(&local), vec!["2023-12-01", "2023-12-02"]);
        assert_eq!(local[0].period_start.to_rfc3339(), "2023-12-01T00:00:00-05:00");

        let utc_days = aggregate_by_interval(&records, Interval::Day, UTC);
        assert_eq!(keys(&utc_days), vec!["2023-12-02"]);
        assert_eq!(utc_days[0].count, 2);
    }

    #[test]
    fn test_raw_buckets_group_identical_seconds() {
        let records = vec![
            record(utc(2023, 12, 1, 10, 0, 1), 1.0, 1.0),
            record(utc(2023, 12, 1, 10, 0, 1), 1.0, 1.0),
            record(utc(2023, 12, 1, 9, 0, 0), 1.0, 1.0),
        ];
        let buckets = aggregate_by_interval(&records, Interval::Raw, UTC);

        assert_eq!(keys(&buckets), vec!["2023-12-01 09:00:00", "2023-12-01 10:00:01"]);
        assert_eq!(buckets[1].count, 2);
    }

    #[test]
    fn test_bucket_totals_match_input() {
        let records: Vec<SavingRecord> = (0..500)
            .map(|i| {
                record(
                    utc(2023, 1, 1, 0, 0, 0) + chrono::TimeDelta::minutes(i * 97),
                    i as f64 * 0.25,
                    1.0,
                )
            })
            .collect();
        let carbon_total: f64 = records.iter().map(|r| r.carbon_saved).sum();

        for interval in [Interval::Hour, Interval::Day, Interval::Month, Interval::Raw] {
            let buckets = aggregate_by_interval(&records, interval, New_York);
            let counted: usize = buckets.iter().map(|b| b.count).sum();
            let carbon: f64 = buckets.iter().map(|b| b.carbon_saved).sum();

            assert_eq!(counted, records.len());
            assert!((carbon - carbon_total).abs() < 1e-6);
            assert!(buckets.windows(2).all(|w| w[0].period_start <= w[1].period_start));
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_by_interval(&[], Interval::Hour, UTC).is_empty());
    }
}
