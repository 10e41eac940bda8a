use std::collections::BTreeMap;

use chrono::Datelike;
use chrono_tz::Tz;
use serde::Serialize;

use crate::aggregate::Totals;
use crate::models::SavingRecord;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MonthlyAverage {
    pub carbon_saved: f64,
    pub fuel_saved: f64,
    pub months_count: usize,
}

/// Mean of the per-calendar-month sums, rounded to 2 decimals.
///
/// Months are taken in `timezone`. Only months that have records count.
pub fn monthly_average(records: &[SavingRecord], timezone: Tz) -> MonthlyAverage {
    let mut months: BTreeMap<(i32, u32), Totals> = BTreeMap::new();
    for record in records {
        let local = record.device_timestamp.with_timezone(&timezone);
        months
            .entry((local.year(), local.month()))
            .or_default()
            .add(record);
    }

    if months.is_empty() {
        return MonthlyAverage::default();
    }

    let months_count = months.len();
    let (carbon, fuel) = months.values().fold((0.0, 0.0), |(c, f), totals| {
        (c + totals.carbon_saved, f + totals.fuel_saved)
    });

    MonthlyAverage {
        carbon_saved: round2(carbon / months_count as f64),
        fuel_saved: round2(fuel / months_count as f64),
        months_count,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
