use serde::Deserialize;

/// Columns every devices file must carry.
pub const DEVICE_HEADERS: &[&str] = &["id", "name", "timezone"];

/// Columns every savings file must carry.
pub const SAVING_HEADERS: &[&str] = &[
    "device_id",
    "timestamp",
    "device_timestamp",
    "carbon_saved",
    "fuel_saved",
];

/// Known misspellings found in exported savings files.
pub const SAVING_HEADER_ALIASES: &[(&str, &str)] =
    &[("fueld_saved", "fuel_saved")];

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeviceRow {
    pub id: i64,
    pub name: String,
    pub timezone: String,
}

/// Raw savings row. Timestamps are kept as text and parsed by the caller.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SavingRow {
    pub device_id: i64,
    pub timestamp: String,
    pub device_timestamp: String,
    pub carbon_saved: f64,
    pub fuel_saved: f64,
}
