use chrono::{DateTime, Utc};
use savings_store::{Device, DeviceId, SavingRecord};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct DeviceResponse {
    #[schema(example = 1)]
    pub id: DeviceId,
    #[schema(example = "Truck 12")]
    pub name: String,
    /// IANA zone name
    #[schema(example = "America/New_York")]
    pub timezone: String,
}

impl From<Device> for DeviceResponse {
    fn from(device: Device) -> Self {
        Self {
            id: device.id,
            name: device.name,
            timezone: device.timezone.name().to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SavingRecordResponse {
    pub device_id: DeviceId,
    /// Ingestion time
    #[schema(example = "2023-12-01T05:00:00Z")]
    pub timestamp: DateTime<Utc>,
    #[schema(example = "2023-12-01T04:59:12Z")]
    pub device_timestamp: DateTime<Utc>,
    pub carbon_saved: f64,
    pub fuel_saved: f64,
}

impl From<SavingRecord> for SavingRecordResponse {
    fn from(record: SavingRecord) -> Self {
        Self {
            device_id: record.device_id,
            timestamp: record.ingestion_timestamp,
            device_timestamp: record.device_timestamp,
            carbon_saved: record.carbon_saved,
            fuel_saved: record.fuel_saved,
        }
    }
}
