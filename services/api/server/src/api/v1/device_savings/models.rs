use chrono::{DateTime, FixedOffset};
use savings_store::AggregatedBucket;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::v1::models::{DeviceResponse, SavingRecordResponse};

/// Date window and zone for a savings query
#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SavingsQuery {
    /// `YYYY-MM-DD`, a local datetime, or RFC 3339
    #[validate(length(max = 40, message = "start_date is too long"))]
    #[param(example = "2023-12-01")]
    pub start_date: Option<String>,
    /// Inclusive. A bare date covers the whole day.
    #[validate(length(max = 40, message = "end_date is too long"))]
    #[param(example = "2023-12-01")]
    pub end_date: Option<String>,
    /// IANA zone; defaults to the device's own zone
    #[validate(length(max = 64, message = "timezone is too long"))]
    #[param(example = "America/New_York")]
    pub timezone: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AggregatedSavingsQuery {
    #[validate(length(max = 40, message = "start_date is too long"))]
    pub start_date: Option<String>,
    #[validate(length(max = 40, message = "end_date is too long"))]
    pub end_date: Option<String>,
    /// `hour` (default), `day`, `month`; anything else groups by exact time
    #[validate(length(max = 16, message = "interval is too long"))]
    #[param(example = "day")]
    pub interval: Option<String>,
    #[validate(length(max = 64, message = "timezone is too long"))]
    pub timezone: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SavingsResponse {
    pub device: DeviceResponse,
    /// Sorted by `device_timestamp`, oldest first
    pub data: Vec<SavingRecordResponse>,
    pub total_records: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AggregatedBucketResponse {
    /// Bucket label in the resolved zone
    #[schema(example = "2023-12-01 14:00:00")]
    pub timestamp: String,
    #[schema(value_type = String, example = "2023-12-01T14:00:00-05:00")]
    pub period_start: DateTime<FixedOffset>,
    pub carbon_saved: f64,
    pub fuel_saved: f64,
    pub count: usize,
}

impl From<AggregatedBucket> for AggregatedBucketResponse {
    fn from(bucket: AggregatedBucket) -> Self {
        Self {
            timestamp: bucket.bucket_key,
            period_start: bucket.period_start,
            carbon_saved: bucket.carbon_saved,
            fuel_saved: bucket.fuel_saved,
            count: bucket.count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AggregatedSavingsResponse {
    pub device: DeviceResponse,
    #[schema(example = "hour")]
    pub interval: String,
    pub data: Vec<AggregatedBucketResponse>,
    /// Number of buckets
    pub total_records: usize,
}
