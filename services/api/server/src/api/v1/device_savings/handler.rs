use axum::Json;
use axum::extract::State;
use savings_store::{DateRangeFilter, Interval, aggregate_by_interval, resolve_timezone};

use crate::AppState;
use crate::api::error_recorder::ErrorRecorder;
use crate::api::v1::errors::{Error, HandlerResult};
use crate::shared::extractors::device_id::DevicePath;
use crate::shared::extractors::query::ValidatedQuery;
use crate::shared::extractors::request_id::RequestId;

use super::models::{
    AggregatedSavingsQuery, AggregatedSavingsResponse, SavingsQuery,
    SavingsResponse,
};

/// Savings records of one device
///
/// Records are filtered to the inclusive date window, evaluated in the
/// requested zone or the device's own, and sorted by device time.
#[utoipa::path(
    get,
    path = "/device-savings/{id}",
    params(("id" = i64, Path, description = "Device id"), SavingsQuery),
    responses(
        (status = 200, description = "Filtered records", body = SavingsResponse),
        (status = 400, description = "Invalid id, date or timezone"),
        (status = 404, description = "Device not found"),
    ),
    tag = "savings",
)]
#[tracing::instrument(skip_all, name = "device_savings")]
pub async fn list(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    DevicePath(id): DevicePath,
    ValidatedQuery(query): ValidatedQuery<SavingsQuery>,
) -> HandlerResult<Json<SavingsResponse>> {
    tracing::info!(
        device_id = id,
        start_date = ?query.start_date,
        end_date = ?query.end_date,
        timezone = ?query.timezone,
        %request_id,
        "Fetching device savings"
    );
    let recorder =
        ErrorRecorder::new(&state.telemetry, "device_savings", &request_id);

    let device = state
        .store
        .get_device_by_id(id)
        .ok_or_else(|| recorder.record(Error::DeviceNotFound(id)))?;

    let timezone = resolve_timezone(query.timezone.as_deref(), &device)
        .map_err(|e| recorder.record(Error::from(e)))?;
    let filter = DateRangeFilter::parse(
        query.start_date.as_deref(),
        query.end_date.as_deref(),
        timezone,
    )
    .map_err(|e| recorder.record(Error::from(e)))?;

    let mut records = filter.apply(state.store.get_savings_by_device_id(id));
    records.sort_by_key(|record| record.device_timestamp);

    let total_records = records.len();
    tracing::debug!(device_id = id, total_records, "Savings filtered");

    Ok(Json(SavingsResponse {
        device: device.into(),
        data: records.into_iter().map(Into::into).collect(),
        total_records,
    }))
}

/// Savings of one device summed per interval
///
/// Buckets are truncated in the requested zone or the device's own and
/// ordered by time, oldest first.
#[utoipa::path(
    get,
    path = "/device-savings/{id}/aggregated",
    params(
        ("id" = i64, Path, description = "Device id"),
        AggregatedSavingsQuery
    ),
    responses(
        (status = 200, description = "Buckets", body = AggregatedSavingsResponse),
        (status = 400, description = "Invalid id, date or timezone"),
        (status = 404, description = "Device not found"),
    ),
    tag = "savings",
)]
#[tracing::instrument(skip_all, name = "device_savings_aggregated")]
pub async fn aggregated(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    DevicePath(id): DevicePath,
    ValidatedQuery(query): ValidatedQuery<AggregatedSavingsQuery>,
) -> HandlerResult<Json<AggregatedSavingsResponse>> {
    let interval = Interval::from_param(query.interval.as_deref());
    tracing::info!(
        device_id = id,
        start_date = ?query.start_date,
        end_date = ?query.end_date,
        timezone = ?query.timezone,
        %interval,
        %request_id,
        "Aggregating device savings"
    );
    let recorder = ErrorRecorder::new(
        &state.telemetry,
        "device_savings_aggregated",
        &request_id,
    );

    let device = state
        .store
        .get_device_by_id(id)
        .ok_or_else(|| recorder.record(Error::DeviceNotFound(id)))?;

    let timezone = resolve_timezone(query.timezone.as_deref(), &device)
        .map_err(|e| recorder.record(Error::from(e)))?;
    let filter = DateRangeFilter::parse(
        query.start_date.as_deref(),
        query.end_date.as_deref(),
        timezone,
    )
    .map_err(|e| recorder.record(Error::from(e)))?;

    let records = filter.apply(state.store.get_savings_by_device_id(id));
    let buckets = aggregate_by_interval(&records, interval, timezone);

    let total_records = buckets.len();
    tracing::debug!(
        device_id = id,
        records = records.len(),
        buckets = total_records,
        "Savings aggregated"
    );

    Ok(Json(AggregatedSavingsResponse {
        device: device.into(),
        interval: interval.to_string(),
        data: buckets.into_iter().map(Into::into).collect(),
        total_records,
    }))
}
