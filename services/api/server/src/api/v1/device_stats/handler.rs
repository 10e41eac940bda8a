use axum::Json;
use axum::extract::State;
use savings_store::monthly_average;

use crate::AppState;
use crate::api::error_recorder::ErrorRecorder;
use crate::api::v1::errors::{Error, HandlerResult};
use crate::shared::extractors::device_id::DevicePath;
use crate::shared::extractors::request_id::RequestId;

use super::models::MonthlyAverageResponse;

/// Monthly average savings of one device
///
/// Months are calendar months in the device's own zone. A device without
/// records gets zeros.
#[utoipa::path(
    get,
    path = "/device-stats/{id}/monthly",
    params(("id" = i64, Path, description = "Device id")),
    responses(
        (status = 200, description = "Monthly averages", body = MonthlyAverageResponse),
        (status = 400, description = "Non-numeric device id"),
        (status = 404, description = "Device not found"),
    ),
    tag = "stats",
)]
#[tracing::instrument(skip_all, name = "device_monthly_stats")]
pub async fn monthly(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    DevicePath(id): DevicePath,
) -> HandlerResult<Json<MonthlyAverageResponse>> {
    tracing::info!(device_id = id, %request_id, "Computing monthly stats");
    let recorder = ErrorRecorder::new(
        &state.telemetry,
        "device_monthly_stats",
        &request_id,
    );

    let device = state
        .store
        .get_device_by_id(id)
        .ok_or_else(|| recorder.record(Error::DeviceNotFound(id)))?;

    let records = state.store.get_savings_by_device_id(id);
    let average = monthly_average(&records, device.timezone);
    tracing::debug!(
        device_id = id,
        months = average.months_count,
        "Monthly stats computed"
    );

    Ok(Json(average.into()))
}
