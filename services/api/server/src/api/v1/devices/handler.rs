use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::api::error_recorder::ErrorRecorder;
use crate::api::v1::errors::{Error, HandlerResult};
use crate::api::v1::models::DeviceResponse;
use crate::shared::extractors::device_id::DevicePath;
use crate::shared::extractors::request_id::RequestId;

/// List all devices
#[utoipa::path(
    get,
    path = "/devices",
    responses(
        (status = 200, description = "All loaded devices", body = Vec<DeviceResponse>),
        (status = 503, description = "Device data unavailable"),
    ),
    tag = "devices",
)]
#[tracing::instrument(skip_all, name = "device_list")]
pub async fn list(State(state): State<AppState>) -> Json<Vec<DeviceResponse>> {
    let devices: Vec<DeviceResponse> = state
        .store
        .get_devices()
        .into_iter()
        .map(DeviceResponse::from)
        .collect();
    tracing::debug!(count = devices.len(), "Listing devices");

    Json(devices)
}

/// Get one device
#[utoipa::path(
    get,
    path = "/devices/{id}",
    params(("id" = i64, Path, description = "Device id")),
    responses(
        (status = 200, description = "The device", body = DeviceResponse),
        (status = 400, description = "Non-numeric device id"),
        (status = 404, description = "Device not found"),
    ),
    tag = "devices",
)]
#[tracing::instrument(skip_all, name = "device_detail")]
pub async fn detail(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    DevicePath(id): DevicePath,
) -> HandlerResult<Json<DeviceResponse>> {
    tracing::debug!(device_id = id, %request_id, "Fetching device");
    let recorder =
        ErrorRecorder::new(&state.telemetry, "device_detail", &request_id);

    let device = state
        .store
        .get_device_by_id(id)
        .ok_or_else(|| recorder.record(Error::DeviceNotFound(id)))?;

    Ok(Json(device.into()))
}
