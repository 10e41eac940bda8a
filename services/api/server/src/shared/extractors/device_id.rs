use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use savings_store::models::DeviceId;

use crate::AppState;
use crate::api::api_error::ApiError;
use crate::api::error_recorder::ErrorRecorder;
use crate::api::v1::errors::Error;
use crate::shared::extractors::request_id::request_id_from_headers;

const HANDLER_NAME: &str = "device_path";

/// Numeric device id from the `{id}` path segment.
#[derive(Debug, Clone, Copy)]
pub struct DevicePath(pub DeviceId);

impl FromRequestParts<AppState> for DevicePath {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = Path::<String>::from_request_parts(parts, state)
            .await
            .map(|Path(raw)| raw)
            .unwrap_or_default();

        raw.trim().parse::<DeviceId>().map(DevicePath).map_err(|_| {
            let request_id = request_id_from_headers(&parts.headers);
            ErrorRecorder::new(&state.telemetry, HANDLER_NAME, &request_id)
                .record(Error::InvalidDeviceId(raw.clone()))
        })
    }
}
