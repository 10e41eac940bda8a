use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;
use utoipa::ToSchema;

use crate::AppState;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    Ok,
    Loading,
    ShuttingDown,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub devices_loaded: usize,
    pub savings_records: usize,
}

/// Service liveness with the size of the loaded data set
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Data loaded and serving", body = HealthResponse),
        (status = 503, description = "Loading or shutting down", body = HealthResponse),
    ),
    tag = "health",
)]
pub async fn handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let status = if state.shutdown.is_shutting_down() {
        HealthStatus::ShuttingDown
    } else if !state.store.is_loaded() {
        HealthStatus::Loading
    } else {
        HealthStatus::Ok
    };

    let status_code = match status {
        HealthStatus::Ok => StatusCode::OK,
        _ => StatusCode::SERVICE_UNAVAILABLE,
    };

    (
        status_code,
        Json(HealthResponse {
            status,
            devices_loaded: state.store.device_count(),
            savings_records: state.store.savings_count(),
        }),
    )
}
