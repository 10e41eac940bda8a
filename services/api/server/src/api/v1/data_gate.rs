use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::AppState;
use crate::api::error_recorder::ErrorRecorder;
use crate::shared::extractors::request_id::request_id_from_headers;

use super::errors::Error;

const HANDLER_NAME: &str = "data_gate";

/// Holds each request until the CSV data is in memory. Concurrent first
/// requests share one load.
pub async fn require_data(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if state.store.is_loaded() {
        return next.run(request).await;
    }

    match crate::data_loader::load_device_data(&state).await {
        Ok(_) => next.run(request).await,
        Err(e) => {
            let request_id = request_id_from_headers(request.headers());
            tracing::error!("Data load failed: {e:#}");
            ErrorRecorder::new(&state.telemetry, HANDLER_NAME, &request_id)
                .record(Error::DataUnavailable(format!("{e:#}")))
                .into_response()
        }
    }
}
