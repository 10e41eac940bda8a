use axum::Router;
use axum::routing::get;

pub(crate) mod data_gate;
pub(crate) mod device_savings;
pub(crate) mod device_stats;
pub(crate) mod devices;
pub(crate) mod errors;
pub(crate) mod models;

/// Routes served under `/api`. Every matched route waits for the data load.
pub fn get_routes(state: crate::AppState) -> Router {
    Router::new()
        .route("/devices", get(devices::handler::list))
        .route("/devices/{id}", get(devices::handler::detail))
        .route("/device-savings/{id}", get(device_savings::handler::list))
        .route(
            "/device-savings/{id}/aggregated",
            get(device_savings::handler::aggregated),
        )
        .route(
            "/device-stats/{id}/monthly",
            get(device_stats::handler::monthly),
        )
        .route("/health", get(crate::health::handler))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            data_gate::require_data,
        ))
        .with_state(state)
}
