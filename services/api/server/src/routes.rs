use axum::Router;
use axum::http::Uri;
use axum::routing::get;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::api::api_error::{ApiError, ApiErrorDetail};
use crate::shared::extractors::request_id::RequestId;

const VERSION: Option<&'static str> = option_env!("VERSION");

async fn fallback_handler(
    RequestId(request_id): RequestId,
    uri: Uri,
) -> ApiError {
    ApiError::not_found(
        "Not Found".to_string(),
        vec![ApiErrorDetail {
            field: None,
            code: "route_not_found".to_string(),
            message: format!("No endpoint at {}", uri.path()),
            ..Default::default()
        }],
        request_id.to_string(),
    )
}

/// The complete service router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(crate::health::handler).with_state(state.clone()))
        .route(
            "/version",
            get(|| async { VERSION.unwrap_or(env!("CARGO_PKG_VERSION")) }),
        )
        .route(
            "/metrics",
            get(crate::metrics::handler).with_state(state.clone()),
        )
        .nest("/api", crate::get_api_v1_routes(state))
        .fallback(fallback_handler)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CatchPanicLayer::new())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .merge(crate::get_openapi_routes())
}
