use std::sync::Arc;

use telemetry::metrics::Telemetry;

use crate::api::api_error::ApiError;
use crate::metrics::ServerMetrics;

/// Handler error types that can be rendered as an [`ApiError`].
pub trait IntoApiError {
    /// Short label used for the `error_code` metric dimension.
    fn error_code(&self) -> &'static str;

    fn into_api_error(self, request_id: &str) -> ApiError;
}

/// Counts handler errors and converts them to [`ApiError`].
pub struct ErrorRecorder<'a> {
    telemetry: &'a Arc<Telemetry<ServerMetrics>>,
    handler_name: &'a str,
    request_id: &'a str,
}

impl<'a> ErrorRecorder<'a> {
    pub fn new(
        telemetry: &'a Arc<Telemetry<ServerMetrics>>,
        handler_name: &'a str,
        request_id: &'a str,
    ) -> Self {
        Self {
            telemetry,
            handler_name,
            request_id,
        }
    }

    pub fn record<E: IntoApiError>(&self, e: E) -> ApiError {
        let code = e.error_code();
        tracing::warn!(
            handler = self.handler_name,
            error_code = code,
            request_id = self.request_id,
            "Request failed"
        );
        self.telemetry.maybe_use_metrics(|m| {
            m.record_error(self.handler_name, code);
        });
        e.into_api_error(self.request_id)
    }
}
