use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use prometheus::{IntCounterVec, IntGaugeVec, Opts, Registry};
use savings_store::LoadSummary;
use telemetry::metrics::TelemetryMetrics;

use crate::AppState;

#[derive(Clone, Debug)]
pub struct ServerMetrics {
    pub registry: Registry,

    pub request_errors: IntCounterVec,
    pub records_loaded: IntGaugeVec,
}

impl TelemetryMetrics for ServerMetrics {
    fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl ServerMetrics {
    pub fn new(prefix: Option<String>) -> anyhow::Result<Self> {
        let request_errors = IntCounterVec::new(
            Opts::new(
                "request_errors",
                "A metric counting request errors by handler and error code",
            ),
            &["handler", "error_code"],
        )?;
        let records_loaded = IntGaugeVec::new(
            Opts::new(
                "records_loaded",
                "Records held in memory after the last load, by kind",
            ),
            &["kind"],
        )?;

        let registry = Registry::new_custom(prefix, None)?;
        registry.register(Box::new(request_errors.clone()))?;
        registry.register(Box::new(records_loaded.clone()))?;

        Ok(Self {
            registry,
            request_errors,
            records_loaded,
        })
    }

    pub fn record_error(&self, handler: &str, error_code: &str) {
        self.request_errors
            .with_label_values(&[handler, error_code])
            .inc();
    }

    pub fn record_load(&self, summary: &LoadSummary) {
        for (kind, value) in [
            ("devices", summary.devices_loaded),
            ("savings", summary.savings_loaded),
            ("rejected", summary.rejected_rows),
        ] {
            self.records_loaded
                .with_label_values(&[kind])
                .set(value as i64);
        }
    }
}

pub async fn handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        state.telemetry.get_metrics(),
    )
}
