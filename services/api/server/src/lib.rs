//! # Device Savings API Server
//!
use crate::metrics::ServerMetrics;
use crate::shutdown::ShutdownCoordinator;
use savings_store::{DataSources, DataStore};
use std::path::PathBuf;
use std::sync::Arc;
use telemetry::metrics::Telemetry;
// Private API modules - internal implementation details
mod api;
pub mod data_loader;
pub mod shutdown;

// OpenAPI documentation module
pub mod openapi;

// Public modules - shared utilities and middleware
pub mod health;
pub mod metrics;
pub mod routes;
pub mod shared;

pub use api::v1::get_routes as get_api_v1_routes;

/// Swagger UI, serving the OpenAPI document at `/api-docs/openapi.json`.
pub fn get_openapi_routes() -> axum::Router {
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    axum::Router::new().merge(
        SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", openapi::SavingsApiDoc::openapi()),
    )
}

#[derive(Clone)]
pub struct AppState {
    pub telemetry: Arc<Telemetry<ServerMetrics>>,
    pub store: DataStore,
    pub config: Arc<Config>,
    pub shutdown: Arc<ShutdownCoordinator>,
}

impl AppState {
    pub fn new(config: Config, metrics: Option<ServerMetrics>) -> Self {
        Self {
            telemetry: Telemetry::new(metrics),
            store: DataStore::new(),
            config: Arc::new(config),
            shutdown: Arc::new(ShutdownCoordinator::new()),
        }
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    // Service port
    #[serde(default = "default_api_service_port")]
    pub api_service_port: String,

    // Loggers
    #[serde(default = "default_rust_log")]
    pub rust_log: String,
    #[serde(default)]
    pub log_format: String,

    // CSV sources, relative to the working directory
    #[serde(default = "default_devices_csv_file_path")]
    pub devices_csv_file_path: String,
    #[serde(default = "default_savings_csv_file_path")]
    pub savings_csv_file_path: String,
}

fn default_api_service_port() -> String {
    "3000".to_string()
}

fn default_rust_log() -> String {
    "info".to_string()
}

fn default_devices_csv_file_path() -> String {
    "data/devices.csv".to_string()
}

fn default_savings_csv_file_path() -> String {
    "data/device-saving.csv".to_string()
}

impl Config {
    pub fn load() -> Result<Self, envy::Error> {
        // Load .env file if present (useful when running outside docker-compose)
        match dotenv::dotenv() {
            Ok(path) => eprintln!("Loaded .env from: {}", path.display()),
            Err(e) => eprintln!("dotenv warning: {e}"),
        }

        envy::from_env::<Config>()
    }

    pub fn data_sources(&self) -> DataSources {
        DataSources {
            devices_path: PathBuf::from(&self.devices_csv_file_path),
            savings_path: PathBuf::from(&self.savings_csv_file_path),
        }
    }
}
