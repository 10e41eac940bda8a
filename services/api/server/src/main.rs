use anyhow::Context;
use savings_api::metrics::ServerMetrics;
use savings_api::shutdown::listen_for_shutdown_signals;

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;

fn main() {
    let config = match savings_api::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to build tokio runtime: {e}");
            std::process::exit(1);
        }
    };

    runtime.block_on(async {
        if let Err(e) = setup(config).await {
            tracing::error!("Fatal error during setup: {e:#}");
            std::process::exit(1);
        }
    });
}

async fn setup(config: savings_api::Config) -> anyhow::Result<()> {
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.rust_log))
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to initialize tracing filter")?;

    let use_json = config.log_format != "pretty";

    if use_json {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_timer(UtcTime::rfc_3339())
            .with_target(true)
            .with_level(true)
            .json();
        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_ansi(true)
            .pretty();
        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .init();
    };

    let addr: String = format!("0.0.0.0:{}", config.api_service_port);
    tracing::info!("Starting savings-api service at: {addr}");

    let metrics =
        ServerMetrics::new(None).context("Failed to create server metrics")?;
    let app_state = savings_api::AppState::new(config, Some(metrics));
    tracing::info!("Initialized telemetry");

    // Serving with partial or missing data is not an option
    savings_api::data_loader::load_device_data(&app_state)
        .await
        .context("Failed to load device savings data")?;

    let app = savings_api::routes::app(app_state.clone());

    // Spawn shutdown signal handler
    let shutdown_handle = app_state.shutdown.clone();
    tokio::spawn(async move {
        listen_for_shutdown_signals().await;
        shutdown_handle.shutdown();
    });

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    let shutdown_for_serve = app_state.shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_for_serve.wait_for_shutdown().await
        })
        .await
        .context("Server exited with error")?;

    tracing::info!("Server stopped");
    Ok(())
}
