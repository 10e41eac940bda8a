use anyhow::Context;
use savings_store::LoadSummary;

use crate::AppState;

/// Loads the device and savings CSV files into the shared store.
///
/// Goes through the same single-flight gate as request-time loading, so
/// calling it at startup and racing a request never reads the files twice.
pub async fn load_device_data(state: &AppState) -> anyhow::Result<LoadSummary> {
    let sources = state.config.data_sources();
    tracing::info!(
        devices = %sources.devices_path.display(),
        savings = %sources.savings_path.display(),
        "Loading device savings CSV files"
    );

    let summary = state
        .store
        .ensure_loaded(sources)
        .await
        .context("Device savings data could not be loaded")?;

    state.telemetry.maybe_use_metrics(|m| m.record_load(&summary));

    if summary.rejected_rows > 0 {
        tracing::warn!(
            rejected = summary.rejected_rows,
            "Some CSV rows were skipped during load"
        );
    }
    tracing::info!(
        devices = summary.devices_loaded,
        savings = summary.savings_loaded,
        "Device savings data ready"
    );

    Ok(summary)
}
