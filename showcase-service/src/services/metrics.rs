//! Prometheus export for the showcase service.

use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use service_core::error::AppError;
use std::sync::OnceLock;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Records served per resource (`technologies`, `events`).
pub const RECORDS_SERVED: &str = "showcase_records_served_total";

/// Installs the global Prometheus recorder. Later calls are no-ops.
pub fn init_metrics() -> Result<(), AppError> {
    if METRICS_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| AppError::StartupFailure(anyhow::anyhow!("Prometheus recorder: {}", e)))?;
    let _ = METRICS_HANDLE.set(handle);

    describe_counter!("http_requests_total", "HTTP requests handled");
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request latency in seconds"
    );
    describe_counter!(RECORDS_SERVED, "Stored records returned to clients");

    Ok(())
}

/// Current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}
