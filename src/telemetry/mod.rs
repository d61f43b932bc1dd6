//! Telemetry module
//!
//! Structured logging and Prometheus metrics

mod logging;
mod metrics;

pub use logging::{init_logging, LogFormat};
pub use metrics::{
    record_cache_hit, record_provider_failure, record_provider_latency, record_quote,
    CACHE_HITS, PROVIDER_FAILURES, PROVIDER_LATENCY, QUOTES,
};

use crate::config::TelemetryConfig;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Handle describing the telemetry that was started
pub struct TelemetryGuard {
    /// Address the Prometheus exporter listens on, if started
    pub metrics_addr: Option<SocketAddr>,
}

/// Initialize all telemetry subsystems
///
/// Must be called from within a tokio runtime when `metrics_port` is set; the
/// exporter serves `/metrics` on a background task.
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<TelemetryGuard> {
    init_logging(&config.log_level, config.log_format)?;

    let metrics_addr = match config.metrics_port {
        Some(port) => {
            let addr = SocketAddr::from(([0, 0, 0, 0], port));
            PrometheusBuilder::new()
                .with_http_listener(addr)
                .install()
                .map_err(|e| anyhow::anyhow!("Failed to start metrics exporter: {}", e))?;
            tracing::info!(%addr, "Prometheus exporter listening");
            Some(addr)
        }
        None => None,
    };

    Ok(TelemetryGuard { metrics_addr })
}
