//! Prometheus exposition of the metrics recorded by [`MetricsCollector`](crate::MetricsCollector).
//!
//! Installs `metrics-exporter-prometheus` as the global recorder and serves
//! `/metrics` in Prometheus text format.
//!
//! # Example
//!
//! ```rust,ignore
//! use estack_client::MetricsExporter;
//!
//! let exporter = MetricsExporter::install("127.0.0.1:9464")?;
//! ```

use std::net::SocketAddr;

use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};
use tracing::info;

use crate::metrics::METRIC_REQUEST_DURATION;

/// Histogram buckets for request latency, in seconds.
const REQUEST_DURATION_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0,
];

/// Handle to the running Prometheus listener.
pub struct MetricsExporter {
    bind_addr: SocketAddr,
}

impl MetricsExporter {
    /// Install the Prometheus recorder globally and start the HTTP listener.
    ///
    /// Must be called from inside a Tokio runtime.
    ///
    /// # Errors
    /// - the bind address does not parse as `ip:port`
    /// - another recorder is already installed, or the listener cannot start
    pub fn install(bind_addr: &str) -> Result<Self, MetricsExporterError> {
        let addr: SocketAddr = bind_addr
            .parse()
            .map_err(|e| MetricsExporterError::InvalidBindAddress(bind_addr.to_string(), e))?;

        builder()?.with_http_listener(addr).install()?;

        info!("Prometheus metrics exporter started on http://{}/metrics", addr);

        Ok(Self { bind_addr: addr })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

/// Recorder builder with the latency buckets applied.
pub fn builder() -> Result<PrometheusBuilder, MetricsExporterError> {
    Ok(PrometheusBuilder::new().set_buckets_for_metric(
        Matcher::Full(METRIC_REQUEST_DURATION.to_string()),
        REQUEST_DURATION_BUCKETS,
    )?)
}

/// Errors that can occur when installing the metrics exporter.
#[derive(Debug, thiserror::Error)]
pub enum MetricsExporterError {
    #[error("Invalid metrics bind address '{0}': {1}")]
    InvalidBindAddress(String, std::net::AddrParseError),

    #[error("Failed to start Prometheus exporter: {0}")]
    Build(#[from] metrics_exporter_prometheus::BuildError),
}
