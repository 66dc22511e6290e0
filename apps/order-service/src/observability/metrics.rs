//! Prometheus metrics for the order service.
//!
//! # Example
//!
//! ```ignore
//! use order_service::observability::{init_metrics, record_order_operation};
//!
//! init_metrics("127.0.0.1:9090".parse()?)?;
//! record_order_operation("create", "ok");
//! ```

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Initialize the Prometheus metrics exporter.
///
/// This starts an HTTP listener that exposes metrics at `/metrics`.
///
/// # Errors
///
/// Returns an error if the metrics exporter fails to start (e.g., port already in use).
pub fn init_metrics(listen_addr: SocketAddr) -> Result<(), MetricsError> {
    PrometheusBuilder::new()
        .with_http_listener(listen_addr)
        .install()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    tracing::info!(addr = %listen_addr, "Prometheus metrics exporter started");

    Ok(())
}

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to install metrics exporter.
    #[error("metrics installation error: {0}")]
    Installation(String),
}

/// Record one order service call.
///
/// # Arguments
///
/// * `operation` - Service operation (e.g., "create", "update", "delete")
/// * `outcome` - "ok" or the error kind (e.g., "not_found", "validation")
pub fn record_order_operation(operation: &'static str, outcome: &'static str) {
    counter!(
        "orders_operations_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}

/// Update the stored orders gauge.
pub fn update_order_count(count: usize) {
    #[allow(clippy::cast_precision_loss)]
    gauge!("orders_stored").set(count as f64);
}
