//! Observability module for metrics.
//!
//! Prometheus metrics export for the order service. Logging setup lives in
//! [`crate::telemetry`].

mod metrics;

pub use self::metrics::{MetricsError, init_metrics, record_order_operation, update_order_count};
