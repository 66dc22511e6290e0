//! Tracing Setup
//!
//! Initializes the `tracing` subscriber from [`LoggingConfig`].
//!
//! # Configuration
//!
//! - `RUST_LOG`: overrides `observability.logging.level` when set
//! - `observability.logging.format`: `json`, `pretty` or `compact`
//!
//! # Usage
//!
//! ```rust,ignore
//! use order_service::telemetry::init_telemetry;
//!
//! init_telemetry(&config.observability.logging)?;
//! ```

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

use crate::config::LoggingConfig;

/// Telemetry setup errors.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured level is not a valid filter directive.
    #[error("Invalid log level '{level}': {message}")]
    InvalidLevel {
        /// Configured level.
        level: String,
        /// Parser message.
        message: String,
    },

    /// A global subscriber was already installed.
    #[error("Failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Build the filter: `RUST_LOG` first, then the configured level.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level).map_err(|e| TelemetryError::InvalidLevel {
        level: config.level.clone(),
        message: e.to_string(),
    })
}

/// Install the global tracing subscriber, writing to stdout.
///
/// Call once per process, before anything logs.
pub fn init_telemetry(config: &LoggingConfig) -> Result<(), TelemetryError> {
    init_telemetry_with_writer(config, std::io::stdout)
}

/// Install the global tracing subscriber with a custom writer.
pub fn init_telemetry_with_writer<W>(config: &LoggingConfig, writer: W) -> Result<(), TelemetryError>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = build_filter(config)?;

    let result = match config.format.as_str() {
        "json" => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_writer(writer)
            .try_init(),
        "compact" => tracing_subscriber::fmt()
            .compact()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(writer)
            .try_init(),
        _ => tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(filter)
            .with_writer(writer)
            .try_init(),
    };

    result.map_err(|e| TelemetryError::Install(e.to_string()))?;

    tracing::debug!(level = %config.level, format = %config.format, "Telemetry initialized");
    Ok(())
}
