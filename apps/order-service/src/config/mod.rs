//! Configuration module for the order service.
//!
//! Loads YAML configuration with environment variable interpolation and
//! validates it before use.
//!
//! # Usage
//!
//! ```rust,ignore
//! use order_service::config::load_config;
//!
//! // Default path (config.yaml); built-in defaults when it does not exist
//! let config = load_config(None)?;
//!
//! // Custom path; must exist
//! let config = load_config(Some("deploy/config.yaml"))?;
//!
//! println!("HTTP port: {}", config.server.http_port);
//! ```

mod observability;
mod persistence;
mod server;

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use observability::{LoggingConfig, MetricsConfig, ObservabilityConfig};
pub use persistence::PersistenceConfig;
pub use server::ServerConfig;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "ORDER_SERVICE_CONFIG";

/// Config file used when none is named.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Order store configuration.
    #[serde(default)]
    pub persistence: PersistenceConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Parsed metrics listener address.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `listen_addr` is not `host:port`.
    pub fn metrics_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.observability
            .metrics
            .listen_addr
            .parse()
            .map_err(|e| {
                ConfigError::ValidationError(format!(
                    "observability.metrics.listen_addr '{}': {e}",
                    self.observability.metrics.listen_addr
                ))
            })
    }
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to `config.yaml`,
///   falling back to built-in defaults when that file does not exist.
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let (path, required) = match path {
        Some(path) => (path, true),
        None => (DEFAULT_CONFIG_PATH, false),
    };

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
            let config = Config::default();
            validate_config(&config)?;
            return Ok(config);
        }
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.to_string(),
                source: e,
            });
        }
    };

    load_config_from_string(&contents)
}

/// Load configuration from the file named by `ORDER_SERVICE_CONFIG`.
///
/// # Errors
///
/// Same as [`load_config`].
pub fn load_config_from_env() -> Result<Config, ConfigError> {
    let path = std::env::var(CONFIG_PATH_ENV).ok().filter(|p| !p.is_empty());
    load_config(path.as_deref())
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    // An empty document means "all defaults".
    let config: Config = if interpolated.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml_bw::from_str(&interpolated)?
    };
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.http_port == 0 {
        return Err(ConfigError::ValidationError(
            "server.http_port must be non-zero".to_string(),
        ));
    }

    if config.persistence.database_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "persistence.database_url must not be empty".to_string(),
        ));
    }

    if config.persistence.max_connections < 1 {
        return Err(ConfigError::ValidationError(
            "persistence.max_connections must be at least 1".to_string(),
        ));
    }

    let valid_formats = ["json", "pretty", "compact"];
    if !valid_formats.contains(&config.observability.logging.format.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {valid_formats:?}"
        )));
    }

    if config.observability.metrics.enabled {
        config.metrics_addr()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert_eq!(config.server.http_port, 8000);
        assert_eq!(config.server.bind_address, "127.0.0.1");
        assert_eq!(config.server.shutdown_timeout_secs, 10);
        assert_eq!(config.persistence.database_url, "sqlite://orders.db");
        assert_eq!(config.persistence.max_connections, 5);
        assert_eq!(config.observability.logging.level, "info");
        assert_eq!(config.observability.logging.format, "pretty");
        assert!(!config.observability.metrics.enabled);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn load_minimal_config() {
        let yaml = r"
server:
  http_port: 8080
";

        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load minimal config: {e}"),
        };
        assert_eq!(config.server.http_port, 8080);
        assert_eq!(config.persistence.max_connections, 5);
    }

    #[test]
    fn empty_document_is_default() {
        let config = load_config_from_string("").unwrap();
        assert_eq!(config.server.http_addr(), "127.0.0.1:8000");
    }

    #[test]
    fn env_var_with_default_when_missing() {
        let input = "url: ${ORDER_SERVICE_TEST_NONEXISTENT_VAR:-sqlite::memory:}";
        let result = interpolate_env_vars(input);

        assert_eq!(result, "url: sqlite::memory:");
    }

    #[test]
    #[expect(clippy::literal_string_with_formatting_args)] // ${...} is env var syntax
    fn env_var_with_default_uses_existing() {
        let input = "path: ${PATH:-default}";
        let result = interpolate_env_vars(input);

        assert_ne!(result, "path: default");
        assert!(result.starts_with("path: "));
    }

    #[test]
    fn env_var_without_default_becomes_empty() {
        let input = "url: ${ORDER_SERVICE_TEST_UNLIKELY_TO_EXIST}";
        assert_eq!(interpolate_env_vars(input), "url: ");
    }

    #[test]
    fn validation_zero_connections() {
        let yaml = r"
persistence:
  max_connections: 0
";

        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for zero connections");
        };
        assert!(err.to_string().contains("max_connections"));
    }

    #[test]
    fn validation_unknown_log_format() {
        let yaml = r"
observability:
  logging:
    format: xml
";

        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for log format");
        };
        assert!(err.to_string().contains("format"));
    }

    #[test]
    fn validation_bad_metrics_addr() {
        let yaml = r"
observability:
  metrics:
    enabled: true
    listen_addr: not-an-address
";

        assert!(matches!(
            load_config_from_string(yaml),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
server:
  http_port: 9001
  bind_address: "0.0.0.0"
persistence:
  database_url: "sqlite::memory:"
  max_connections: 1
observability:
  logging:
    level: debug
    format: json
  metrics:
    enabled: true
    listen_addr: "127.0.0.1:9191"
"#
        )
        .unwrap();

        let config = load_config(file.path().to_str()).unwrap();
        assert_eq!(config.server.http_addr(), "0.0.0.0:9001");
        assert_eq!(config.persistence.database_url, "sqlite::memory:");
        assert_eq!(config.observability.logging.format, "json");
        assert_eq!(
            config.metrics_addr().unwrap(),
            "127.0.0.1:9191".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn missing_named_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");

        let Err(err) = load_config(path.to_str()) else {
            panic!("expected read error");
        };
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn parse_error() {
        assert!(matches!(
            load_config_from_string("server: [unclosed"),
            Err(ConfigError::ParseError(_))
        ));
    }
}
