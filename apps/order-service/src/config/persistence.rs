//! Order store configuration.

use serde::{Deserialize, Serialize};

/// Relational store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// SQLite connection URL, e.g. `sqlite://orders.db` or `sqlite::memory:`.
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Pool size.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_database_url() -> String {
    "sqlite://orders.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}
