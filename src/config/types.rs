//! Configuration types for the ledger service.
//!
//! These structures are deserialized from `ledger.yaml`.

use serde::Deserialize;

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on (e.g., "127.0.0.1:3000").
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1:3000".to_string()
}

/// Authorization settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret accepted by the fixed-secret authorizer in local and demo mode.
    pub demo_secret: String,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing-subscriber` filter directive used when `LEAVE_LEDGER_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}

/// Structure of `ledger.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Authorization settings. Required.
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}
