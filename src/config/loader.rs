//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration and the optional seed ledger from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{LedgerError, LedgerResult};
use crate::models::LedgerSnapshot;

use super::types::{AuthConfig, LedgerConfig, LoggingConfig, ServerConfig};

/// File name of the required service configuration.
const CONFIG_FILE: &str = "ledger.yaml";

/// File name of the optional seed ledger.
const SEED_FILE: &str = "seed.yaml";

/// Loads and provides access to the service configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// ├── ledger.yaml   # Server, auth and logging settings
/// └── seed.yaml     # Optional users and records for the in-memory store
/// ```
///
/// # Example
///
/// ```no_run
/// use leave_ledger::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// println!("Listening on {}", loader.server().bind_address);
/// println!("Seeded users: {}", loader.seed().users.len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: LedgerConfig,
    seed: LedgerSnapshot,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `ledger.yaml` is missing
    /// - `ledger.yaml` or an existing `seed.yaml` contains invalid YAML
    ///
    /// A missing `seed.yaml` yields an empty ledger.
    pub fn load<P: AsRef<Path>>(path: P) -> LedgerResult<Self> {
        let path = path.as_ref();

        let config = Self::load_yaml::<LedgerConfig>(&path.join(CONFIG_FILE))?;

        let seed_path = path.join(SEED_FILE);
        let seed = if seed_path.exists() {
            Self::load_yaml::<LedgerSnapshot>(&seed_path)?
        } else {
            LedgerSnapshot::default()
        };

        Ok(Self { config, seed })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> LedgerResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| LedgerError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| LedgerError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the full service configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerConfig {
        &self.config.server
    }

    /// Returns the authorization settings.
    pub fn auth(&self) -> &AuthConfig {
        &self.config.auth
    }

    /// Returns the logging settings.
    pub fn logging(&self) -> &LoggingConfig {
        &self.config.logging
    }

    /// Returns the seed ledger.
    pub fn seed(&self) -> &LedgerSnapshot {
        &self.seed
    }

    /// Consumes the loader, returning the seed ledger.
    pub fn into_seed(self) -> LedgerSnapshot {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RecordStatus, Role};
    use std::path::PathBuf;

    fn config_path() -> &'static str {
        "./config"
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "leave-ledger-{}-{}",
            name,
            uuid::Uuid::new_v4()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.server().bind_address, "127.0.0.1:3000");
        assert_eq!(loader.auth().demo_secret, "admin888");
        assert!(!loader.logging().filter.is_empty());
    }

    #[test]
    fn test_seed_ledger_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let seed = loader.seed();

        let admin = seed.user("u_admin").unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert!(seed.user("u_001").unwrap().hire_date.is_some());
        assert!(seed.records.iter().any(|r| r.status == RecordStatus::Pending));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");
        assert!(result.is_err());

        match result {
            Err(LedgerError::ConfigNotFound { path }) => {
                assert!(path.contains("ledger.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_missing_seed_yields_empty_ledger() {
        let dir = scratch_dir("no-seed");
        fs::write(dir.join(CONFIG_FILE), "auth:\n  demo_secret: s3cret\n").unwrap();

        let loader = ConfigLoader::load(&dir).unwrap();
        assert!(loader.seed().users.is_empty());
        assert!(loader.into_seed().records.is_empty());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let dir = scratch_dir("bad-yaml");
        fs::write(dir.join(CONFIG_FILE), "auth: [unclosed\n").unwrap();

        match ConfigLoader::load(&dir) {
            Err(LedgerError::ConfigParseError { path, .. }) => {
                assert!(path.contains("ledger.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }

        fs::remove_dir_all(&dir).unwrap();
    }
}
