//! Configuration loading for the leave ledger service.
//!
//! This module loads the service settings from `ledger.yaml` and an optional
//! seed ledger from `seed.yaml`.
//!
//! # Example
//!
//! ```no_run
//! use leave_ledger::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Bind address: {}", config.server().bind_address);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AuthConfig, LedgerConfig, LoggingConfig, ServerConfig};
