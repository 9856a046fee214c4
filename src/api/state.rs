//! Application state for the leave ledger API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::service::LedgerService;

/// Shared application state.
///
/// Holds the ledger service shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    service: Arc<LedgerService>,
}

impl AppState {
    /// Creates a new application state around a ledger service.
    pub fn new(service: LedgerService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Returns a reference to the ledger service.
    pub fn service(&self) -> &LedgerService {
        &self.service
    }
}
