//! Collaborator traits for persistence and authorization.
//!
//! The ledger core never talks to storage. The service layer fetches a
//! [`LedgerSnapshot`] through a [`LedgerStore`], hands it to the pure ledger
//! functions and appends whatever records they emit.

mod auth;
mod memory;

pub use auth::FixedSecretAuthorizer;
pub use memory::InMemoryStore;

use async_trait::async_trait;

use crate::error::LedgerResult;
use crate::models::{LedgerSnapshot, Record, RecordStatus};

/// Backing store for users and records.
///
/// Failures are reported as `PersistenceUnavailable` and must leave the
/// store unchanged.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Fetches every user and record.
    async fn load_all(&self) -> LedgerResult<LedgerSnapshot>;

    /// Appends a new record.
    async fn append_record(&self, record: Record) -> LedgerResult<()>;

    /// Moves a pending record to a terminal status.
    async fn set_status(&self, record_id: &str, status: RecordStatus) -> LedgerResult<()>;
}

/// Verifies the secret that unlocks privileged actions.
#[async_trait]
pub trait Authorizer: Send + Sync {
    /// Returns true if `secret` is accepted.
    async fn verify(&self, secret: &str) -> LedgerResult<bool>;
}
