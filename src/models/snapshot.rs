//! Immutable snapshot of users and records.

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

use super::{Record, User};

/// Everything the ledger needs for one computation.
///
/// Fetched fresh from the store before each decision and never mutated by
/// the core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// All known users.
    #[serde(default)]
    pub users: Vec<User>,
    /// All records, in any order.
    #[serde(default)]
    pub records: Vec<Record>,
}

impl LedgerSnapshot {
    /// Looks up a user by id.
    pub fn user(&self, user_id: &str) -> LedgerResult<&User> {
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .ok_or_else(|| LedgerError::UserNotFound {
                user_id: user_id.to_string(),
            })
    }

    /// Looks up a record by id.
    pub fn record(&self, record_id: &str) -> LedgerResult<&Record> {
        self.records
            .iter()
            .find(|r| r.id == record_id)
            .ok_or_else(|| LedgerError::RecordNotFound {
                record_id: record_id.to_string(),
            })
    }
}
