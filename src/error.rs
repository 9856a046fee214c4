//! Error types for the leave ledger engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while resolving balances,
//! reviewing records or settling hours.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{Bucket, RecordStatus};

/// The main error type for the leave ledger engine.
///
/// Arithmetic and calendar edge cases never surface here; they resolve to
/// fallback values with a warning attached to the balance. Authorization and
/// persistence failures are surfaced to the caller verbatim.
///
/// # Example
///
/// ```
/// use leave_ledger::error::LedgerError;
///
/// let error = LedgerError::UserNotFound {
///     user_id: "u_404".to_string(),
/// };
/// assert_eq!(error.to_string(), "User not found: u_404");
/// ```
#[derive(Debug, Error)]
pub enum LedgerError {
    /// An amount was non-numeric, or not positive where a positive amount is required.
    #[error("Invalid amount '{amount}': {message}")]
    InvalidAmount {
        /// The offending amount as it was received.
        amount: String,
        /// Why the amount was refused.
        message: String,
    },

    /// The user has no hire date, so no cycle or entitlement exists.
    #[error("User '{user_id}' has no hire date")]
    MissingHireDate {
        /// The user without a hire date.
        user_id: String,
    },

    /// A secret was rejected by the authorizer.
    #[error("Authorization failed")]
    AuthorizationFailed,

    /// The external store failed. Retryable; no local state was changed.
    #[error("Persistence unavailable: {message}")]
    PersistenceUnavailable {
        /// A description of the store failure.
        message: String,
    },

    /// The actor lacks the role required for the action.
    #[error("User '{actor_id}' is not permitted to {action}")]
    NotPermitted {
        /// The acting user.
        actor_id: String,
        /// The refused action.
        action: String,
    },

    /// No user with the given id exists in the snapshot.
    #[error("User not found: {user_id}")]
    UserNotFound {
        /// The missing user id.
        user_id: String,
    },

    /// No record with the given id exists in the snapshot.
    #[error("Record not found: {record_id}")]
    RecordNotFound {
        /// The missing record id.
        record_id: String,
    },

    /// The record already reached a terminal status.
    #[error("Record '{record_id}' is already {status}")]
    RecordFinalized {
        /// The record that cannot transition.
        record_id: String,
        /// Its terminal status.
        status: RecordStatus,
    },

    /// A record draft combined fields in a way the ledger does not accept.
    #[error("Invalid record: {message}")]
    InvalidRecord {
        /// A description of the problem.
        message: String,
    },

    /// A settlement asked for more hours than the bucket holds.
    #[error("Insufficient {bucket} balance: requested {requested}, available {available}")]
    InsufficientBalance {
        /// The bucket being settled.
        bucket: Bucket,
        /// Hours requested.
        requested: Decimal,
        /// Hours available after a fresh replay.
        available: Decimal,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl LedgerError {
    /// Builds an [`LedgerError::InvalidAmount`] from any displayable amount.
    pub fn invalid_amount(amount: impl ToString, message: impl Into<String>) -> Self {
        Self::InvalidAmount {
            amount: amount.to_string(),
            message: message.into(),
        }
    }

    /// Returns true for failures a caller may retry unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::PersistenceUnavailable { .. })
    }
}

/// A type alias for Results that return LedgerError.
pub type LedgerResult<T> = Result<T, LedgerError>;
