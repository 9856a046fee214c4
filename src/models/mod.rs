//! Core data models for the leave ledger engine.
//!
//! This module contains all the domain models used throughout the engine.

mod balance;
mod cycle;
mod record;
mod snapshot;
mod user;

pub use balance::{
    AppliedEntry, Balance, EntryEffect, LedgerWarning, WARNING_INVALID_AMOUNT,
    WARNING_MISSING_HIRE_DATE,
};
pub use cycle::Cycle;
pub use record::{Amount, Bucket, Category, Record, RecordStatus};
pub use snapshot::LedgerSnapshot;
pub use user::{Role, User};
