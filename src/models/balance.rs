//! Balance result models.
//!
//! A [`Balance`] is the output of one ledger replay: the two bucket balances,
//! the cycle they belong to, every record that moved them and any warnings
//! raised along the way.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Bucket, Category, Cycle};

/// Warning code for a record whose amount could not be read as hours.
pub const WARNING_INVALID_AMOUNT: &str = "INVALID_AMOUNT";

/// Warning code for a user without a hire date.
pub const WARNING_MISSING_HIRE_DATE: &str = "MISSING_HIRE_DATE";

/// How a single record moved a balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryEffect {
    /// Hours drawn from the annual bucket.
    AnnualUsage,
    /// Signed correction to the annual bucket.
    AnnualAdjustment,
    /// Hours added to the comp bucket.
    CompCredit,
    /// Hours drawn from the comp bucket.
    CompDebit,
}

/// A record that contributed to a balance, with its signed effect in hours.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AppliedEntry {
    /// The contributing record.
    pub record_id: String,
    /// The record's category.
    pub category: Category,
    /// The bucket it moved.
    pub bucket: Bucket,
    /// How it moved the bucket.
    pub effect: EntryEffect,
    /// Signed change to the bucket balance.
    pub delta: Decimal,
}

/// A non-fatal problem found during a replay.
///
/// Warnings indicate data that was resolved to a fallback value rather than
/// rejected outright.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The record that triggered the warning, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
}

/// Both balances of one user for one cycle.
///
/// # Example
///
/// ```
/// use leave_ledger::models::{Balance, Cycle};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let balance = Balance {
///     user_id: "u_001".to_string(),
///     cycle: Cycle::degenerate(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()),
///     annual_total: Decimal::ZERO,
///     annual_left: Decimal::ZERO,
///     comp_left: Decimal::from(4),
///     applied: vec![],
///     warnings: vec![],
/// };
/// assert_eq!(balance.comp_left, Decimal::from(4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// The user the balance belongs to.
    pub user_id: String,
    /// The cycle the balance was replayed over.
    pub cycle: Cycle,
    /// Entitlement hours for the cycle.
    pub annual_total: Decimal,
    /// Annual-leave hours remaining. May be negative.
    pub annual_left: Decimal,
    /// Comp hours remaining. May be negative.
    pub comp_left: Decimal,
    /// Contributing records, ordered by record id.
    pub applied: Vec<AppliedEntry>,
    /// Warnings, ordered by record id.
    pub warnings: Vec<LedgerWarning>,
}

impl Balance {
    /// The remaining hours of a bucket. Duty has no balance.
    pub fn left(&self, bucket: Bucket) -> Decimal {
        match bucket {
            Bucket::Annual => self.annual_left,
            Bucket::Comp => self.comp_left,
            Bucket::Duty => Decimal::ZERO,
        }
    }

    /// Returns true if any warning carries the given code.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}
