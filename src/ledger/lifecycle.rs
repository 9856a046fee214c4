//! Record lifecycle: construction rules and review transitions.
//!
//! Requests (leave, overtime) start `pending` and need exactly one admin
//! review. Roster entries, adjustments and settlements are system or admin
//! output and start `approved`. Approved and rejected are terminal: there is
//! no recall and no re-review.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Amount, Bucket, Category, Record, RecordStatus, User};

use super::duration::hours_between;

impl Category {
    /// The status a record of this category is created in.
    pub fn initial_status(self) -> RecordStatus {
        match self {
            Category::Leave | Category::Overtime => RecordStatus::Pending,
            Category::Roster | Category::Adjustment | Category::Settlement => {
                RecordStatus::Approved
            }
        }
    }
}

/// An admin's verdict on a pending record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    /// Count the record toward balances.
    Approve,
    /// Discard the record.
    Reject,
}

impl ReviewDecision {
    /// The terminal status this decision produces.
    pub fn target_status(self) -> RecordStatus {
        match self {
            ReviewDecision::Approve => RecordStatus::Approved,
            ReviewDecision::Reject => RecordStatus::Rejected,
        }
    }
}

/// What a user fills in when asking for leave or logging overtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDraft {
    /// Leave or overtime.
    pub category: Category,
    /// Bucket to draw leave from. Overtime always accrues comp time.
    #[serde(default = "default_request_bucket", rename = "type")]
    pub bucket: Bucket,
    /// Requested hours. Derived from the clock range when missing.
    #[serde(default)]
    pub amount: Amount,
    /// The day the leave or overtime applies to.
    pub date: NaiveDate,
    /// Clock start.
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    /// Clock end.
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    /// Free-text reason.
    #[serde(default)]
    pub reason: String,
}

fn default_request_bucket() -> Bucket {
    Bucket::Annual
}

/// Generates a fresh record id.
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

/// Refuses the action unless `actor` is an admin.
pub fn ensure_admin(actor: &User, action: &str) -> LedgerResult<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(LedgerError::NotPermitted {
            actor_id: actor.id.clone(),
            action: action.to_string(),
        })
    }
}

fn request_bucket(draft: &RequestDraft) -> LedgerResult<Bucket> {
    match (draft.category, draft.bucket) {
        (Category::Overtime, _) => Ok(Bucket::Comp),
        (Category::Leave, Bucket::Annual | Bucket::Comp) => Ok(draft.bucket),
        (Category::Leave, Bucket::Duty) => Err(LedgerError::InvalidRecord {
            message: "leave must draw from the annual or comp bucket".to_string(),
        }),
        (Category::Roster | Category::Adjustment | Category::Settlement, _) => {
            Err(LedgerError::InvalidRecord {
                message: format!("{} records cannot be requested", draft.category),
            })
        }
    }
}

fn request_hours(draft: &RequestDraft) -> LedgerResult<Decimal> {
    let hours = match (&draft.amount, draft.start_time, draft.end_time) {
        (Amount::Hours(hours), _, _) => *hours,
        (Amount::Missing, Some(start), Some(end)) => hours_between(start, end),
        (Amount::Missing, _, _) => {
            return Err(LedgerError::invalid_amount(
                &draft.amount,
                "an amount or a clock range is required",
            ));
        }
        (Amount::Invalid(raw), _, _) => {
            return Err(LedgerError::invalid_amount(raw, "not a number of hours"));
        }
    };

    if hours <= Decimal::ZERO {
        return Err(LedgerError::invalid_amount(hours, "must be greater than zero"));
    }
    if hours > Amount::MAX_HOURS {
        return Err(LedgerError::invalid_amount(
            hours,
            format!("must not exceed {} hours", Amount::MAX_HOURS),
        ));
    }
    Ok(hours)
}

/// Creates a pending leave or overtime request for `target`.
///
/// Members may only file for themselves; admins may file for anyone.
///
/// # Errors
///
/// - `NotPermitted` when a member files for someone else
/// - `InvalidRecord` for a category that cannot be requested, or leave on the duty bucket
/// - `InvalidAmount` when the hours are non-numeric, missing without a clock range, not
///   positive, or above [`Amount::MAX_HOURS`]
pub fn new_request(
    actor: &User,
    target: &User,
    draft: RequestDraft,
    submitted_at: DateTime<Utc>,
) -> LedgerResult<Record> {
    if !actor.is_admin() && actor.id != target.id {
        return Err(LedgerError::NotPermitted {
            actor_id: actor.id.clone(),
            action: format!("file requests for user '{}'", target.id),
        });
    }

    let bucket = request_bucket(&draft)?;
    let hours = request_hours(&draft)?;

    Ok(Record {
        id: new_record_id(),
        user_id: target.id.clone(),
        user_name: target.name.clone(),
        category: draft.category,
        bucket,
        amount: Amount::Hours(hours),
        date: draft.date,
        start_time: draft.start_time,
        end_time: draft.end_time,
        reason: draft.reason,
        status: draft.category.initial_status(),
        submitted_at,
        carry_over_until: None,
    })
}

/// Creates an approved duty entry on `target`'s calendar. Admin only.
///
/// Roster entries are display only and never touch a balance.
pub fn new_roster_entry(
    actor: &User,
    target: &User,
    date: NaiveDate,
    note: impl Into<String>,
    submitted_at: DateTime<Utc>,
) -> LedgerResult<Record> {
    ensure_admin(actor, "roster duty")?;

    Ok(Record {
        id: new_record_id(),
        user_id: target.id.clone(),
        user_name: target.name.clone(),
        category: Category::Roster,
        bucket: Bucket::Duty,
        amount: Amount::Hours(Decimal::ZERO),
        date,
        start_time: None,
        end_time: None,
        reason: note.into(),
        status: Category::Roster.initial_status(),
        submitted_at,
        carry_over_until: None,
    })
}

/// Decides the transition of a pending record. Admin only.
///
/// Returns the terminal status to persist; the record itself is not touched.
///
/// # Examples
///
/// ```
/// use leave_ledger::ledger::{review, ReviewDecision};
/// use leave_ledger::models::{Amount, Bucket, Category, Record, RecordStatus, Role, User};
/// use chrono::{NaiveDate, Utc};
/// use rust_decimal::Decimal;
///
/// let admin = User {
///     id: "u_admin".to_string(),
///     name: "Office Manager".to_string(),
///     role: Role::Admin,
///     hire_date: None,
///     comp_baseline: Decimal::ZERO,
///     salary: None,
/// };
/// let record = Record {
///     id: "r_001".to_string(),
///     user_id: "u_001".to_string(),
///     user_name: "Chen".to_string(),
///     category: Category::Leave,
///     bucket: Bucket::Annual,
///     amount: Amount::Hours(Decimal::from(8)),
///     date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
///     start_time: None,
///     end_time: None,
///     reason: String::new(),
///     status: RecordStatus::Pending,
///     submitted_at: Utc::now(),
///     carry_over_until: None,
/// };
///
/// let status = review(&record, &admin, ReviewDecision::Approve).unwrap();
/// assert_eq!(status, RecordStatus::Approved);
/// ```
pub fn review(
    record: &Record,
    actor: &User,
    decision: ReviewDecision,
) -> LedgerResult<RecordStatus> {
    ensure_admin(actor, "review records")?;

    if record.status.is_terminal() {
        return Err(LedgerError::RecordFinalized {
            record_id: record.id.clone(),
            status: record.status,
        });
    }

    Ok(decision.target_status())
}
