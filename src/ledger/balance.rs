//! Balance replay.
//!
//! Balances are never stored. Every query replays the approved records of one
//! user over one cycle, so the result is a pure function of the snapshot, the
//! cycle and the entitlement, and does not depend on record order.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{
    Amount, AppliedEntry, Balance, Bucket, Category, Cycle, EntryEffect, LedgerWarning, Record,
    User, WARNING_INVALID_AMOUNT, WARNING_MISSING_HIRE_DATE,
};

use super::cycle::resolve_cycle;
use super::entitlement::entitlement_hours;

/// Where a record lands relative to the cycle being replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attribution {
    /// A regular record dated inside the cycle.
    InCycle,
    /// A carry-over dated at the end of this cycle: the hours leave it.
    CarryOverOut,
    /// A carry-over dated at the end of the previous cycle: the hours arrive.
    CarryOverIn,
}

fn attribute(record: &Record, cycle: &Cycle) -> Option<Attribution> {
    if !record.is_carry_over() {
        return cycle.contains(record.date).then_some(Attribution::InCycle);
    }
    if cycle.contains(record.date) {
        return Some(Attribution::CarryOverOut);
    }
    let arrives_on = record.date.succ_opt();
    let still_valid = record
        .carry_over_until
        .zip(arrives_on)
        .is_some_and(|(until, arrival): (NaiveDate, NaiveDate)| until >= arrival);
    (still_valid && arrives_on.is_some_and(|d| cycle.contains(d)))
        .then_some(Attribution::CarryOverIn)
}

/// How a record of this category and bucket moves a balance, if at all.
fn effect_of(category: Category, bucket: Bucket, attribution: Attribution) -> Option<EntryEffect> {
    let outgoing = attribution == Attribution::CarryOverOut;
    match (category, bucket) {
        (Category::Roster, _) | (_, Bucket::Duty) => None,
        (Category::Leave | Category::Settlement, Bucket::Annual) => Some(EntryEffect::AnnualUsage),
        (Category::Adjustment, Bucket::Annual) if outgoing => Some(EntryEffect::AnnualUsage),
        (Category::Adjustment, Bucket::Annual) => Some(EntryEffect::AnnualAdjustment),
        (Category::Overtime, Bucket::Annual) => None,
        (Category::Leave | Category::Settlement, Bucket::Comp) => Some(EntryEffect::CompDebit),
        (Category::Adjustment, Bucket::Comp) if outgoing => Some(EntryEffect::CompDebit),
        (Category::Overtime | Category::Adjustment, Bucket::Comp) => Some(EntryEffect::CompCredit),
    }
}

fn signed_delta(effect: EntryEffect, hours: Decimal) -> Decimal {
    match effect {
        EntryEffect::AnnualUsage | EntryEffect::CompDebit => -hours.abs(),
        EntryEffect::AnnualAdjustment | EntryEffect::CompCredit => hours,
    }
}

const ANNUAL_EFFECTS: [EntryEffect; 2] = [EntryEffect::AnnualAdjustment, EntryEffect::AnnualUsage];
const COMP_EFFECTS: [EntryEffect; 2] = [EntryEffect::CompCredit, EntryEffect::CompDebit];

/// `base` plus every applied delta with one of the wanted effects, or `None`
/// if the sum leaves `Decimal` range.
fn bucket_total(
    base: Decimal,
    applied: &[AppliedEntry],
    wanted: &[EntryEffect],
) -> Option<Decimal> {
    applied
        .iter()
        .filter(|e| wanted.contains(&e.effect))
        .try_fold(base, |total, e| total.checked_add(e.delta))
}

/// Replays a user's records over a cycle.
///
/// Only records that belong to the user, are approved and are not roster
/// entries count, and only when attributed to the cycle (inclusive, by date).
///
/// - Annual: `entitlement + Σ adjustment − Σ |leave, settlement|`
/// - Comp: `baseline + Σ overtime, adjustment − Σ |leave, settlement|`
///
/// A deferral carry-over dated at the end of a cycle debits that cycle and
/// credits the next one, so deferred hours move forward instead of being
/// counted twice.
///
/// Amounts that cannot be read as hours, or that exceed
/// [`Amount::MAX_HOURS`](crate::models::Amount::MAX_HOURS), count as zero and
/// produce an `INVALID_AMOUNT` warning. A bucket whose total would overflow
/// falls back to its starting value with the same warning. Negative balances
/// are valid.
///
/// # Examples
///
/// ```
/// use leave_ledger::ledger::{compute_balance, resolve_cycle};
/// use leave_ledger::models::{Amount, Bucket, Category, Record, RecordStatus, Role, User};
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let user = User {
///     id: "u_001".to_string(),
///     name: "Chen".to_string(),
///     role: Role::Member,
///     hire_date: NaiveDate::from_ymd_opt(2019, 3, 10),
///     comp_baseline: Decimal::from(4),
///     salary: None,
/// };
/// let leave = Record {
///     id: "r_001".to_string(),
///     user_id: "u_001".to_string(),
///     user_name: "Chen".to_string(),
///     category: Category::Leave,
///     bucket: Bucket::Annual,
///     amount: Amount::Hours(Decimal::from(8)),
///     date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
///     start_time: None,
///     end_time: None,
///     reason: String::new(),
///     status: RecordStatus::Approved,
///     submitted_at: Utc.with_ymd_and_hms(2024, 4, 20, 9, 0, 0).unwrap(),
///     carry_over_until: None,
/// };
///
/// let cycle = resolve_cycle(user.hire_date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
/// let balance = compute_balance(&user, &[leave], &cycle, Decimal::from(120));
///
/// assert_eq!(balance.annual_left, Decimal::from(112));
/// assert_eq!(balance.comp_left, Decimal::from(4));
/// ```
pub fn compute_balance(
    user: &User,
    records: &[Record],
    cycle: &Cycle,
    entitlement_hours: Decimal,
) -> Balance {
    let mut applied = Vec::new();
    let mut warnings = Vec::new();

    if cycle.degenerate {
        warnings.push(LedgerWarning {
            code: WARNING_MISSING_HIRE_DATE.to_string(),
            message: format!(
                "User '{}' has no hire date; entitlement and cycle records are treated as zero",
                user.id
            ),
            record_id: None,
        });
    }

    let counted = records
        .iter()
        .filter(|r| r.user_id == user.id && r.counts_toward_balance());

    for record in counted {
        let Some(attribution) = attribute(record, cycle) else {
            continue;
        };
        let Some(effect) = effect_of(record.category, record.bucket, attribution) else {
            continue;
        };
        let Some(hours) = record.amount.hours() else {
            warnings.push(LedgerWarning {
                code: WARNING_INVALID_AMOUNT.to_string(),
                message: format!(
                    "Amount '{}' on {} record is not a number of hours; counted as 0",
                    record.amount, record.category
                ),
                record_id: Some(record.id.clone()),
            });
            continue;
        };
        if hours.abs() > Amount::MAX_HOURS {
            warnings.push(LedgerWarning {
                code: WARNING_INVALID_AMOUNT.to_string(),
                message: format!(
                    "Amount '{}' on {} record exceeds {} hours; counted as 0",
                    hours,
                    record.category,
                    Amount::MAX_HOURS
                ),
                record_id: Some(record.id.clone()),
            });
            continue;
        }

        applied.push(AppliedEntry {
            record_id: record.id.clone(),
            category: record.category,
            bucket: record.bucket,
            effect,
            delta: signed_delta(effect, hours),
        });
    }

    applied.sort();

    let mut overflowed = |bucket: Bucket, base: Decimal| {
        warnings.push(LedgerWarning {
            code: WARNING_INVALID_AMOUNT.to_string(),
            message: format!("The {} total overflows; records counted as 0", bucket),
            record_id: None,
        });
        base
    };
    let annual_left = bucket_total(entitlement_hours, &applied, &ANNUAL_EFFECTS)
        .unwrap_or_else(|| overflowed(Bucket::Annual, entitlement_hours));
    let comp_left = bucket_total(user.comp_baseline, &applied, &COMP_EFFECTS)
        .unwrap_or_else(|| overflowed(Bucket::Comp, user.comp_baseline));

    warnings.sort_by(|a, b| {
        (&a.record_id, &a.code, &a.message).cmp(&(&b.record_id, &b.code, &b.message))
    });

    Balance {
        user_id: user.id.clone(),
        cycle: *cycle,
        annual_total: entitlement_hours,
        annual_left,
        comp_left,
        applied,
        warnings,
    }
}

/// Resolves the cycle and entitlement on `today` and replays the records.
pub fn balance_for(user: &User, records: &[Record], today: NaiveDate) -> Balance {
    let cycle = resolve_cycle(user.hire_date, today);
    let entitlement = entitlement_hours(user.hire_date, today);
    compute_balance(user, records, &cycle, entitlement)
}
