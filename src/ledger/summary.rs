//! Admin overview: pending work, outstanding liability and the day calendar.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Category, LedgerSnapshot, Record, RecordStatus, User};

use super::balance::balance_for;
use super::settlement::SettlementAction;

/// Totals across the whole ledger on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    /// The day the summary was computed for.
    pub as_of: NaiveDate,
    /// Records awaiting review.
    pub pending_count: usize,
    /// Unused annual hours across all members.
    pub annual_liability: Decimal,
    /// Unused comp hours across all members.
    pub comp_liability: Decimal,
    /// Names of members on approved leave that day, sorted.
    pub on_leave_today: Vec<String>,
}

/// A member's cycle-end position and the settlements open to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementCandidate {
    /// The member.
    pub user_id: String,
    /// Display name.
    pub user_name: String,
    /// Last day of the current cycle.
    pub cycle_end: NaiveDate,
    /// Annual hours left.
    pub annual_left: Decimal,
    /// Comp hours left.
    pub comp_left: Decimal,
    /// Settlements available for the annual bucket.
    pub annual_actions: Vec<SettlementAction>,
    /// Settlements available for the comp bucket.
    pub comp_actions: Vec<SettlementAction>,
}

fn members(snapshot: &LedgerSnapshot) -> impl Iterator<Item = &User> {
    snapshot.users.iter().filter(|u| !u.is_admin())
}

/// Summarizes the ledger on `today`.
///
/// Liabilities sum every member's current balance, negative ones included,
/// saturating at the `Decimal` bounds. Admin accounts are left out.
pub fn summarize(snapshot: &LedgerSnapshot, today: NaiveDate) -> LedgerSummary {
    let pending_count = snapshot
        .records
        .iter()
        .filter(|r| r.status == RecordStatus::Pending)
        .count();

    let (annual_liability, comp_liability) = members(snapshot)
        .map(|user| balance_for(user, &snapshot.records, today))
        .fold((Decimal::ZERO, Decimal::ZERO), |(annual, comp), balance| {
            (
                annual.saturating_add(balance.annual_left),
                comp.saturating_add(balance.comp_left),
            )
        });

    let mut on_leave_today: Vec<String> = snapshot
        .records
        .iter()
        .filter(|r| {
            r.date == today && r.category == Category::Leave && r.status == RecordStatus::Approved
        })
        .map(|r| r.user_name.clone())
        .collect();
    on_leave_today.sort();
    on_leave_today.dedup();

    LedgerSummary {
        as_of: today,
        pending_count,
        annual_liability,
        comp_liability,
        on_leave_today,
    }
}

/// Calendar entries for one day: approved records and roster duty.
pub fn entries_on(records: &[Record], date: NaiveDate) -> Vec<&Record> {
    let mut entries: Vec<&Record> = records
        .iter()
        .filter(|r| r.date == date)
        .filter(|r| r.status == RecordStatus::Approved || r.category == Category::Roster)
        .collect();
    entries.sort_by(|a, b| (&a.user_name, &a.id).cmp(&(&b.user_name, &b.id)));
    entries
}

fn actions_for(left: Decimal, offered: &[SettlementAction]) -> Vec<SettlementAction> {
    if left > Decimal::ZERO {
        offered.to_vec()
    } else {
        Vec::new()
    }
}

/// Members with a resolvable cycle and the settlements each may take.
///
/// Annual hours may be deferred or cashed out; comp hours may only be
/// cashed out. Nothing is offered for an empty or negative bucket.
pub fn settlement_candidates(
    snapshot: &LedgerSnapshot,
    today: NaiveDate,
) -> Vec<SettlementCandidate> {
    members(snapshot)
        .map(|user| (user, balance_for(user, &snapshot.records, today)))
        .filter(|(_, balance)| !balance.cycle.degenerate)
        .map(|(user, balance)| SettlementCandidate {
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            cycle_end: balance.cycle.end,
            annual_left: balance.annual_left,
            comp_left: balance.comp_left,
            annual_actions: actions_for(
                balance.annual_left,
                &[SettlementAction::Defer, SettlementAction::CashOut],
            ),
            comp_actions: actions_for(balance.comp_left, &[SettlementAction::CashOut]),
        })
        .collect()
}
