//! Ledger computations.
//!
//! Everything here is a pure function of its inputs: cycles are resolved
//! from the hire date, entitlement from tenure, and balances are replayed
//! from a snapshot of records. Persistence and authorization live behind
//! the traits in [`crate::store`].

mod balance;
mod calendar;
mod cycle;
mod duration;
mod entitlement;
mod lifecycle;
mod settlement;
mod summary;

pub use balance::{balance_for, compute_balance};
pub use calendar::{add_years, anniversary_in, clamped_date, days_in_month};
pub use cycle::{next_cycle, resolve_cycle};
pub use duration::{FULL_DAY_END, FULL_DAY_START, hours_between};
pub use entitlement::{
    DAYS_PER_YEAR, HOURS_PER_DAY, MAX_ENTITLEMENT_DAYS, entitlement_days,
    entitlement_days_for_tenure, entitlement_hours, tenure_years,
};
pub use lifecycle::{
    RequestDraft, ReviewDecision, ensure_admin, new_record_id, new_request, new_roster_entry,
    review,
};
pub use settlement::{
    AuthorizationGrant, SettlementAction, SettlementCommand, SettlementOutcome, authorize,
    cash_out, cash_value, defer, hourly_rate,
};
pub use summary::{LedgerSummary, SettlementCandidate, entries_on, settlement_candidates, summarize};
