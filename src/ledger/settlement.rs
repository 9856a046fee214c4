//! Cycle-end settlement of unused hours.
//!
//! A settlement either defers hours into the next cycle or cashes them out
//! at the user's hourly rate. Deferral is privileged: it needs an
//! [`AuthorizationGrant`], which only [`authorize`] can produce. Both paths
//! emit exactly one approved record and never touch a balance directly.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Amount, Bucket, Category, Cycle, Record, RecordStatus, User};
use crate::store::Authorizer;

use super::calendar::add_years;
use super::entitlement::HOURS_PER_DAY;
use super::lifecycle::new_record_id;

/// Days in the month used to derive a daily rate from a monthly salary.
const SALARY_DAYS_PER_MONTH: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// What to do with unused hours at cycle end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementAction {
    /// Carry the hours into the next cycle.
    Defer,
    /// Pay the hours out.
    CashOut,
}

/// A request to settle hours of one bucket for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementCommand {
    /// Defer or cash out.
    pub action: SettlementAction,
    /// The user whose hours are settled.
    pub user_id: String,
    /// The bucket to settle.
    #[serde(rename = "type")]
    pub bucket: Bucket,
    /// Hours to settle. Must be positive.
    pub amount: Decimal,
}

/// Proof that a privileged action was authorized.
///
/// Cannot be built outside this module; [`authorize`] is the only way to
/// get one.
#[derive(Debug)]
pub struct AuthorizationGrant {
    _private: (),
}

/// The record a settlement produced, and its cash value when paid out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementOutcome {
    /// The emitted record, ready to persist.
    pub record: Record,
    /// Hourly rate used for a cash-out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<Decimal>,
    /// Whole currency units paid for a cash-out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash_value: Option<Decimal>,
}

/// Verifies a secret and issues a grant on success.
///
/// # Errors
///
/// - `AuthorizationFailed` if the authorizer rejects the secret
/// - any error the authorizer itself raises, unchanged
pub async fn authorize(
    authorizer: &dyn Authorizer,
    secret: &str,
) -> LedgerResult<AuthorizationGrant> {
    if authorizer.verify(secret).await? {
        Ok(AuthorizationGrant { _private: () })
    } else {
        Err(LedgerError::AuthorizationFailed)
    }
}

/// Hourly rate from a monthly salary: `salary / 30 / 8`.
pub fn hourly_rate(user: &User) -> Decimal {
    user.monthly_salary() / SALARY_DAYS_PER_MONTH / HOURS_PER_DAY
}

/// Cash value of `hours`, rounded half away from zero to whole units.
/// `None` if the product does not fit in a `Decimal`.
///
/// # Examples
///
/// ```
/// use leave_ledger::ledger::cash_value;
/// use rust_decimal::Decimal;
///
/// assert_eq!(cash_value(Decimal::from(125), Decimal::from(40)), Some(Decimal::from(5000)));
/// assert_eq!(cash_value(Decimal::from(10), Decimal::new(25, 2)), Some(Decimal::from(3)));
/// assert_eq!(cash_value(Decimal::MAX, Decimal::from(2)), None);
/// ```
pub fn cash_value(hourly_rate: Decimal, hours: Decimal) -> Option<Decimal> {
    hourly_rate
        .checked_mul(hours)
        .map(|value| value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
}

fn validate(user: &User, bucket: Bucket, amount: Decimal, cycle: &Cycle) -> LedgerResult<()> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::invalid_amount(amount, "must be greater than zero"));
    }
    if amount > Amount::MAX_HOURS {
        return Err(LedgerError::invalid_amount(
            amount,
            format!("must not exceed {} hours", Amount::MAX_HOURS),
        ));
    }
    if cycle.degenerate {
        return Err(LedgerError::MissingHireDate {
            user_id: user.id.clone(),
        });
    }
    if bucket == Bucket::Duty {
        return Err(LedgerError::InvalidRecord {
            message: "duty entries have no balance to settle".to_string(),
        });
    }
    Ok(())
}

fn settlement_record(
    user: &User,
    category: Category,
    bucket: Bucket,
    amount: Decimal,
    cycle: &Cycle,
    reason: String,
    submitted_at: DateTime<Utc>,
) -> Record {
    Record {
        id: new_record_id(),
        user_id: user.id.clone(),
        user_name: user.name.clone(),
        category,
        bucket,
        amount: Amount::Hours(amount),
        date: cycle.end,
        start_time: None,
        end_time: None,
        reason,
        status: RecordStatus::Approved,
        submitted_at,
        carry_over_until: None,
    }
}

/// Carries `amount` hours past the end of `cycle`.
///
/// Emits an approved adjustment dated at the cycle end and valid for one
/// year after it. The balance replay moves the hours out of the closing
/// cycle and into the next one.
pub fn defer(
    user: &User,
    bucket: Bucket,
    amount: Decimal,
    cycle: &Cycle,
    _grant: &AuthorizationGrant,
    submitted_at: DateTime<Utc>,
) -> LedgerResult<SettlementOutcome> {
    validate(user, bucket, amount, cycle)?;

    let valid_until = add_years(cycle.end, 1).ok_or_else(|| LedgerError::InvalidRecord {
        message: format!("cycle end {} cannot be carried forward", cycle.end),
    })?;

    let reason = format!(
        "Deferred {}h of {} hours from the cycle ending {}, valid until {}",
        amount.normalize(),
        bucket,
        cycle.end,
        valid_until
    );
    let mut record = settlement_record(
        user,
        Category::Adjustment,
        bucket,
        amount,
        cycle,
        reason,
        submitted_at,
    );
    record.carry_over_until = Some(valid_until);

    Ok(SettlementOutcome {
        record,
        hourly_rate: None,
        cash_value: None,
    })
}

/// Pays out `amount` hours at the user's hourly rate.
///
/// # Examples
///
/// ```
/// use leave_ledger::ledger::{cash_out, resolve_cycle};
/// use leave_ledger::models::{Bucket, Role, User};
/// use chrono::{NaiveDate, Utc};
/// use rust_decimal::Decimal;
///
/// let user = User {
///     id: "u_001".to_string(),
///     name: "Chen".to_string(),
///     role: Role::Member,
///     hire_date: NaiveDate::from_ymd_opt(2019, 3, 10),
///     comp_baseline: Decimal::ZERO,
///     salary: Some(Decimal::from(30000)),
/// };
/// let cycle = resolve_cycle(user.hire_date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
///
/// let outcome = cash_out(&user, Bucket::Annual, Decimal::from(40), &cycle, Utc::now()).unwrap();
/// assert_eq!(outcome.cash_value, Some(Decimal::from(5000)));
/// ```
pub fn cash_out(
    user: &User,
    bucket: Bucket,
    amount: Decimal,
    cycle: &Cycle,
    submitted_at: DateTime<Utc>,
) -> LedgerResult<SettlementOutcome> {
    validate(user, bucket, amount, cycle)?;

    let rate = hourly_rate(user);
    let value = cash_value(rate, amount)
        .ok_or_else(|| LedgerError::invalid_amount(amount, "cash value overflows"))?;
    let reason = format!(
        "Cashed out {}h of {} hours at {}/h for {}",
        amount.normalize(),
        bucket,
        rate.round_dp(2).normalize(),
        value
    );

    Ok(SettlementOutcome {
        record: settlement_record(
            user,
            Category::Settlement,
            bucket,
            -amount,
            cycle,
            reason,
            submitted_at,
        ),
        hourly_rate: Some(rate),
        cash_value: Some(value),
    })
}

impl SettlementCommand {
    /// Runs the command against a resolved user and cycle.
    ///
    /// # Errors
    ///
    /// `AuthorizationFailed` when a deferral comes without a grant, plus
    /// every refusal of [`defer`] and [`cash_out`].
    pub fn execute(
        &self,
        user: &User,
        cycle: &Cycle,
        grant: Option<&AuthorizationGrant>,
        submitted_at: DateTime<Utc>,
    ) -> LedgerResult<SettlementOutcome> {
        match self.action {
            SettlementAction::Defer => {
                let grant = grant.ok_or(LedgerError::AuthorizationFailed)?;
                defer(user, self.bucket, self.amount, cycle, grant, submitted_at)
            }
            SettlementAction::CashOut => {
                cash_out(user, self.bucket, self.amount, cycle, submitted_at)
            }
        }
    }
}
