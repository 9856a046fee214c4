//! Ledger record model and its tag types.
//!
//! A [`Record`] is a single ledger event: a leave or overtime request, a
//! rostered duty, or a system-generated adjustment or settlement. Category
//! and bucket are closed enums so balance aggregation can match on them
//! exhaustively.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// What kind of event a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Time off drawn from a bucket.
    Leave,
    /// Extra hours worked, credited as comp time.
    Overtime,
    /// A scheduled duty entry. Display only.
    Roster,
    /// A system-generated correction, e.g. a deferral carry-over.
    Adjustment,
    /// A cash-out of unused hours.
    Settlement,
}

/// The balance bucket a record affects (`type` on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    /// Annual-leave entitlement.
    Annual,
    /// Compensatory time.
    Comp,
    /// Duty entries; never part of a balance.
    Duty,
}

/// Review status of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    /// Awaiting admin review.
    Pending,
    /// Counted toward balances. Terminal.
    Approved,
    /// Ignored by balances. Terminal.
    Rejected,
}

impl RecordStatus {
    /// Returns true once no further transition is possible.
    pub fn is_terminal(self) -> bool {
        !matches!(self, RecordStatus::Pending)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Leave => "leave",
            Category::Overtime => "overtime",
            Category::Roster => "roster",
            Category::Adjustment => "adjustment",
            Category::Settlement => "settlement",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Bucket::Annual => "annual",
            Bucket::Comp => "comp",
            Bucket::Duty => "duty",
        };
        f.write_str(name)
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordStatus::Pending => "pending",
            RecordStatus::Approved => "approved",
            RecordStatus::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

/// The hours carried by a record, as received from the store.
///
/// Stores are not trusted to hold clean numbers, so deserialization never
/// fails on an amount. Anything that is not a finite decimal becomes
/// [`Amount::Invalid`] (or [`Amount::Missing`] when absent or null), which the
/// ledger counts as zero and reports as a warning.
///
/// # Example
///
/// ```
/// use leave_ledger::models::Amount;
/// use rust_decimal::Decimal;
///
/// let ok: Amount = serde_json::from_str("\"7.5\"").unwrap();
/// assert_eq!(ok.hours(), Some(Decimal::new(75, 1)));
///
/// let bad: Amount = serde_json::from_str("\"abc\"").unwrap();
/// assert_eq!(bad, Amount::Invalid("abc".to_string()));
/// assert_eq!(bad.hours_or_zero(), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Amount {
    /// A usable number of hours (sign depends on category).
    Hours(Decimal),
    /// No amount was stored.
    #[default]
    Missing,
    /// The stored value, verbatim, that could not be read as hours.
    Invalid(String),
}

impl Amount {
    /// Largest number of hours a single record may move, in either direction.
    /// Larger amounts are refused on entry and counted as zero on replay.
    pub const MAX_HOURS: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

    /// The hours, if the amount is usable.
    pub fn hours(&self) -> Option<Decimal> {
        match self {
            Amount::Hours(hours) => Some(*hours),
            Amount::Missing | Amount::Invalid(_) => None,
        }
    }

    /// The hours, with unusable amounts counted as zero.
    pub fn hours_or_zero(&self) -> Decimal {
        self.hours().unwrap_or(Decimal::ZERO)
    }

    /// Parses a textual amount leniently (surrounding whitespace, exponent form).
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Amount::Missing;
        }
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map(Amount::Hours)
            .unwrap_or_else(|_| Amount::Invalid(raw.to_string()))
    }
}

impl From<Decimal> for Amount {
    fn from(hours: Decimal) -> Self {
        Amount::Hours(hours)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Hours(hours) => write!(f, "{}", hours),
            Amount::Missing => f.write_str("<missing>"),
            Amount::Invalid(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Amount::Hours(hours) => Serialize::serialize(hours, serializer),
            Amount::Missing => serializer.serialize_none(),
            Amount::Invalid(raw) => serializer.serialize_str(raw),
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::Null => Amount::Missing,
            serde_json::Value::Number(number) => Amount::parse(&number.to_string()),
            serde_json::Value::String(text) => Amount::parse(&text),
            other => Amount::Invalid(other.to_string()),
        })
    }
}

/// A single ledger event.
///
/// # Example
///
/// ```
/// use leave_ledger::models::{Amount, Bucket, Category, Record, RecordStatus};
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use rust_decimal::Decimal;
///
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
///     reason: "Family trip".to_string(),
///     status: RecordStatus::Approved,
///     submitted_at: Utc.with_ymd_and_hms(2024, 5, 20, 9, 0, 0).unwrap(),
///     carry_over_until: None,
/// };
/// assert!(record.counts_toward_balance());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier for the record.
    pub id: String,
    /// The owning user.
    pub user_id: String,
    /// The owning user's display name at submission time.
    pub user_name: String,
    /// What kind of event this is.
    pub category: Category,
    /// The bucket this record affects.
    #[serde(rename = "type")]
    pub bucket: Bucket,
    /// Hours; signed or unsigned depending on category.
    #[serde(default)]
    pub amount: Amount,
    /// The calendar date the event is attributed to.
    pub date: NaiveDate,
    /// Clock start, when the request covered part of a day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    /// Clock end, when the request covered part of a day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    /// Free-text reason or system memo.
    #[serde(default)]
    pub reason: String,
    /// Review status.
    pub status: RecordStatus,
    /// When the record was created.
    pub submitted_at: DateTime<Utc>,
    /// Last day deferred hours stay usable. Set only on deferral carry-overs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carry_over_until: Option<NaiveDate>,
}

impl Record {
    /// Returns true if this record participates in balance arithmetic.
    pub fn counts_toward_balance(&self) -> bool {
        self.status == RecordStatus::Approved && self.category != Category::Roster
    }

    /// Returns true if this is an adjustment carrying deferred hours forward.
    pub fn is_carry_over(&self) -> bool {
        self.category == Category::Adjustment && self.carry_over_until.is_some()
    }
}
