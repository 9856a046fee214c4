//! Whole-year calendar arithmetic.
//!
//! Cycle boundaries must not depend on a platform date library's rollover
//! behaviour, so the one rule used everywhere is spelled out here:
//!
//! When a date is moved to a year whose target month is shorter than the
//! source day (only 29 February into a non-leap year), the day is clamped to
//! the last day of that month. 29 Feb 2024 + 1 year is 28 Feb 2025.
//!
//! Anniversaries are always computed from the hire date itself, never by
//! chaining additions onto a previous anniversary, so a 29 February hire
//! returns to 29 February in every leap year.

use chrono::{Datelike, NaiveDate};

/// Number of days in a month of a given year.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(28, |last| last.day())
}

/// The date with `month`/`day` in `year`, clamping the day to the month length.
///
/// Returns `None` only when `year` is outside chrono's representable range.
pub fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let day = day.min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Moves a date by a whole number of years (negative moves backwards).
///
/// # Examples
///
/// ```
/// use leave_ledger::ledger::add_years;
/// use chrono::NaiveDate;
///
/// let leap = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
/// assert_eq!(add_years(leap, 1), NaiveDate::from_ymd_opt(2025, 2, 28));
/// assert_eq!(add_years(leap, 4), NaiveDate::from_ymd_opt(2028, 2, 29));
/// ```
pub fn add_years(date: NaiveDate, years: i32) -> Option<NaiveDate> {
    clamped_date(date.year() + years, date.month(), date.day())
}

/// The anniversary of `anchor` that falls in `year`.
pub fn anniversary_in(anchor: NaiveDate, year: i32) -> Option<NaiveDate> {
    clamped_date(year, anchor.month(), anchor.day())
}
