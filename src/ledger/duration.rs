//! Hours from a clock range.

use chrono::NaiveTime;
use rust_decimal::Decimal;

/// Spans longer than this include an unpaid meal break.
const MEAL_BREAK_THRESHOLD_HOURS: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

const MEAL_BREAK_HOURS: Decimal = Decimal::ONE;

const SECONDS_PER_HOUR: Decimal = Decimal::from_parts(3600, 0, 0, false, 0);

/// Start of a standard working day, 08:30.
pub const FULL_DAY_START: NaiveTime = clock(8, 30);

/// End of a standard working day, 17:30.
pub const FULL_DAY_END: NaiveTime = clock(17, 30);

/// Only used for constants, so an out-of-range time fails the build.
const fn clock(hour: u32, min: u32) -> NaiveTime {
    match NaiveTime::from_hms_opt(hour, min, 0) {
        Some(time) => time,
        None => panic!("clock time out of range"),
    }
}

/// Worked hours between two clock times.
///
/// An end at or before the start yields zero. Spans over five hours lose one
/// hour for the meal break.
///
/// # Examples
///
/// ```
/// use leave_ledger::ledger::{FULL_DAY_END, FULL_DAY_START, hours_between};
/// use rust_decimal::Decimal;
///
/// assert_eq!(hours_between(FULL_DAY_START, FULL_DAY_END), Decimal::from(8));
/// ```
pub fn hours_between(start: NaiveTime, end: NaiveTime) -> Decimal {
    if end <= start {
        return Decimal::ZERO;
    }

    let span = Decimal::from((end - start).num_seconds()) / SECONDS_PER_HOUR;
    if span > MEAL_BREAK_THRESHOLD_HOURS {
        span - MEAL_BREAK_HOURS
    } else {
        span
    }
}
