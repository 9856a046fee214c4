//! Entitlement cycle window.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A 12-month accounting window anchored to a hire-date anniversary.
///
/// Both `start` and `end` are inclusive. `next_start` is the day after `end`.
/// A degenerate cycle exists only for users without a hire date and contains
/// no dates at all.
///
/// # Example
///
/// ```
/// use leave_ledger::models::Cycle;
/// use chrono::NaiveDate;
///
/// let cycle = Cycle {
///     start: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
///     end: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
///     next_start: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
///     degenerate: false,
/// };
/// assert!(cycle.contains(NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()));
/// assert!(!cycle.contains(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    /// First day of the cycle (inclusive).
    pub start: NaiveDate,
    /// Last day of the cycle (inclusive).
    pub end: NaiveDate,
    /// First day of the following cycle.
    pub next_start: NaiveDate,
    /// True when no hire date was available to anchor the window.
    #[serde(default)]
    pub degenerate: bool,
}

impl Cycle {
    /// A window anchored at `today` that contains nothing.
    pub fn degenerate(today: NaiveDate) -> Self {
        Self {
            start: today,
            end: today,
            next_start: today,
            degenerate: true,
        }
    }

    /// Checks if a date falls within the cycle, inclusive of both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        !self.degenerate && date >= self.start && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_contains_is_inclusive() {
        let cycle = Cycle {
            start: date(2024, 3, 10),
            end: date(2025, 3, 9),
            next_start: date(2025, 3, 10),
            degenerate: false,
        };
        assert!(cycle.contains(date(2024, 3, 10)));
        assert!(cycle.contains(date(2024, 12, 31)));
        assert!(cycle.contains(date(2025, 3, 9)));
        assert!(!cycle.contains(date(2024, 3, 9)));
        assert!(!cycle.contains(date(2025, 3, 10)));
    }

    #[test]
    fn test_degenerate_cycle_contains_nothing() {
        let today = date(2024, 6, 1);
        let cycle = Cycle::degenerate(today);
        assert!(cycle.degenerate);
        assert_eq!(cycle.start, today);
        assert!(!cycle.contains(today));
    }
}
