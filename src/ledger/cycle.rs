//! Cycle resolution.
//!
//! This module resolves the rolling 12-month entitlement cycle that is in
//! effect on a given day, anchored to the anniversary of the hire date.

use chrono::{Datelike, NaiveDate};

use crate::models::Cycle;

use super::calendar::anniversary_in;

/// Resolves the cycle in effect on `today`.
///
/// The cycle starts on this year's anniversary of the hire date, or last
/// year's when this year's anniversary is still ahead. It ends the day before
/// the next anniversary. Anniversaries follow the clamping rule in
/// [`crate::ledger::add_years`].
///
/// Without a hire date the result is a degenerate window anchored at `today`
/// that contains no dates.
///
/// # Examples
///
/// ```
/// use leave_ledger::ledger::resolve_cycle;
/// use chrono::NaiveDate;
///
/// let hire = NaiveDate::from_ymd_opt(2019, 3, 10);
/// let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let cycle = resolve_cycle(hire, today);
///
/// assert_eq!(cycle.start, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
/// assert_eq!(cycle.end, NaiveDate::from_ymd_opt(2025, 3, 9).unwrap());
/// assert_eq!(cycle.next_start, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
/// ```
pub fn resolve_cycle(hire_date: Option<NaiveDate>, today: NaiveDate) -> Cycle {
    let Some(hire) = hire_date else {
        return Cycle::degenerate(today);
    };

    let resolved = anniversary_in(hire, today.year()).and_then(|this_year| {
        let start = if today < this_year {
            anniversary_in(hire, today.year() - 1)?
        } else {
            this_year
        };
        let next_start = anniversary_in(hire, start.year() + 1)?;
        let end = next_start.pred_opt()?;
        Some(Cycle {
            start,
            end,
            next_start,
            degenerate: false,
        })
    });

    resolved.unwrap_or_else(|| Cycle::degenerate(today))
}

/// The cycle that follows `cycle` for the same hire date.
pub fn next_cycle(hire_date: Option<NaiveDate>, cycle: &Cycle) -> Cycle {
    if cycle.degenerate {
        return *cycle;
    }
    resolve_cycle(hire_date, cycle.next_start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::calendar::add_years;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_after_anniversary_starts_this_year() {
        let cycle = resolve_cycle(Some(date(2019, 3, 10)), date(2024, 6, 1));
        assert_eq!(cycle.start, date(2024, 3, 10));
        assert_eq!(cycle.end, date(2025, 3, 9));
        assert!(!cycle.degenerate);
    }

    #[test]
    fn test_before_anniversary_starts_last_year() {
        let cycle = resolve_cycle(Some(date(2019, 9, 15)), date(2024, 6, 1));
        assert_eq!(cycle.start, date(2023, 9, 15));
        assert_eq!(cycle.end, date(2024, 9, 14));
        assert_eq!(cycle.next_start, date(2024, 9, 15));
    }

    #[test]
    fn test_on_anniversary_starts_new_cycle() {
        let cycle = resolve_cycle(Some(date(2019, 6, 1)), date(2024, 6, 1));
        assert_eq!(cycle.start, date(2024, 6, 1));
    }

    #[test]
    fn test_day_before_anniversary_is_last_day() {
        let cycle = resolve_cycle(Some(date(2019, 6, 1)), date(2024, 5, 31));
        assert_eq!(cycle.start, date(2023, 6, 1));
        assert_eq!(cycle.end, date(2024, 5, 31));
    }

    #[test]
    fn test_missing_hire_date_is_degenerate() {
        let today = date(2024, 6, 1);
        let cycle = resolve_cycle(None, today);
        assert!(cycle.degenerate);
        assert_eq!(cycle.start, today);
        assert_eq!(cycle.end, today);
        assert_eq!(cycle.next_start, today);
    }

    #[test]
    fn test_leap_day_hire_in_common_year() {
        let cycle = resolve_cycle(Some(date(2020, 2, 29)), date(2027, 6, 1));
        assert_eq!(cycle.start, date(2027, 2, 28));
        assert_eq!(cycle.next_start, date(2028, 2, 29));
        assert_eq!(cycle.end, date(2028, 2, 28));
    }

    #[test]
    fn test_leap_day_cycles_tile_without_gap() {
        let hire = Some(date(2020, 2, 29));
        let first = resolve_cycle(hire, date(2027, 6, 1));
        let second = next_cycle(hire, &first);
        assert_eq!(second.start, first.next_start);
        assert_eq!(second.start, date(2028, 2, 29));
        assert_eq!(second.end, date(2029, 2, 27));
    }

    #[test]
    fn test_next_cycle_of_degenerate_is_itself() {
        let cycle = Cycle::degenerate(date(2024, 6, 1));
        assert_eq!(next_cycle(None, &cycle), cycle);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Any cycle spans one calendar year less a day and contains today.
        #[test]
        fn prop_cycle_contains_today_and_spans_a_year(
            hire_offset in 0i64..20_000,
            tenure_days in 0i64..15_000,
        ) {
            let hire = date(1970, 1, 1) + chrono::Duration::days(hire_offset);
            let today = hire + chrono::Duration::days(tenure_days);
            let cycle = resolve_cycle(Some(hire), today);

            prop_assert!(!cycle.degenerate);
            prop_assert!(cycle.start <= today && today <= cycle.end);
            prop_assert_eq!(cycle.end.succ_opt(), Some(cycle.next_start));

            let year_later = add_years(cycle.start, 1).unwrap();
            let drift = (cycle.next_start - year_later).num_days();
            // Only a clamped 29 February start moves the boundary, by one day.
            prop_assert!((0..=1).contains(&drift));
            if drift == 1 {
                prop_assert_eq!(hire.month(), 2);
                prop_assert_eq!(hire.day(), 29);
            }
        }
    }
}
