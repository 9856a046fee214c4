//! Annual-leave entitlement by tenure.
//!
//! The tier table is fixed policy. Tenure is measured in fractional years of
//! 365.25 days, and above ten years one extra day is granted per completed
//! year up to a cap of 30 days.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Working hours in one leave day.
pub const HOURS_PER_DAY: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Days per year used to turn elapsed days into tenure.
pub const DAYS_PER_YEAR: Decimal = Decimal::from_parts(36525, 0, 0, false, 2);

/// Upper bound on annual entitlement in days.
pub const MAX_ENTITLEMENT_DAYS: u32 = 30;

/// Entitlement from ten years of tenure, before per-year increments.
const TEN_YEAR_BASE_DAYS: u32 = 16;

const TEN_YEARS: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// `(upper bound of tenure in years, exclusive; entitlement in days)`.
const TENURE_TIERS: [(Decimal, u32); 6] = [
    (Decimal::from_parts(5, 0, 0, false, 1), 0),
    (Decimal::from_parts(1, 0, 0, false, 0), 3),
    (Decimal::from_parts(2, 0, 0, false, 0), 7),
    (Decimal::from_parts(3, 0, 0, false, 0), 10),
    (Decimal::from_parts(5, 0, 0, false, 0), 14),
    (TEN_YEARS, 15),
];

/// Elapsed tenure in fractional years.
///
/// A hire date after `today` yields zero tenure.
///
/// # Examples
///
/// ```
/// use leave_ledger::ledger::tenure_years;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let hire = NaiveDate::from_ymd_opt(2019, 3, 10).unwrap();
/// let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let tenure = tenure_years(hire, today);
///
/// assert!(tenure > Decimal::new(522, 2) && tenure < Decimal::new(523, 2));
/// ```
pub fn tenure_years(hire_date: NaiveDate, today: NaiveDate) -> Decimal {
    let elapsed_days = (today - hire_date).num_days().max(0);
    Decimal::from(elapsed_days) / DAYS_PER_YEAR
}

/// Looks up the entitlement tier for a tenure in years.
///
/// | tenure (years) | days |
/// |---|---|
/// | < 0.5 | 0 |
/// | [0.5, 1) | 3 |
/// | [1, 2) | 7 |
/// | [2, 3) | 10 |
/// | [3, 5) | 14 |
/// | [5, 10) | 15 |
/// | ≥ 10 | min(30, 16 + floor(tenure − 10)) |
///
/// # Examples
///
/// ```
/// use leave_ledger::ledger::entitlement_days_for_tenure;
/// use rust_decimal::Decimal;
///
/// assert_eq!(entitlement_days_for_tenure(Decimal::new(109, 1)), 16);
/// assert_eq!(entitlement_days_for_tenure(Decimal::from(11)), 17);
/// assert_eq!(entitlement_days_for_tenure(Decimal::from(40)), 30);
/// ```
pub fn entitlement_days_for_tenure(tenure: Decimal) -> u32 {
    if let Some((_, days)) = TENURE_TIERS.iter().find(|(bound, _)| tenure < *bound) {
        return *days;
    }

    let cap_extra = Decimal::from(MAX_ENTITLEMENT_DAYS - TEN_YEAR_BASE_DAYS);
    let extra = (tenure - TEN_YEARS).floor().min(cap_extra);
    let extra = extra.to_u32().unwrap_or(0);
    (TEN_YEAR_BASE_DAYS + extra).min(MAX_ENTITLEMENT_DAYS)
}

/// Entitlement in days on `today`. No hire date means no entitlement.
pub fn entitlement_days(hire_date: Option<NaiveDate>, today: NaiveDate) -> u32 {
    hire_date.map_or(0, |hire| {
        entitlement_days_for_tenure(tenure_years(hire, today))
    })
}

/// Entitlement in hours on `today`.
///
/// # Examples
///
/// ```
/// use leave_ledger::ledger::entitlement_hours;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let hire = NaiveDate::from_ymd_opt(2019, 3, 10);
/// let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// assert_eq!(entitlement_hours(hire, today), Decimal::from(120));
/// assert_eq!(entitlement_hours(None, today), Decimal::ZERO);
/// ```
pub fn entitlement_hours(hire_date: Option<NaiveDate>, today: NaiveDate) -> Decimal {
    Decimal::from(entitlement_days(hire_date, today)) * HOURS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_tier_boundaries() {
        let cases = [
            ("0", 0),
            ("0.49", 0),
            ("0.5", 3),
            ("0.99", 3),
            ("1", 7),
            ("1.99", 7),
            ("2", 10),
            ("2.99", 10),
            ("3", 14),
            ("4.99", 14),
            ("5", 15),
            ("9.99", 15),
        ];
        for (tenure, days) in cases {
            assert_eq!(
                entitlement_days_for_tenure(dec(tenure)),
                days,
                "tenure {}",
                tenure
            );
        }
    }

    #[test]
    fn test_ten_years_and_beyond_use_floor() {
        assert_eq!(entitlement_days_for_tenure(dec("10.0")), 16);
        assert_eq!(entitlement_days_for_tenure(dec("10.9")), 16);
        assert_eq!(entitlement_days_for_tenure(dec("11.0")), 17);
        assert_eq!(entitlement_days_for_tenure(dec("23.5")), 29);
    }

    #[test]
    fn test_entitlement_is_capped_at_thirty_days() {
        assert_eq!(entitlement_days_for_tenure(dec("24")), 30);
        assert_eq!(entitlement_days_for_tenure(dec("25")), 30);
        assert_eq!(entitlement_days_for_tenure(dec("80")), 30);
    }

    #[test]
    fn test_scenario_five_years_in() {
        let hire = date(2019, 3, 10);
        let today = date(2024, 6, 1);
        assert_eq!((today - hire).num_days(), 1910);
        assert_eq!(entitlement_days(Some(hire), today), 15);
        assert_eq!(entitlement_hours(Some(hire), today), dec("120"));
    }

    #[test]
    fn test_tenure_uses_quarter_day_years() {
        let hire = date(2014, 1, 1);
        // 3652 days is just short of 10 * 365.25.
        assert_eq!(
            entitlement_days(Some(hire), hire + chrono::Duration::days(3652)),
            15
        );
        assert_eq!(
            entitlement_days(Some(hire), hire + chrono::Duration::days(3653)),
            16
        );
    }

    #[test]
    fn test_missing_hire_date_is_zero() {
        assert_eq!(entitlement_days(None, date(2024, 6, 1)), 0);
        assert_eq!(entitlement_hours(None, date(2024, 6, 1)), Decimal::ZERO);
    }

    #[test]
    fn test_future_hire_date_is_zero_tenure() {
        let hire = date(2030, 1, 1);
        assert_eq!(tenure_years(hire, date(2024, 6, 1)), Decimal::ZERO);
        assert_eq!(entitlement_days(Some(hire), date(2024, 6, 1)), 0);
    }

    #[test]
    fn test_half_year_threshold() {
        let hire = date(2024, 1, 1);
        // 182 days < 182.625 days, 183 days crosses half a year.
        assert_eq!(
            entitlement_days(Some(hire), hire + chrono::Duration::days(182)),
            0
        );
        assert_eq!(
            entitlement_days(Some(hire), hire + chrono::Duration::days(183)),
            3
        );
    }
}
