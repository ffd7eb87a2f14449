//! Actual/365 Fixed day count convention.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// Actual/365 Fixed day count convention.
///
/// The day count is the actual number of days between dates.
/// The year basis is always 365 days (ignoring leap years).
///
/// # Usage
///
/// - Curve time axis in the ISDA standard model (both yield and credit)
/// - Sterling interest rate swaps (fixed leg)
///
/// # Formula
///
/// $$\text{Year Fraction} = \frac{\text{Actual Days}}{365}$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act365Fixed;

impl DayCount for Act365Fixed {
    fn name(&self) -> &'static str {
        "ACT/365F"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        let days = start.days_between(&end);
        Decimal::from(days) / Decimal::from(365)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_act365_basic() {
        let dc = Act365Fixed;
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let end = Date::from_ymd(2026, 1, 1).unwrap();

        assert_eq!(dc.day_count(start, end), 365);
        assert_eq!(dc.year_fraction(start, end), Decimal::ONE);
    }

    #[test]
    fn test_act365_leap_year_ignored() {
        let dc = Act365Fixed;
        let start = Date::from_ymd(2024, 1, 1).unwrap();
        let end = Date::from_ymd(2025, 1, 1).unwrap();

        // 2024 is a leap year: 366 actual days over a fixed 365 basis
        assert_eq!(dc.day_count(start, end), 366);
        assert_eq!(dc.year_fraction(start, end), dec!(366) / dec!(365));
    }
}
