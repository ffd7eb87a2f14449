//! 30E/360 day count convention.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// 30E/360 day count convention (Eurobond Basis).
///
/// Assumes 30-day months and a 360-day year.
///
/// # Usage
///
/// - Swap fixed legs
/// - Eurobonds and some European corporate bonds
///
/// # Rules
///
/// 1. If D1 is 31, change D1 to 30
/// 2. If D2 is 31, change D2 to 30
///
/// # Formula
///
/// $$\text{Days} = 360 \times (Y_2 - Y_1) + 30 \times (M_2 - M_1) + (D_2 - D_1)$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360E;

impl DayCount for Thirty360E {
    fn name(&self) -> &'static str {
        "30E/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        let days = self.day_count(start, end);
        Decimal::from(days) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let y1 = start.year() as i64;
        let y2 = end.year() as i64;
        let m1 = start.month() as i64;
        let m2 = end.month() as i64;
        let d1 = (start.day() as i64).min(30);
        let d2 = (end.day() as i64).min(30);

        360 * (y2 - y1) + 30 * (m2 - m1) + (d2 - d1)
    }
}
