//! Day count conventions for credit and rates calculations.
//!
//! Day count conventions determine how accrued interest is calculated
//! by specifying how to count days between two dates and the year basis.
//!
//! # Supported Conventions
//!
//! - [`Act360`]: Actual/360 - Money market and CDS premium accruals
//! - [`Act365Fixed`]: Actual/365 Fixed - Curve time axis in the standard model
//! - [`Thirty360E`]: 30E/360 - Swap fixed legs (Eurobond basis)
//!
//! # Usage
//!
//! ```rust
//! use credix_core::daycounts::{Act360, DayCount};
//! use credix_core::types::Date;
//!
//! let dc = Act360;
//! let start = Date::from_ymd(2025, 1, 15).unwrap();
//! let end = Date::from_ymd(2025, 7, 15).unwrap();
//!
//! let days = dc.day_count(start, end);
//! let year_fraction = dc.year_fraction(start, end);
//! ```

mod act360;
mod act365;
mod thirty360;

pub use act360::Act360;
pub use act365::Act365Fixed;
pub use thirty360::Thirty360E;

use crate::types::Date;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Trait for day count conventions.
///
/// Implementations provide the year fraction calculation between two dates
/// according to specific market conventions.
///
/// # Implementation Notes
///
/// - `year_fraction` returns the fraction of a year between dates
/// - `day_count` returns the number of days according to the convention
/// - Implementations must be thread-safe (`Send + Sync`)
pub trait DayCount: Send + Sync {
    /// Returns the name of the day count convention.
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    ///
    /// # Arguments
    ///
    /// * `start` - Start date (exclusive for accrual)
    /// * `end` - End date (inclusive for accrual)
    ///
    /// # Returns
    ///
    /// The fraction of a year between the two dates. Can be negative if end < start.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal;

    /// Calculates the day count between two dates.
    ///
    /// For ACT conventions, this is actual calendar days.
    /// For 30/360 conventions, this uses the 30-day month assumption.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// Enumeration of the supported day count conventions.
///
/// This enum provides a convenient way to select conventions at runtime
/// and convert to boxed trait objects.
///
/// # Example
///
/// ```rust
/// use credix_core::daycounts::{DayCount, DayCountConvention};
/// use credix_core::types::Date;
///
/// let convention = DayCountConvention::Act360;
/// let dc = convention.to_day_count();
///
/// let start = Date::from_ymd(2025, 1, 1).unwrap();
/// let end = Date::from_ymd(2025, 7, 1).unwrap();
/// let yf = dc.year_fraction(start, end);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayCountConvention {
    /// Actual/360 - Money market instruments, CDS premium accruals
    Act360,

    /// Actual/365 Fixed - Curve time axis in the ISDA standard model
    Act365Fixed,

    /// 30E/360 (Eurobond Basis) - Swap fixed legs
    Thirty360E,
}

impl DayCountConvention {
    /// Creates a boxed day count implementation.
    #[must_use]
    pub fn to_day_count(&self) -> Box<dyn DayCount> {
        match self {
            DayCountConvention::Act360 => Box::new(Act360),
            DayCountConvention::Act365Fixed => Box::new(Act365Fixed),
            DayCountConvention::Thirty360E => Box::new(Thirty360E),
        }
    }

    /// Returns the name of the convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Act365Fixed => "ACT/365F",
            DayCountConvention::Thirty360E => "30E/360",
        }
    }

    /// Returns the year basis (denominator) of the convention.
    #[must_use]
    pub const fn basis(&self) -> u32 {
        match self {
            DayCountConvention::Act360 | DayCountConvention::Thirty360E => 360,
            DayCountConvention::Act365Fixed => 365,
        }
    }

    /// Calculates the year fraction between two dates as `f64`.
    ///
    /// Convenience wrapper for pricing hot paths; the underlying
    /// convention arithmetic stays in `Decimal`.
    #[must_use]
    pub fn year_fraction_f64(&self, start: Date, end: Date) -> f64 {
        self.to_day_count()
            .year_fraction(start, end)
            .to_f64()
            .unwrap_or(0.0)
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DayCountConvention {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace(' ', "").as_str() {
            "ACT/360" | "ACTUAL/360" => Ok(DayCountConvention::Act360),
            "ACT/365F" | "ACT/365FIXED" | "ACT/365" => Ok(DayCountConvention::Act365Fixed),
            "30E/360" | "30/360E" | "EUROBOND" => Ok(DayCountConvention::Thirty360E),
            other => Err(crate::error::CoreError::day_count_error(format!(
                "Unknown day count convention: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convention_names() {
        assert_eq!(DayCountConvention::Act360.name(), "ACT/360");
        assert_eq!(DayCountConvention::Act365Fixed.name(), "ACT/365F");
        assert_eq!(DayCountConvention::Thirty360E.name(), "30E/360");
    }

    #[test]
    fn test_basis() {
        assert_eq!(DayCountConvention::Act360.basis(), 360);
        assert_eq!(DayCountConvention::Act365Fixed.basis(), 365);
        assert_eq!(DayCountConvention::Thirty360E.basis(), 360);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "ACT/360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act360
        );
        assert_eq!(
            "act/365f".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act365Fixed
        );
        assert!("ACT/ACT MARS".parse::<DayCountConvention>().is_err());
    }

    #[test]
    fn test_year_fraction_f64() {
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let end = Date::from_ymd(2025, 4, 1).unwrap();
        let yf = DayCountConvention::Act360.year_fraction_f64(start, end);
        assert!((yf - 0.25).abs() < 1e-15);
    }
}
