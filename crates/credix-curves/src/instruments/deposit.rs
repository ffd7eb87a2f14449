//! Money market deposit instrument.
//!
//! A deposit is the simplest instrument for curve bootstrap,
//! used for the short end of the curve (1M to 12M).

use credix_core::daycounts::DayCountConvention;
use credix_core::{CoreResult, Date};

use crate::error::{CurveError, CurveResult};

/// A money market deposit.
///
/// Deposits are used to bootstrap the short end of the yield curve.
/// The curve node is solved in closed form from the simple-rate formula:
///
/// ```text
/// DF(t) = 1 / (1 + rate × τ)   ⇒   z = ln(1 + rate × τ) / t
/// ```
///
/// where τ is the accrual year fraction under the deposit's day count and
/// t is the curve time of the (business-day adjusted) maturity.
///
/// # Example
///
/// ```rust
/// use credix_core::Date;
/// use credix_curves::instruments::MoneyMarketDeposit;
///
/// let spot = Date::from_ymd(2025, 6, 17).unwrap();
/// let deposit = MoneyMarketDeposit::from_tenor_months(spot, 3).unwrap();
/// assert!(deposit.end_date() > spot);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MoneyMarketDeposit {
    /// Start date (spot)
    start_date: Date,
    /// End date (maturity, unadjusted)
    end_date: Date,
    /// Day count convention for the accrual (default ACT/360)
    day_count: DayCountConvention,
}

impl MoneyMarketDeposit {
    /// Creates a new deposit.
    ///
    /// # Arguments
    ///
    /// * `start_date` - Deposit start date (spot)
    /// * `end_date` - Deposit maturity date
    #[must_use]
    pub fn new(start_date: Date, end_date: Date) -> Self {
        Self {
            start_date,
            end_date,
            day_count: DayCountConvention::Act360,
        }
    }

    /// Creates a deposit maturing a number of months after spot.
    pub fn from_tenor_months(spot_date: Date, months: i32) -> CoreResult<Self> {
        let end_date = spot_date.add_months(months)?;
        Ok(Self::new(spot_date, end_date))
    }

    /// Sets the day count convention.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Returns the start date.
    #[must_use]
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// Returns the end date (maturity, unadjusted).
    #[must_use]
    pub fn end_date(&self) -> Date {
        self.end_date
    }

    /// Returns the pillar date: maturity rolled to the next weekday.
    #[must_use]
    pub fn pillar_date(&self) -> Date {
        self.end_date.next_weekday()
    }

    /// Returns the accrual year fraction under the deposit's day count.
    #[must_use]
    pub fn year_fraction(&self) -> f64 {
        self.day_count
            .year_fraction_f64(self.start_date, self.pillar_date())
    }

    /// Solves the curve node zero rate in closed form.
    ///
    /// # Arguments
    ///
    /// * `rate` - The quoted simple deposit rate
    /// * `t` - Curve time of the pillar date
    ///
    /// # Errors
    ///
    /// Returns an error when `1 + rate·τ` is not positive (the log has no
    /// real solution).
    pub fn implied_zero_rate(&self, rate: f64, t: f64) -> CurveResult<f64> {
        let tau = self.year_fraction();
        let growth = 1.0 + rate * tau;
        if growth <= 0.0 {
            return Err(CurveError::invalid_instrument(format!(
                "deposit rate {rate} with accrual {tau} implies non-positive growth factor {growth}"
            )));
        }
        Ok(growth.ln() / t)
    }

    /// Returns a human-readable description for error reporting.
    #[must_use]
    pub fn description(&self) -> String {
        format!("Deposit {} to {}", self.start_date, self.end_date)
    }
}
