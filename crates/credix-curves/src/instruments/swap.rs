//! Par interest-rate swap instrument.
//!
//! Swaps build the medium-to-long end of the curve. Only the fixed leg is
//! modelled explicitly; the floating leg is worth par at inception, so the
//! repricing condition is `1 − DF(t_n) = rate · Σ τᵢ · DF(tᵢ)`.

use credix_core::daycounts::DayCountConvention;
use credix_core::schedule::Schedule;
use credix_core::types::Frequency;
use credix_core::{CoreResult, Date};

use crate::error::CurveResult;

/// A par interest-rate swap used as a curve calibration instrument.
///
/// # Example
///
/// ```rust
/// use credix_core::Date;
/// use credix_curves::instruments::ParSwap;
///
/// let spot = Date::from_ymd(2025, 6, 17).unwrap();
/// let swap = ParSwap::from_tenor_years(spot, 5).unwrap();
/// assert_eq!(swap.maturity_date().year(), 2030);
/// ```
#[derive(Debug, Clone)]
pub struct ParSwap {
    /// Effective date (spot)
    effective_date: Date,
    /// Termination date (unadjusted)
    maturity_date: Date,
    /// Fixed leg payment frequency (default semi-annual)
    frequency: Frequency,
    /// Fixed leg day count (default 30E/360)
    day_count: DayCountConvention,
}

impl ParSwap {
    /// Creates a new par swap.
    #[must_use]
    pub fn new(effective_date: Date, maturity_date: Date) -> Self {
        Self {
            effective_date,
            maturity_date,
            frequency: Frequency::SemiAnnual,
            day_count: DayCountConvention::Thirty360E,
        }
    }

    /// Creates a swap maturing a number of years after spot.
    pub fn from_tenor_years(spot_date: Date, years: i32) -> CoreResult<Self> {
        let maturity_date = spot_date.add_years(years)?;
        Ok(Self::new(spot_date, maturity_date))
    }

    /// Sets the fixed leg payment frequency.
    #[must_use]
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the fixed leg day count.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Returns the effective date.
    #[must_use]
    pub fn effective_date(&self) -> Date {
        self.effective_date
    }

    /// Returns the termination date (unadjusted).
    #[must_use]
    pub fn maturity_date(&self) -> Date {
        self.maturity_date
    }

    /// Returns the fixed leg frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Returns the fixed leg schedule.
    pub fn fixed_schedule(&self) -> CurveResult<Schedule> {
        Ok(Schedule::regular(
            self.effective_date,
            self.maturity_date,
            self.frequency,
            self.day_count,
        )?)
    }

    /// Returns the pillar date: the final (adjusted) fixed payment date.
    #[must_use]
    pub fn pillar_date(&self) -> Date {
        self.maturity_date.next_weekday()
    }

    /// Returns the fixed leg payment dates and accrual year fractions.
    pub fn fixed_payments(&self) -> CurveResult<Vec<(Date, f64)>> {
        let schedule = self.fixed_schedule()?;
        Ok(schedule
            .periods()
            .iter()
            .map(|p| (p.payment, p.year_fraction))
            .collect())
    }

    /// Returns a human-readable description for error reporting.
    #[must_use]
    pub fn description(&self) -> String {
        format!(
            "Swap {} {} to {}",
            self.frequency, self.effective_date, self.maturity_date
        )
    }
}
