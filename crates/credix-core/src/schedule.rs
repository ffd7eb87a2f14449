//! Accrual schedule generation for periodic legs.
//!
//! Schedules are rolled backward from the maturity date, so any stub
//! period is short and sits at the front. Payment dates are adjusted
//! to the next weekday (following convention, weekend-only calendar);
//! accrual dates are left unadjusted as in the standard CDS contract.

use serde::{Deserialize, Serialize};

use crate::daycounts::DayCountConvention;
use crate::error::{CoreError, CoreResult};
use crate::types::{Date, Frequency};

/// A single accrual period of a periodic leg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccrualPeriod {
    /// Accrual start date (inclusive).
    pub start: Date,
    /// Accrual end date (exclusive).
    pub end: Date,
    /// Payment date (accrual end, business-day adjusted).
    pub payment: Date,
    /// Year fraction of the accrual period under the leg's day count.
    pub year_fraction: f64,
}

/// A generated accrual schedule.
///
/// # Example
///
/// ```rust
/// use credix_core::prelude::*;
///
/// let start = Date::from_ymd(2025, 3, 20).unwrap();
/// let end = Date::from_ymd(2026, 3, 20).unwrap();
/// let schedule =
///     Schedule::regular(start, end, Frequency::Quarterly, DayCountConvention::Act360).unwrap();
///
/// assert_eq!(schedule.len(), 4);
/// assert_eq!(schedule.periods()[0].start, start);
/// assert_eq!(schedule.periods()[3].end, end);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    periods: Vec<AccrualPeriod>,
    day_count: DayCountConvention,
}

impl Schedule {
    /// Generates a regular schedule between two dates.
    ///
    /// Roll dates are generated backward from `end` at the given frequency;
    /// if `start` does not fall on a roll date the first period is a short
    /// stub.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidSchedule` if `end <= start`.
    pub fn regular(
        start: Date,
        end: Date,
        frequency: Frequency,
        day_count: DayCountConvention,
    ) -> CoreResult<Self> {
        if end <= start {
            return Err(CoreError::invalid_schedule(format!(
                "end {end} must be after start {start}"
            )));
        }

        let step = frequency.months_per_period() as i32;

        // Roll backward from maturity; the front stub (if any) is short.
        let mut roll_dates = vec![end];
        let mut k = 1;
        loop {
            let date = end.add_months(-step * k)?;
            if date <= start {
                break;
            }
            roll_dates.push(date);
            k += 1;
        }
        roll_dates.push(start);
        roll_dates.reverse();

        let periods = roll_dates
            .windows(2)
            .map(|w| {
                let (s, e) = (w[0], w[1]);
                AccrualPeriod {
                    start: s,
                    end: e,
                    payment: e.next_weekday(),
                    year_fraction: day_count.year_fraction_f64(s, e),
                }
            })
            .collect::<Vec<_>>();

        Ok(Self { periods, day_count })
    }

    /// Returns the accrual periods in chronological order.
    #[must_use]
    pub fn periods(&self) -> &[AccrualPeriod] {
        &self.periods
    }

    /// Returns the number of accrual periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Returns true if the schedule has no periods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Returns the schedule start date.
    #[must_use]
    pub fn start_date(&self) -> Date {
        self.periods[0].start
    }

    /// Returns the schedule end date (final accrual end, unadjusted).
    #[must_use]
    pub fn end_date(&self) -> Date {
        self.periods[self.periods.len() - 1].end
    }

    /// Returns the day count convention of the schedule.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }
}
