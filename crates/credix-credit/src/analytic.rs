//! Trade-date-anchored analytic description of a CDS.
//!
//! Pricing and calibration never touch dates directly: a [`CdsAnalytic`]
//! pre-computes every date-derived quantity (curve times, accrual year
//! fractions, accrued premium) once, so the pricing functions are pure
//! functions of curves and `f64` times. This is also what makes the
//! repeated pricing inside a bootstrap cheap.

use serde::{Deserialize, Serialize};

use credix_core::daycounts::DayCountConvention;
use credix_core::schedule::Schedule;
use credix_core::types::Frequency;
use credix_core::Date;

use crate::error::{CreditError, CreditResult};

/// A single premium accrual period, in curve time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CdsPremiumPeriod {
    /// Accrual start (curve time; negative for seasoned trades).
    pub accrual_start: f64,
    /// Accrual end (curve time).
    pub accrual_end: f64,
    /// Premium payment time (curve time).
    pub payment_time: f64,
    /// Accrual year fraction under the premium day count.
    pub year_fraction: f64,
    /// Start of default-contingent accrual: accrual start clipped to the
    /// protection start.
    pub effective_start: f64,
}

/// Analytic description of a single-name or index CDS contract.
///
/// All times are year fractions from the trade date under the curve day
/// count (ACT/365F by default). Build instances with [`CdsAnalyticBuilder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdsAnalytic {
    protection_start: f64,
    protection_end: f64,
    valuation_time: f64,
    lgd: f64,
    accrued_year_fraction: f64,
    pay_accrued_on_default: bool,
    periods: Vec<CdsPremiumPeriod>,
}

impl CdsAnalytic {
    /// Returns the protection start time (step-in).
    #[must_use]
    pub fn protection_start(&self) -> f64 {
        self.protection_start
    }

    /// Returns the protection end time (maturity).
    #[must_use]
    pub fn protection_end(&self) -> f64 {
        self.protection_end
    }

    /// Returns the cash-settle discounting time.
    #[must_use]
    pub fn valuation_time(&self) -> f64 {
        self.valuation_time
    }

    /// Returns the loss-given-default `1 - recovery`.
    #[must_use]
    pub fn lgd(&self) -> f64 {
        self.lgd
    }

    /// Returns the accrued premium year fraction at step-in (per unit
    /// coupon).
    #[must_use]
    pub fn accrued_year_fraction(&self) -> f64 {
        self.accrued_year_fraction
    }

    /// Returns whether premium accrued to the default date is paid on
    /// default.
    #[must_use]
    pub fn pay_accrued_on_default(&self) -> bool {
        self.pay_accrued_on_default
    }

    /// Returns the premium accrual periods.
    #[must_use]
    pub fn periods(&self) -> &[CdsPremiumPeriod] {
        &self.periods
    }

    /// Returns a copy with a different loss-given-default.
    ///
    /// Used by the intrinsic index pricer, where one reference contract is
    /// re-priced per constituent with that name's own recovery.
    #[must_use]
    pub fn with_lgd(&self, lgd: f64) -> Self {
        let mut new = self.clone();
        new.lgd = lgd;
        new
    }
}

/// Builder for [`CdsAnalytic`].
///
/// Defaults follow the standard contract: quarterly premiums accruing
/// ACT/360 from the prior CDS roll date, protection stepping in the day
/// after trade, cash settlement three business days out, 40% recovery,
/// accrued premium paid on default, ACT/365F curve times.
///
/// # Example
///
/// ```rust
/// use credix_core::Date;
/// use credix_credit::CdsAnalyticBuilder;
///
/// let trade = Date::from_ymd(2025, 6, 17).unwrap();
/// let maturity = Date::from_ymd(2030, 6, 20).unwrap();
///
/// let cds = CdsAnalyticBuilder::new(trade, maturity)
///     .with_recovery_rate(0.4)
///     .build()
///     .unwrap();
/// assert!(cds.protection_end() > 4.9);
/// ```
#[derive(Debug, Clone)]
pub struct CdsAnalyticBuilder {
    trade_date: Date,
    maturity: Date,
    accrual_start: Option<Date>,
    step_in_days: i64,
    cash_settle_days: i32,
    payment_frequency: Frequency,
    accrual_day_count: DayCountConvention,
    curve_day_count: DayCountConvention,
    recovery_rate: f64,
    pay_accrued_on_default: bool,
}

impl CdsAnalyticBuilder {
    /// Creates a builder for a CDS traded on `trade_date` maturing at
    /// `maturity`.
    #[must_use]
    pub fn new(trade_date: Date, maturity: Date) -> Self {
        Self {
            trade_date,
            maturity,
            accrual_start: None,
            step_in_days: 1,
            cash_settle_days: 3,
            payment_frequency: Frequency::Quarterly,
            accrual_day_count: DayCountConvention::Act360,
            curve_day_count: DayCountConvention::Act365Fixed,
            recovery_rate: 0.4,
            pay_accrued_on_default: true,
        }
    }

    /// Sets an explicit accrual start date (default: prior CDS roll date).
    #[must_use]
    pub fn with_accrual_start(mut self, date: Date) -> Self {
        self.accrual_start = Some(date);
        self
    }

    /// Sets the premium payment frequency.
    #[must_use]
    pub fn with_payment_frequency(mut self, frequency: Frequency) -> Self {
        self.payment_frequency = frequency;
        self
    }

    /// Sets the premium accrual day count.
    #[must_use]
    pub fn with_accrual_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.accrual_day_count = day_count;
        self
    }

    /// Sets the recovery rate assumption.
    #[must_use]
    pub fn with_recovery_rate(mut self, recovery_rate: f64) -> Self {
        self.recovery_rate = recovery_rate;
        self
    }

    /// Sets whether accrued premium is paid on default.
    #[must_use]
    pub fn with_pay_accrued_on_default(mut self, pay: bool) -> Self {
        self.pay_accrued_on_default = pay;
        self
    }

    /// Builds the analytic description.
    ///
    /// # Errors
    ///
    /// Rejects recovery outside `[0,1]` and maturities not after the trade
    /// date.
    pub fn build(&self) -> CreditResult<CdsAnalytic> {
        if !(0.0..=1.0).contains(&self.recovery_rate) {
            return Err(CreditError::invalid_instrument(format!(
                "recovery rate {} outside [0,1]",
                self.recovery_rate
            )));
        }
        if self.maturity <= self.trade_date {
            return Err(CreditError::invalid_instrument(format!(
                "maturity {} not after trade date {}",
                self.maturity, self.trade_date
            )));
        }

        let step_in = self.trade_date.add_days(self.step_in_days);
        let cash_settle = self.trade_date.add_business_days(self.cash_settle_days);
        let accrual_start = self.accrual_start.unwrap_or_else(|| {
            // prior roll: rolls are quarterly, so step back one quarter
            // from the next roll strictly after the trade date
            self.trade_date
                .next_cds_roll_date()
                .add_months(-3)
                .expect("CDS roll dates are always valid")
        });

        let schedule = Schedule::regular(
            accrual_start,
            self.maturity,
            self.payment_frequency,
            self.accrual_day_count,
        )?;

        let yf = |d: Date| self.curve_day_count.year_fraction_f64(self.trade_date, d);
        let protection_start = yf(step_in).max(0.0);
        let protection_end = yf(self.maturity);
        let valuation_time = yf(cash_settle);

        let n = schedule.len();
        let mut periods = Vec::with_capacity(n);
        let mut accrued_year_fraction = 0.0;
        for (i, p) in schedule.periods().iter().enumerate() {
            if p.end <= step_in {
                continue;
            }
            if p.start <= step_in {
                accrued_year_fraction = self
                    .accrual_day_count
                    .year_fraction_f64(p.start, step_in);
            }

            // The final period of the standard contract accrues one extra
            // day (protection through the end of the maturity date).
            let (end_date, year_fraction) = if i == n - 1 {
                let end = p.end.add_days(1);
                (
                    p.end,
                    self.accrual_day_count.year_fraction_f64(p.start, end),
                )
            } else {
                (p.end, p.year_fraction)
            };

            let accrual_start_t = yf(p.start);
            periods.push(CdsPremiumPeriod {
                accrual_start: accrual_start_t,
                accrual_end: yf(end_date),
                payment_time: yf(p.payment),
                year_fraction,
                effective_start: accrual_start_t.max(protection_start),
            });
        }

        Ok(CdsAnalytic {
            protection_start,
            protection_end,
            valuation_time,
            lgd: 1.0 - self.recovery_rate,
            accrued_year_fraction,
            pay_accrued_on_default: self.pay_accrued_on_default,
            periods,
        })
    }
}

/// A market quote for one CDS pillar.
///
/// The three standard conventions. Par and quoted spreads carry zero
/// upfront with the quoted value used as the running coupon; points-upfront
/// carries the contract's fixed coupon with the quoted value as the
/// upfront. The closed enumeration makes an unknown convention
/// unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CdsQuote {
    /// The running coupon at which the CDS has zero upfront value.
    ParSpread(f64),
    /// A spread quote against a standard fixed coupon; converted to an
    /// equivalent upfront through a flat single-pillar calibration.
    QuotedSpread {
        /// The quoted flat spread.
        spread: f64,
        /// The contract's fixed running coupon.
        coupon: f64,
    },
    /// Price quoted as a fraction of notional paid at inception.
    PointsUpfront {
        /// The upfront points (fraction of notional, clean).
        puf: f64,
        /// The contract's fixed running coupon.
        coupon: f64,
    },
}
