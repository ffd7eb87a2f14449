//! CDS present value under the standard model.
//!
//! Both legs are closed-form integrals over the union of the two curves'
//! knots: between knots, log-discount-factor and log-survival are linear in
//! time, so each segment integrates exactly. The `epsilon` helpers keep the
//! segment formulas stable when the combined exponent change is tiny.

use credix_curves::DiscountCurve;
use credix_math::{epsilon, epsilon_p};

use crate::analytic::{CdsAnalytic, CdsPremiumPeriod};
use crate::curve::CreditCurve;
use crate::formula::{AccrualOnDefaultFormula, PriceType};

/// Exponent-change threshold below which the stable forms are used.
const SMALL_EXPONENT: f64 = 1e-5;

/// Prices a CDS off a discount curve and a credit curve.
///
/// The accrual-on-default formula is fixed at construction and threaded
/// through every premium-leg integral. The pricer holds no per-call state;
/// one instance can price any number of contracts.
///
/// # Example
///
/// ```rust
/// use credix_core::Date;
/// use credix_credit::{CdsAnalyticBuilder, CdsPricer, CreditCurve, PriceType};
/// use credix_curves::DiscountCurve;
///
/// let trade = Date::from_ymd(2025, 6, 17).unwrap();
/// let maturity = Date::from_ymd(2030, 6, 20).unwrap();
/// let cds = CdsAnalyticBuilder::new(trade, maturity).build().unwrap();
///
/// let yield_curve = DiscountCurve::flat(0.03).unwrap();
/// let credit_curve = CreditCurve::flat(5.0, 0.016).unwrap();
///
/// let pricer = CdsPricer::default();
/// let pv = pricer.pv(&cds, 0.01, &yield_curve, &credit_curve, PriceType::Clean);
/// assert!(pv.is_finite());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CdsPricer {
    formula: AccrualOnDefaultFormula,
}

impl CdsPricer {
    /// Creates a pricer using the given accrual-on-default formula.
    #[must_use]
    pub fn new(formula: AccrualOnDefaultFormula) -> Self {
        Self { formula }
    }

    /// Returns the accrual-on-default formula.
    #[must_use]
    pub fn formula(&self) -> AccrualOnDefaultFormula {
        self.formula
    }

    /// Present value of the protection leg, per unit notional, discounted
    /// to the cash-settle date.
    ///
    /// `LGD · ∫ B(t)·(−dS(t))` over the protection window.
    #[must_use]
    pub fn protection_leg(
        &self,
        cds: &CdsAnalytic,
        yield_curve: &DiscountCurve,
        credit_curve: &CreditCurve,
    ) -> f64 {
        let knots = integration_knots(
            cds.protection_start(),
            cds.protection_end(),
            yield_curve.nodes().times(),
            credit_curve.nodes().times(),
        );

        let mut ht0 = credit_curve.rt_at(knots[0]);
        let mut rt0 = yield_curve.rt_at(knots[0]);
        let mut b0 = (-ht0 - rt0).exp();

        let mut pv = 0.0;
        for &t1 in &knots[1..] {
            let ht1 = credit_curve.rt_at(t1);
            let rt1 = yield_curve.rt_at(t1);
            let b1 = (-ht1 - rt1).exp();

            let dht = ht1 - ht0;
            let drt = rt1 - rt0;
            let dhrt = dht + drt;

            let dpv = if dhrt.abs() < SMALL_EXPONENT {
                dht * b0 * epsilon(-dhrt)
            } else {
                dht / dhrt * (b0 - b1)
            };
            pv += dpv;

            ht0 = ht1;
            rt0 = rt1;
            b0 = b1;
        }

        pv * cds.lgd() / yield_curve.discount_factor(cds.valuation_time())
    }

    /// Present value of the premium leg per unit coupon (the risky
    /// annuity), discounted to the cash-settle date.
    #[must_use]
    pub fn risky_annuity(
        &self,
        cds: &CdsAnalytic,
        yield_curve: &DiscountCurve,
        credit_curve: &CreditCurve,
        price_type: PriceType,
    ) -> f64 {
        let mut pv = 0.0;
        for period in cds.periods() {
            pv += period.year_fraction
                * yield_curve.discount_factor(period.payment_time)
                * credit_curve.survival_probability(period.accrual_end);

            if cds.pay_accrued_on_default() {
                pv += self.accrual_on_default(period, yield_curve, credit_curve);
            }
        }

        pv /= yield_curve.discount_factor(cds.valuation_time());

        match price_type {
            PriceType::Clean => pv - cds.accrued_year_fraction(),
            PriceType::Dirty => pv,
        }
    }

    /// Present value per unit notional for a protection buyer.
    ///
    /// `protection − coupon·annuity`; the clean value is the points-upfront
    /// price.
    #[must_use]
    pub fn pv(
        &self,
        cds: &CdsAnalytic,
        coupon: f64,
        yield_curve: &DiscountCurve,
        credit_curve: &CreditCurve,
        price_type: PriceType,
    ) -> f64 {
        self.protection_leg(cds, yield_curve, credit_curve)
            - coupon * self.risky_annuity(cds, yield_curve, credit_curve, price_type)
    }

    /// The running coupon at which the clean present value is zero.
    #[must_use]
    pub fn par_spread(
        &self,
        cds: &CdsAnalytic,
        yield_curve: &DiscountCurve,
        credit_curve: &CreditCurve,
    ) -> f64 {
        self.protection_leg(cds, yield_curve, credit_curve)
            / self.risky_annuity(cds, yield_curve, credit_curve, PriceType::Clean)
    }

    /// Expected accrued premium paid at default within one period, per unit
    /// coupon.
    ///
    /// Integrates `(t − accrual start + ω)·B(t)·(−dS(t))` over the period,
    /// segment by segment, under the configured formula variant. The result
    /// is converted from curve time to accrual-fraction units.
    fn accrual_on_default(
        &self,
        period: &CdsPremiumPeriod,
        yield_curve: &DiscountCurve,
        credit_curve: &CreditCurve,
    ) -> f64 {
        let start = period.effective_start;
        let end = period.accrual_end;
        if end <= start {
            return 0.0;
        }

        let omega = self.formula.omega();
        let knots = integration_knots(
            start,
            end,
            yield_curve.nodes().times(),
            credit_curve.nodes().times(),
        );

        let mut t = knots[0];
        let mut ht0 = credit_curve.rt_at(t);
        let mut rt0 = yield_curve.rt_at(t);
        let mut b0 = (-ht0 - rt0).exp();
        let mut t0 = t - period.accrual_start + omega;

        let mut pv = 0.0;
        for &tk in &knots[1..] {
            let ht1 = credit_curve.rt_at(tk);
            let rt1 = yield_curve.rt_at(tk);
            let b1 = (-ht1 - rt1).exp();

            let dt = tk - t;
            let dht = ht1 - ht0;
            let drt = rt1 - rt0;
            let dhrt = dht + drt;

            let tpv = match self.formula {
                AccrualOnDefaultFormula::MarkitFix => {
                    if dhrt.abs() < SMALL_EXPONENT {
                        dht * dt * b0 * epsilon_p(-dhrt)
                    } else {
                        dht * dt / dhrt * ((b0 - b1) / dhrt - b1)
                    }
                }
                AccrualOnDefaultFormula::OriginalIsda | AccrualOnDefaultFormula::Correct => {
                    let t1 = tk - period.accrual_start + omega;
                    let v = if dhrt.abs() < SMALL_EXPONENT {
                        dht * b0 * (t1 * epsilon(-dhrt) - dt * epsilon_p(-dhrt))
                    } else {
                        dht / dhrt * (t0 * b0 - t1 * b1 + dt / dhrt * (b0 - b1))
                    };
                    t0 = t1;
                    v
                }
            };
            pv += tpv;

            t = tk;
            ht0 = ht1;
            rt0 = rt1;
            b0 = b1;
        }

        pv * period.year_fraction / (period.accrual_end - period.accrual_start)
    }
}

/// Union of both curves' knot times inside `(start, end)`, with the window
/// endpoints at the ends.
fn integration_knots(start: f64, end: f64, times_a: &[f64], times_b: &[f64]) -> Vec<f64> {
    let mut knots = Vec::with_capacity(times_a.len() + times_b.len() + 2);
    knots.push(start);
    knots.extend(
        times_a
            .iter()
            .chain(times_b.iter())
            .copied()
            .filter(|&t| t > start && t < end),
    );
    knots.push(end);
    knots.sort_by(|a, b| a.partial_cmp(b).unwrap());
    knots.dedup_by(|a, b| (*a - *b).abs() < 1e-12);
    knots
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use credix_core::Date;

    use crate::analytic::CdsAnalyticBuilder;

    fn sample_cds() -> CdsAnalytic {
        let trade = Date::from_ymd(2025, 6, 17).unwrap();
        let maturity = Date::from_ymd(2030, 6, 20).unwrap();
        CdsAnalyticBuilder::new(trade, maturity).build().unwrap()
    }

    #[test]
    fn test_protection_leg_flat_curves() {
        // Zero rates: protection = LGD * (1 - S(T)) exactly
        let cds = sample_cds();
        let yc = DiscountCurve::flat(0.0).unwrap();
        let h = 0.02;
        let cc = CreditCurve::flat(5.0, h).unwrap();

        let pricer = CdsPricer::default();
        let protection = pricer.protection_leg(&cds, &yc, &cc);

        let s0 = (-h * cds.protection_start()).exp();
        let s1 = (-h * cds.protection_end()).exp();
        assert_relative_eq!(protection, cds.lgd() * (s0 - s1), epsilon = 1e-12);
    }

    #[test]
    fn test_protection_increases_with_hazard() {
        let cds = sample_cds();
        let yc = DiscountCurve::flat(0.03).unwrap();
        let pricer = CdsPricer::default();

        let low = pricer.protection_leg(&cds, &yc, &CreditCurve::flat(5.0, 0.01).unwrap());
        let high = pricer.protection_leg(&cds, &yc, &CreditCurve::flat(5.0, 0.05).unwrap());
        assert!(high > low);
    }

    #[test]
    fn test_annuity_zero_hazard_equals_riskless() {
        // With zero hazard and accrued paid on default contributing nothing,
        // the dirty annuity is the plain discounted sum of year fractions
        let cds = sample_cds();
        let yc = DiscountCurve::flat(0.03).unwrap();
        let cc = CreditCurve::flat(5.0, 0.0).unwrap();

        let pricer = CdsPricer::default();
        let annuity = pricer.risky_annuity(&cds, &yc, &cc, PriceType::Dirty);

        let riskless: f64 = cds
            .periods()
            .iter()
            .map(|p| p.year_fraction * yc.discount_factor(p.payment_time))
            .sum::<f64>()
            / yc.discount_factor(cds.valuation_time());
        assert_relative_eq!(annuity, riskless, epsilon = 1e-12);
    }

    #[test]
    fn test_clean_dirty_differ_by_accrued() {
        let cds = sample_cds();
        let yc = DiscountCurve::flat(0.03).unwrap();
        let cc = CreditCurve::flat(5.0, 0.02).unwrap();

        let pricer = CdsPricer::default();
        let clean = pricer.risky_annuity(&cds, &yc, &cc, PriceType::Clean);
        let dirty = pricer.risky_annuity(&cds, &yc, &cc, PriceType::Dirty);
        assert_relative_eq!(dirty - clean, cds.accrued_year_fraction(), epsilon = 1e-14);
    }

    #[test]
    fn test_pv_zero_at_par_spread() {
        let cds = sample_cds();
        let yc = DiscountCurve::flat(0.03).unwrap();
        let cc = CreditCurve::flat(5.0, 0.025).unwrap();

        let pricer = CdsPricer::default();
        let par = pricer.par_spread(&cds, &yc, &cc);
        let pv = pricer.pv(&cds, par, &yc, &cc, PriceType::Clean);
        assert!(pv.abs() < 1e-15);
    }

    #[test]
    fn test_formula_variants_are_close_but_distinct() {
        let cds = sample_cds();
        let yc = DiscountCurve::flat(0.03).unwrap();
        let cc = CreditCurve::flat(5.0, 0.03).unwrap();

        let original =
            CdsPricer::new(AccrualOnDefaultFormula::OriginalIsda).risky_annuity(
                &cds,
                &yc,
                &cc,
                PriceType::Dirty,
            );
        let markit = CdsPricer::new(AccrualOnDefaultFormula::MarkitFix).risky_annuity(
            &cds,
            &yc,
            &cc,
            PriceType::Dirty,
        );
        let correct = CdsPricer::new(AccrualOnDefaultFormula::Correct).risky_annuity(
            &cds,
            &yc,
            &cc,
            PriceType::Dirty,
        );

        // All three agree to a few basis points of annuity...
        assert_relative_eq!(original, correct, epsilon = 1e-3);
        assert_relative_eq!(markit, correct, epsilon = 1e-3);
        // ...but none are identical
        assert!((original - correct).abs() > 1e-9);
        assert!((markit - correct).abs() > 1e-9);
    }

    #[test]
    fn test_no_accrual_on_default_flag() {
        let trade = Date::from_ymd(2025, 6, 17).unwrap();
        let maturity = Date::from_ymd(2030, 6, 20).unwrap();
        let with_aod = CdsAnalyticBuilder::new(trade, maturity).build().unwrap();
        let without_aod = CdsAnalyticBuilder::new(trade, maturity)
            .with_pay_accrued_on_default(false)
            .build()
            .unwrap();

        let yc = DiscountCurve::flat(0.03).unwrap();
        let cc = CreditCurve::flat(5.0, 0.03).unwrap();
        let pricer = CdsPricer::default();

        let a1 = pricer.risky_annuity(&with_aod, &yc, &cc, PriceType::Dirty);
        let a2 = pricer.risky_annuity(&without_aod, &yc, &cc, PriceType::Dirty);
        assert!(a1 > a2);
    }

    #[test]
    fn test_integration_knots_merge() {
        let knots = integration_knots(0.0, 5.0, &[1.0, 4.0, 7.0], &[1.0, 2.5]);
        assert_eq!(knots, vec![0.0, 1.0, 2.5, 4.0, 5.0]);
    }

    #[test]
    fn test_protection_leg_piecewise_matches_quadrature() {
        // Coarse numerical integration cross-check on a piecewise market
        let cds = sample_cds();
        let yc = DiscountCurve::from_zero_rates(&[(1.0, 0.02), (5.0, 0.035)]).unwrap();
        let cc =
            CreditCurve::from_hazard_rates(&[(1.0, 0.01), (3.0, 0.02), (5.0, 0.03)]).unwrap();

        let pricer = CdsPricer::default();
        let analytic = pricer.protection_leg(&cds, &yc, &cc);

        let steps = 200_000;
        let (a, b) = (cds.protection_start(), cds.protection_end());
        let dt = (b - a) / steps as f64;
        let mut integral = 0.0;
        let mut s_prev = cc.survival_probability(a);
        for i in 1..=steps {
            let t = a + dt * i as f64;
            let s = cc.survival_probability(t);
            let mid = t - 0.5 * dt;
            integral += yc.discount_factor(mid) * (s_prev - s);
            s_prev = s;
        }
        let expected = cds.lgd() * integral / yc.discount_factor(cds.valuation_time());

        assert_relative_eq!(analytic, expected, epsilon = 1e-7);
    }
}
