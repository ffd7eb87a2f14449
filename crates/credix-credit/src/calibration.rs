//! Sequential credit-curve bootstrap.
//!
//! Builds a piecewise hazard curve from CDS pillar quotes, one pillar at a
//! time in ascending maturity order. Each step solves the new knot's
//! average hazard so that the pillar's clean present value matches its
//! (normalized) points-upfront; previously calibrated knots are held fixed.

use log::debug;

use credix_curves::{DiscountCurve, NodeCurve};
use credix_math::solvers::{
    brent, expand_bracket, newton_raphson_numerical, BracketConfig, SolverConfig,
};

use crate::analytic::{CdsAnalytic, CdsQuote};
use crate::curve::CreditCurve;
use crate::error::{CreditError, CreditResult};
use crate::formula::{AccrualOnDefaultFormula, ArbitrageHandling, PriceType};
use crate::pricing::CdsPricer;

/// Calibrates piecewise hazard curves from CDS market quotes.
///
/// The accrual-on-default formula and arbitrage policy are fixed at
/// construction; each [`calibrate`](Self::calibrate) call is otherwise
/// self-contained and safe to run concurrently with others.
///
/// # Example
///
/// ```rust,ignore
/// let calibrator = CreditCurveCalibrator::new(
///     AccrualOnDefaultFormula::OriginalIsda,
///     ArbitrageHandling::Ignore,
/// );
/// let curve = calibrator.calibrate(&pillars, &quotes, &yield_curve)?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CreditCurveCalibrator {
    formula: AccrualOnDefaultFormula,
    arbitrage_handling: ArbitrageHandling,
    solver: SolverConfig,
}

impl Default for CreditCurveCalibrator {
    fn default() -> Self {
        Self::new(
            AccrualOnDefaultFormula::default(),
            ArbitrageHandling::default(),
        )
    }
}

impl CreditCurveCalibrator {
    /// Creates a calibrator with the given formula and arbitrage policy.
    #[must_use]
    pub fn new(formula: AccrualOnDefaultFormula, arbitrage_handling: ArbitrageHandling) -> Self {
        Self {
            formula,
            arbitrage_handling,
            solver: SolverConfig::default().with_tolerance(1e-14),
        }
    }

    /// Sets the root-finder configuration.
    #[must_use]
    pub fn with_solver_config(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Returns the accrual-on-default formula.
    #[must_use]
    pub fn formula(&self) -> AccrualOnDefaultFormula {
        self.formula
    }

    /// Returns the arbitrage-handling policy.
    #[must_use]
    pub fn arbitrage_handling(&self) -> ArbitrageHandling {
        self.arbitrage_handling
    }

    /// Calibrates a hazard curve to a set of CDS pillars.
    ///
    /// Pillars must be in strictly ascending maturity order, one quote per
    /// pillar, positionally aligned.
    ///
    /// # Errors
    ///
    /// - `InvalidInstrument` / `InvalidQuote` for malformed input
    /// - `Calibration` when a pillar's root-find fails
    /// - `Arbitrage` when a negative forward hazard arises under the
    ///   [`ArbitrageHandling::Fail`] policy
    pub fn calibrate(
        &self,
        pillars: &[CdsAnalytic],
        quotes: &[CdsQuote],
        yield_curve: &DiscountCurve,
    ) -> CreditResult<CreditCurve> {
        if pillars.is_empty() {
            return Err(CreditError::invalid_instrument(
                "no pillars provided for calibration",
            ));
        }
        if pillars.len() != quotes.len() {
            return Err(CreditError::invalid_quote(format!(
                "{} pillars vs {} quotes",
                pillars.len(),
                quotes.len()
            )));
        }
        for (i, w) in pillars.windows(2).enumerate() {
            if w[1].protection_end() <= w[0].protection_end() {
                return Err(CreditError::invalid_instrument(format!(
                    "pillar maturities not ascending at index {}: {} >= {}",
                    i + 1,
                    w[0].protection_end(),
                    w[1].protection_end()
                )));
            }
        }

        // Normalize every quote to (coupon, points-upfront)
        let normalized: Vec<(f64, f64)> = pillars
            .iter()
            .zip(quotes.iter())
            .map(|(pillar, quote)| self.normalize_quote(pillar, quote, yield_curve))
            .collect::<CreditResult<_>>()?;

        let pricer = CdsPricer::new(self.formula);
        let mut times: Vec<f64> = Vec::with_capacity(pillars.len());
        let mut values: Vec<f64> = Vec::with_capacity(pillars.len());

        for (k, (pillar, &(coupon, puf))) in
            pillars.iter().zip(normalized.iter()).enumerate()
        {
            let t = pillar.protection_end();

            let objective = |h: f64| -> f64 {
                let mut trial_times = times.clone();
                let mut trial_values = values.clone();
                trial_times.push(t);
                trial_values.push(h);
                match NodeCurve::from_values(trial_times, trial_values) {
                    Ok(nodes) => {
                        let curve = CreditCurve::from_nodes(nodes);
                        pricer.pv(pillar, coupon, yield_curve, &curve, PriceType::Clean) - puf
                    }
                    Err(_) => f64::NAN,
                }
            };

            let guess = if k == 0 {
                (coupon + puf / t.max(1.0)) / pillar.lgd()
            } else {
                values[k - 1]
            };

            let h = self
                .solve_pillar(&objective, guess)
                .map_err(|e| CreditError::calibration_failed(k, e))?;
            debug!("credit pillar {k}: t = {t:.6}, hazard = {h:.8}");

            times.push(t);
            values.push(h);

            // Negative implied forward hazard between this knot and the
            // previous one triggers the configured policy.
            let forward = if k == 0 {
                values[0]
            } else {
                (values[k] * times[k] - values[k - 1] * times[k - 1]) / (times[k] - times[k - 1])
            };
            if forward < 0.0 {
                match self.arbitrage_handling {
                    ArbitrageHandling::Ignore => {}
                    ArbitrageHandling::Fail => {
                        return Err(CreditError::Arbitrage { pillar: k, forward });
                    }
                    ArbitrageHandling::ZeroHazardRate => {
                        let clamped_rt = if k == 0 {
                            0.0
                        } else {
                            values[k - 1] * times[k - 1]
                        };
                        values[k] = clamped_rt / times[k];
                    }
                }
            }
        }

        Ok(CreditCurve::from_nodes(NodeCurve::from_values(
            times, values,
        )?))
    }

    /// Calibrates a flat single-pillar curve.
    pub fn calibrate_single(
        &self,
        pillar: &CdsAnalytic,
        quote: &CdsQuote,
        yield_curve: &DiscountCurve,
    ) -> CreditResult<CreditCurve> {
        self.calibrate(std::slice::from_ref(pillar), &[*quote], yield_curve)
    }

    /// Normalizes a quote to `(coupon, points-upfront)`.
    ///
    /// A quoted spread is translated by calibrating a flat curve at the
    /// quoted spread (zero upfront) and repricing the pillar at its
    /// contractual coupon.
    fn normalize_quote(
        &self,
        pillar: &CdsAnalytic,
        quote: &CdsQuote,
        yield_curve: &DiscountCurve,
    ) -> CreditResult<(f64, f64)> {
        match *quote {
            CdsQuote::ParSpread(spread) => {
                if spread < 0.0 {
                    return Err(CreditError::invalid_quote(format!(
                        "negative par spread {spread}"
                    )));
                }
                Ok((spread, 0.0))
            }
            CdsQuote::PointsUpfront { puf, coupon } => {
                if puf > 1.0 {
                    return Err(CreditError::invalid_quote(format!(
                        "points-upfront {puf} above 1.0"
                    )));
                }
                if coupon < 0.0 {
                    return Err(CreditError::invalid_quote(format!(
                        "negative coupon {coupon}"
                    )));
                }
                Ok((coupon, puf))
            }
            CdsQuote::QuotedSpread { spread, coupon } => {
                let flat = self.calibrate_single(
                    pillar,
                    &CdsQuote::ParSpread(spread),
                    yield_curve,
                )?;
                let pricer = CdsPricer::new(self.formula);
                let puf = pricer.pv(pillar, coupon, yield_curve, &flat, PriceType::Clean);
                Ok((coupon, puf))
            }
        }
    }

    /// Solves a pillar objective: bracket from the guess, Newton with a
    /// numerical derivative, Brent on the bracket as fallback.
    fn solve_pillar<F>(&self, objective: F, guess: f64) -> Result<f64, credix_math::MathError>
    where
        F: Fn(f64) -> f64,
    {
        let bracket_config = BracketConfig::default().with_lower_limit(0.0);
        let (a, b) = expand_bracket(&objective, guess.max(1e-4), &bracket_config)?;
        match newton_raphson_numerical(&objective, 0.5 * (a + b), &self.solver) {
            Ok(result) => Ok(result.root),
            Err(_) => Ok(brent(&objective, a, b, &self.solver)?.root),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use credix_core::Date;

    use crate::analytic::CdsAnalyticBuilder;

    fn trade_date() -> Date {
        Date::from_ymd(2025, 6, 17).unwrap()
    }

    fn pillar(years: i32, recovery: f64) -> CdsAnalytic {
        let maturity = Date::from_ymd(2025 + years, 6, 20).unwrap();
        CdsAnalyticBuilder::new(trade_date(), maturity)
            .with_recovery_rate(recovery)
            .build()
            .unwrap()
    }

    #[test]
    fn test_single_pillar_reprices() {
        let cds = pillar(5, 0.4);
        let yc = DiscountCurve::flat(0.03).unwrap();
        let calibrator = CreditCurveCalibrator::default();

        let curve = calibrator
            .calibrate_single(&cds, &CdsQuote::ParSpread(0.012), &yc)
            .unwrap();

        let pricer = CdsPricer::default();
        let pv = pricer.pv(&cds, 0.012, &yc, &curve, PriceType::Clean);
        assert!(pv.abs() < 1e-12, "residual {pv:.3e}");
    }

    #[test]
    fn test_flat_hazard_approximation() {
        // 100bp par spread, zero yield, 40% recovery, 5y:
        // hazard ≈ spread / (1 - recovery) = 0.016667
        let cds = pillar(5, 0.4);
        let yc = DiscountCurve::flat(0.0).unwrap();
        let calibrator = CreditCurveCalibrator::default();

        let curve = calibrator
            .calibrate_single(&cds, &CdsQuote::ParSpread(0.01), &yc)
            .unwrap();

        let h = curve.hazard_rate(cds.protection_end());
        let approximation = 0.01 / 0.6;
        assert!(
            (h - approximation).abs() / approximation < 0.01,
            "hazard {h} vs approximation {approximation}"
        );
    }

    #[test]
    fn test_multi_pillar_reprices_every_quote() {
        let pillars = vec![pillar(1, 0.4), pillar(3, 0.4), pillar(5, 0.4), pillar(7, 0.4)];
        let quotes = vec![
            CdsQuote::ParSpread(0.006),
            CdsQuote::ParSpread(0.009),
            CdsQuote::ParSpread(0.012),
            CdsQuote::ParSpread(0.014),
        ];
        let yc = DiscountCurve::from_zero_rates(&[(1.0, 0.03), (5.0, 0.035)]).unwrap();
        let calibrator = CreditCurveCalibrator::default();

        let curve = calibrator.calibrate(&pillars, &quotes, &yc).unwrap();
        assert_eq!(curve.len(), 4);

        let pricer = CdsPricer::default();
        for (p, q) in pillars.iter().zip(quotes.iter()) {
            let CdsQuote::ParSpread(spread) = q else {
                unreachable!()
            };
            let par = pricer.par_spread(p, &yc, &curve);
            assert_relative_eq!(par, *spread, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_points_upfront_quote() {
        let cds = pillar(5, 0.4);
        let yc = DiscountCurve::flat(0.03).unwrap();
        let calibrator = CreditCurveCalibrator::default();

        let quote = CdsQuote::PointsUpfront {
            puf: 0.035,
            coupon: 0.01,
        };
        let curve = calibrator.calibrate_single(&cds, &quote, &yc).unwrap();

        let pricer = CdsPricer::default();
        let pv = pricer.pv(&cds, 0.01, &yc, &curve, PriceType::Clean);
        assert_relative_eq!(pv, 0.035, epsilon = 1e-12);
    }

    #[test]
    fn test_quoted_spread_equivalent_to_puf() {
        let cds = pillar(5, 0.4);
        let yc = DiscountCurve::flat(0.03).unwrap();
        let calibrator = CreditCurveCalibrator::default();

        let quoted = CdsQuote::QuotedSpread {
            spread: 0.015,
            coupon: 0.01,
        };
        let curve_qs = calibrator.calibrate_single(&cds, &quoted, &yc).unwrap();

        // Translate by hand: flat curve at the quoted spread, repriced at
        // the contract coupon
        let flat = calibrator
            .calibrate_single(&cds, &CdsQuote::ParSpread(0.015), &yc)
            .unwrap();
        let pricer = CdsPricer::default();
        let puf = pricer.pv(&cds, 0.01, &yc, &flat, PriceType::Clean);

        let curve_puf = calibrator
            .calibrate_single(&cds, &CdsQuote::PointsUpfront { puf, coupon: 0.01 }, &yc)
            .unwrap();
        assert_relative_eq!(
            curve_qs.hazard_rate(5.0),
            curve_puf.hazard_rate(5.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_mismatched_quotes_rejected() {
        let pillars = vec![pillar(3, 0.4), pillar(5, 0.4)];
        let yc = DiscountCurve::flat(0.03).unwrap();
        let calibrator = CreditCurveCalibrator::default();

        let result = calibrator.calibrate(&pillars, &[CdsQuote::ParSpread(0.01)], &yc);
        assert!(matches!(result, Err(CreditError::InvalidQuote { .. })));
    }

    #[test]
    fn test_non_ascending_pillars_rejected() {
        let pillars = vec![pillar(5, 0.4), pillar(3, 0.4)];
        let quotes = vec![CdsQuote::ParSpread(0.012), CdsQuote::ParSpread(0.009)];
        let yc = DiscountCurve::flat(0.03).unwrap();
        let calibrator = CreditCurveCalibrator::default();

        let result = calibrator.calibrate(&pillars, &quotes, &yc);
        assert!(matches!(result, Err(CreditError::InvalidInstrument { .. })));
    }

    fn inverted_market() -> (Vec<CdsAnalytic>, Vec<CdsQuote>, DiscountCurve) {
        // Sharply inverted spreads engineered to imply a negative forward
        // hazard rate on the second segment
        let pillars = vec![pillar(1, 0.4), pillar(5, 0.4)];
        let quotes = vec![CdsQuote::ParSpread(0.060), CdsQuote::ParSpread(0.008)];
        let yc = DiscountCurve::flat(0.02).unwrap();
        (pillars, quotes, yc)
    }

    #[test]
    fn test_arbitrage_ignore_keeps_negative_forward() {
        let (pillars, quotes, yc) = inverted_market();
        let calibrator = CreditCurveCalibrator::new(
            AccrualOnDefaultFormula::OriginalIsda,
            ArbitrageHandling::Ignore,
        );

        let curve = calibrator.calibrate(&pillars, &quotes, &yc).unwrap();
        assert!(curve.forward_hazard_rate(1) < 0.0);
    }

    #[test]
    fn test_arbitrage_fail_raises() {
        let (pillars, quotes, yc) = inverted_market();
        let calibrator = CreditCurveCalibrator::new(
            AccrualOnDefaultFormula::OriginalIsda,
            ArbitrageHandling::Fail,
        );

        let result = calibrator.calibrate(&pillars, &quotes, &yc);
        assert!(matches!(result, Err(CreditError::Arbitrage { pillar: 1, .. })));
    }

    #[test]
    fn test_arbitrage_clamp_zeroes_forward() {
        let (pillars, quotes, yc) = inverted_market();
        let calibrator = CreditCurveCalibrator::new(
            AccrualOnDefaultFormula::OriginalIsda,
            ArbitrageHandling::ZeroHazardRate,
        );

        let curve = calibrator.calibrate(&pillars, &quotes, &yc).unwrap();
        assert!(curve.forward_hazard_rate(1).abs() < 1e-14);
        // the first knot is untouched
        let ignore_curve = CreditCurveCalibrator::new(
            AccrualOnDefaultFormula::OriginalIsda,
            ArbitrageHandling::Ignore,
        )
        .calibrate(&pillars, &quotes, &yc)
        .unwrap();
        assert_relative_eq!(
            curve.hazard_rate(pillars[0].protection_end()),
            ignore_curve.hazard_rate(pillars[0].protection_end()),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_markit_fix_calibrates() {
        let cds = pillar(5, 0.4);
        let yc = DiscountCurve::flat(0.03).unwrap();
        let calibrator = CreditCurveCalibrator::new(
            AccrualOnDefaultFormula::MarkitFix,
            ArbitrageHandling::Ignore,
        );

        let curve = calibrator
            .calibrate_single(&cds, &CdsQuote::ParSpread(0.012), &yc)
            .unwrap();

        let pricer = CdsPricer::new(AccrualOnDefaultFormula::MarkitFix);
        let pv = pricer.pv(&cds, 0.012, &yc, &curve, PriceType::Clean);
        assert!(pv.abs() < 1e-12);
    }
}
