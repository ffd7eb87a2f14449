//! Portfolio adjustment: rescaling constituent hazard curves so the basket
//! reprices observed index quotes.
//!
//! The single-name curves of an index basket rarely reproduce the traded
//! index price exactly (the index basis). The adjustment finds, for each
//! reference maturity, the multiplicative scaling of the constituents'
//! accumulated hazards that closes the gap, term by term from the shortest
//! maturity out.

use log::debug;

use credix_curves::DiscountCurve;
use credix_math::solvers::{
    brent, expand_bracket, newton_raphson_numerical, BracketConfig, SolverConfig,
};

use crate::analytic::CdsAnalytic;
use crate::curve::CreditCurve;
use crate::error::{CreditError, CreditResult};
use crate::formula::{AccrualOnDefaultFormula, PriceType};
use crate::index::bundle::IntrinsicIndexDataBundle;
use crate::index::pricing::IndexCdsPricer;

/// Knot coincidence tolerance when resampling curves to reference
/// maturities.
const KNOT_TOLERANCE: f64 = 1e-10;

/// Rescales a basket's hazard curves to reprice observed index quotes.
///
/// # Example
///
/// ```rust,ignore
/// let adjustment = PortfolioAdjustment::default();
/// let adjusted = adjustment.adjust_curves(0.025, &index_cds, 0.01, &yield_curve, &bundle)?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PortfolioAdjustment {
    pricer: IndexCdsPricer,
    solver: SolverConfig,
}

impl Default for PortfolioAdjustment {
    fn default() -> Self {
        Self::new(AccrualOnDefaultFormula::default())
    }
}

impl PortfolioAdjustment {
    /// Creates an adjustment solver using the given accrual-on-default
    /// formula.
    #[must_use]
    pub fn new(formula: AccrualOnDefaultFormula) -> Self {
        Self {
            pricer: IndexCdsPricer::new(formula),
            solver: SolverConfig::default().with_tolerance(1e-14),
        }
    }

    /// Sets the root-finder configuration.
    #[must_use]
    pub fn with_solver_config(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Adjusts every constituent curve so the basket reprices one index
    /// quote.
    ///
    /// Finds the scalar `x` such that scaling every alive constituent's
    /// accumulated hazard `Λ(t) ↦ x·Λ(t)` makes the intrinsic index value
    /// equal `index_factor · puf`, then returns the rescaled bundle.
    ///
    /// # Errors
    ///
    /// Rejects out-of-domain quotes and coupons; propagates solver failure.
    pub fn adjust_curves(
        &self,
        puf: f64,
        cds: &CdsAnalytic,
        coupon: f64,
        yield_curve: &DiscountCurve,
        bundle: &IntrinsicIndexDataBundle,
    ) -> CreditResult<IntrinsicIndexDataBundle> {
        validate_quote(puf, coupon)?;

        let target = puf * bundle.index_factor();
        let objective = |x: f64| -> f64 {
            self.scaled_pv(cds, coupon, yield_curve, bundle, |curve| curve.scaled(x)) - target
        };

        let x = self
            .solve(&objective, 1.0)
            .map_err(|e| CreditError::calibration_failed(0, e))?;
        debug!("single-term index adjustment: x = {x:.10}");

        let curves = scale_all(bundle, |curve| curve.scaled(x))?;
        bundle.with_credit_curves(curves)
    }

    /// Adjusts every constituent curve so the basket reprices a strip of
    /// index quotes at ascending reference maturities.
    ///
    /// Every constituent curve is first resampled to carry a knot at each
    /// reference maturity (existing knots are preserved exactly). The terms
    /// are then solved in order: the multiplier for term `j` scales only
    /// the knots between reference maturities `j-1` and `j`, is seeded from
    /// the previous term's solution, and is baked in before the next term.
    /// With a single maturity this reduces exactly to
    /// [`adjust_curves`](Self::adjust_curves).
    ///
    /// # Errors
    ///
    /// Rejects mismatched quote/instrument counts, non-ascending reference
    /// maturities, and out-of-domain quotes or coupons; propagates solver
    /// failure.
    pub fn adjust_curves_multi(
        &self,
        pufs: &[f64],
        cds_list: &[CdsAnalytic],
        coupon: f64,
        yield_curve: &DiscountCurve,
        bundle: &IntrinsicIndexDataBundle,
    ) -> CreditResult<IntrinsicIndexDataBundle> {
        if pufs.is_empty() {
            return Err(CreditError::invalid_quote("no index quotes supplied"));
        }
        if pufs.len() != cds_list.len() {
            return Err(CreditError::invalid_quote(format!(
                "{} quotes vs {} index instruments",
                pufs.len(),
                cds_list.len()
            )));
        }
        if pufs.len() == 1 {
            return self.adjust_curves(pufs[0], &cds_list[0], coupon, yield_curve, bundle);
        }
        for puf in pufs {
            validate_quote(*puf, coupon)?;
        }

        let maturities: Vec<f64> = cds_list.iter().map(CdsAnalytic::protection_end).collect();
        for (i, w) in maturities.windows(2).enumerate() {
            if w[1] <= w[0] {
                return Err(CreditError::invalid_instrument(format!(
                    "reference maturities not ascending at index {}: {} >= {}",
                    i + 1,
                    w[0],
                    w[1]
                )));
            }
        }

        // Resample every alive curve to carry a knot at each reference
        // maturity; existing breakpoints are preserved, not duplicated.
        let mut curves: Vec<Option<CreditCurve>> = Vec::with_capacity(bundle.len());
        for i in 0..bundle.len() {
            curves.push(match bundle.credit_curve(i) {
                Some(curve) => Some(resample(curve, &maturities)?),
                None => None,
            });
        }
        let working = bundle.with_credit_curves(curves)?;

        let mut adjusted = working;
        let mut x = 1.0;
        for (j, (&puf, cds)) in pufs.iter().zip(cds_list.iter()).enumerate() {
            let lo = if j == 0 { 0.0 } else { maturities[j - 1] };
            let hi = maturities[j];
            let target = puf * adjusted.index_factor();

            let bundle_ref = &adjusted;
            let objective = |x: f64| -> f64 {
                self.scaled_pv(cds, coupon, yield_curve, bundle_ref, |curve| {
                    scale_window(curve, x, lo, hi)
                }) - target
            };

            x = self
                .solve(&objective, x)
                .map_err(|e| CreditError::calibration_failed(j, e))?;
            debug!("index adjustment term {j}: window ({lo:.4}, {hi:.4}], x = {x:.10}");

            let scaled = scale_all(&adjusted, |curve| scale_window(curve, x, lo, hi))?;
            adjusted = adjusted.with_credit_curves(scaled)?;
        }

        Ok(adjusted)
    }

    /// Intrinsic index PV with every alive curve passed through a scaling
    /// transform. A transform failure poisons the value with NaN, which the
    /// solver reports as non-convergence.
    fn scaled_pv<F>(
        &self,
        cds: &CdsAnalytic,
        coupon: f64,
        yield_curve: &DiscountCurve,
        bundle: &IntrinsicIndexDataBundle,
        transform: F,
    ) -> f64
    where
        F: Fn(&CreditCurve) -> credix_curves::CurveResult<CreditCurve>,
    {
        let mut pv = 0.0;
        for i in 0..bundle.len() {
            let Some(curve) = bundle.credit_curve(i) else {
                continue;
            };
            let Ok(scaled) = transform(curve) else {
                return f64::NAN;
            };
            let constituent = cds.with_lgd(bundle.lgd(i));
            pv += bundle.weight(i)
                * self.pricer.single_name_pricer().pv(
                    &constituent,
                    coupon,
                    yield_curve,
                    &scaled,
                    PriceType::Clean,
                );
        }
        pv
    }

    /// Solves an adjustment objective: Newton from the seed, bracket+Brent
    /// as fallback.
    fn solve<F>(&self, objective: F, seed: f64) -> Result<f64, credix_math::MathError>
    where
        F: Fn(f64) -> f64,
    {
        if let Ok(result) = newton_raphson_numerical(&objective, seed, &self.solver) {
            if result.root.is_finite() {
                return Ok(result.root);
            }
        }
        let bracket_config = BracketConfig::default().with_lower_limit(0.0);
        let (a, b) = expand_bracket(&objective, seed, &bracket_config)?;
        Ok(brent(&objective, a, b, &self.solver)?.root)
    }
}

/// Validates an index quote and coupon before any solve attempt.
fn validate_quote(puf: f64, coupon: f64) -> CreditResult<()> {
    if puf > 1.0 || puf.is_nan() {
        return Err(CreditError::invalid_quote(format!(
            "points-upfront {puf} above 1.0"
        )));
    }
    if !(0.0..=1.0).contains(&coupon) {
        return Err(CreditError::invalid_quote(format!(
            "coupon {coupon} outside [0,1]"
        )));
    }
    Ok(())
}

/// Applies a curve transform to every alive name.
fn scale_all<F>(
    bundle: &IntrinsicIndexDataBundle,
    transform: F,
) -> CreditResult<Vec<Option<CreditCurve>>>
where
    F: Fn(&CreditCurve) -> credix_curves::CurveResult<CreditCurve>,
{
    let mut curves = Vec::with_capacity(bundle.len());
    for i in 0..bundle.len() {
        curves.push(match bundle.credit_curve(i) {
            Some(curve) => Some(transform(curve)?),
            None => None,
        });
    }
    Ok(curves)
}

/// Returns a curve with knots in the window `(lo, hi]` rescaled by `x`.
fn scale_window(
    curve: &CreditCurve,
    x: f64,
    lo: f64,
    hi: f64,
) -> credix_curves::CurveResult<CreditCurve> {
    let times = curve.nodes().times().to_vec();
    let rts: Vec<f64> = curve
        .nodes()
        .rts()
        .iter()
        .zip(times.iter())
        .map(|(&rt, &t)| {
            if t > lo + KNOT_TOLERANCE && t <= hi + KNOT_TOLERANCE {
                x * rt
            } else {
                rt
            }
        })
        .collect();
    CreditCurve::from_rt(times, rts)
}

/// Resamples a curve to include a knot at every reference maturity,
/// preserving the curve's exact value at all pre-existing knots.
fn resample(curve: &CreditCurve, maturities: &[f64]) -> credix_curves::CurveResult<CreditCurve> {
    let mut times = curve.nodes().times().to_vec();
    for &tm in maturities {
        if !times.iter().any(|&t| (t - tm).abs() < KNOT_TOLERANCE) {
            times.push(tm);
        }
    }
    if times.len() == curve.len() {
        return Ok(curve.clone());
    }
    times.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let rts: Vec<f64> = times.iter().map(|&t| curve.rt_at(t)).collect();
    CreditCurve::from_rt(times, rts)
}
