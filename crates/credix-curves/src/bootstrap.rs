//! Sequential discount-curve bootstrap.
//!
//! Builds a zero-rate curve from money-market deposits and par swaps, one
//! node at a time in ascending maturity order. Deposit nodes are solved in
//! closed form; swap nodes by a 1-D root-find on the node's zero rate, with
//! already-fixed cashflows cached so each solver iteration only reprices the
//! tail of the swap.

use log::debug;

use credix_core::daycounts::DayCountConvention;
use credix_core::Date;
use credix_math::solvers::{
    brent, expand_bracket, newton_raphson, BracketConfig, SolverConfig,
};

use crate::curves::DiscountCurve;
use crate::error::{CurveError, CurveResult};
use crate::instruments::CurveInstrument;
use crate::node_curve::NodeCurve;

/// Sequential bootstrap for the discount curve.
///
/// The curve is built relative to its spot date. When a distinct curve
/// spot date is configured, the finished curve is re-expressed relative to
/// the valuation date so that downstream pricing measures all times from
/// one base.
///
/// Each call to [`build`](Self::build) is self-contained: all scratch state
/// (year fractions, cashflow schedules, cached partial sums) lives in the
/// call, so independent builds can run concurrently.
///
/// # Example
///
/// ```rust,ignore
/// let curve = DiscountCurveBootstrap::new(valuation_date)
///     .with_curve_spot_date(spot_date)
///     .build(&instruments, &rates)?;
/// ```
#[derive(Debug, Clone)]
pub struct DiscountCurveBootstrap {
    /// Valuation date the finished curve is based on.
    valuation_date: Date,
    /// Spot date the instruments are quoted relative to (defaults to the
    /// valuation date).
    curve_spot_date: Option<Date>,
    /// Day count for the curve time axis (default ACT/365F).
    curve_day_count: DayCountConvention,
    /// Root-finder configuration for swap nodes.
    solver: SolverConfig,
}

impl DiscountCurveBootstrap {
    /// Creates a bootstrap anchored at a valuation date.
    #[must_use]
    pub fn new(valuation_date: Date) -> Self {
        Self {
            valuation_date,
            curve_spot_date: None,
            curve_day_count: DayCountConvention::Act365Fixed,
            solver: SolverConfig::default().with_tolerance(1e-14),
        }
    }

    /// Sets a curve spot date distinct from the valuation date.
    #[must_use]
    pub fn with_curve_spot_date(mut self, spot_date: Date) -> Self {
        self.curve_spot_date = Some(spot_date);
        self
    }

    /// Sets the curve time-axis day count.
    #[must_use]
    pub fn with_curve_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.curve_day_count = day_count;
        self
    }

    /// Sets the root-finder configuration.
    #[must_use]
    pub fn with_solver_config(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Builds the discount curve from instruments and their par rates.
    ///
    /// Instruments must be supplied in strictly ascending pillar order with
    /// one rate per instrument.
    ///
    /// # Errors
    ///
    /// - `MismatchedLengths` / `InvalidInstrument` for malformed input
    /// - `NonAscendingTimes` when pillar dates are out of order
    /// - `BootstrapFailed` when a swap node's root-find does not converge
    pub fn build(
        &self,
        instruments: &[CurveInstrument],
        rates: &[f64],
    ) -> CurveResult<DiscountCurve> {
        if instruments.is_empty() {
            return Err(CurveError::invalid_instrument(
                "no instruments provided for bootstrap",
            ));
        }
        if instruments.len() != rates.len() {
            return Err(CurveError::MismatchedLengths {
                instruments: instruments.len(),
                rates: rates.len(),
            });
        }

        let spot = self.curve_spot_date.unwrap_or(self.valuation_date);

        // Pillar times measured from the spot date
        let pillar_times: Vec<f64> = instruments
            .iter()
            .map(|inst| self.year_fraction(spot, inst.pillar_date()))
            .collect();

        for (i, w) in pillar_times.windows(2).enumerate() {
            if w[1] <= w[0] {
                return Err(CurveError::non_ascending_times(i + 1, w[0], w[1]));
            }
        }
        if pillar_times[0] <= 0.0 {
            return Err(CurveError::invalid_instrument(
                "first pillar must mature after the curve spot date",
            ));
        }

        let mut times: Vec<f64> = Vec::with_capacity(instruments.len());
        let mut values: Vec<f64> = Vec::with_capacity(instruments.len());
        let mut rts: Vec<f64> = Vec::with_capacity(instruments.len());

        for (k, (instrument, &rate)) in instruments.iter().zip(rates.iter()).enumerate() {
            let t = pillar_times[k];
            let z = match instrument {
                CurveInstrument::Deposit(deposit) => deposit.implied_zero_rate(rate, t)?,
                CurveInstrument::Swap(swap) => {
                    let payments: Vec<(f64, f64)> = swap
                        .fixed_payments()?
                        .iter()
                        .map(|&(date, yf)| (self.year_fraction(spot, date), rate * yf))
                        .collect();
                    self.solve_swap_node(&times, &rts, t, &payments)
                        .map_err(|e| CurveError::bootstrap_failed(instrument.description(), e))?
                }
            };
            debug!("bootstrap node {k}: t = {t:.6}, zero rate = {z:.8}");
            times.push(t);
            values.push(z);
            rts.push(z * t);
        }

        let curve = DiscountCurve::from_nodes(NodeCurve::from_values(times, values)?);

        // Re-express relative to the valuation date when the instruments
        // were quoted off a different spot date.
        let offset = self.year_fraction(spot, self.valuation_date);
        if offset == 0.0 {
            Ok(curve)
        } else {
            curve.rebased(offset)
        }
    }

    /// Solves the zero rate of the swap node at time `t`.
    ///
    /// `times`/`rts` hold the already-calibrated knots. `payments` are the
    /// fixed leg `(time, cashflow)` pairs including the final one at `t`.
    /// The repricing condition is `Σ cᵢ·DF(uᵢ) + DF(t_n) − 1 = 0`; cashflows
    /// at or before the previous knot are priced once and cached.
    fn solve_swap_node(
        &self,
        times: &[f64],
        rts: &[f64],
        t: f64,
        payments: &[(f64, f64)],
    ) -> Result<f64, credix_math::MathError> {
        let k = times.len();
        let prev_t = if k == 0 { 0.0 } else { times[k - 1] };
        let prev_rt = if k == 0 { 0.0 } else { rts[k - 1] };

        // Fixed partial sum: cashflows that only touch calibrated knots
        let fixed_curve = if k == 0 {
            None
        } else {
            Some(NodeCurve::from_rt(times.to_vec(), rts.to_vec()).expect("calibrated knots valid"))
        };
        let mut cached = 0.0;
        let mut live: Vec<(f64, f64)> = Vec::with_capacity(payments.len());
        for &(u, c) in payments {
            if u <= prev_t {
                let rt = fixed_curve
                    .as_ref()
                    .map_or(0.0, |curve| curve.rt_at(u));
                cached += c * (-rt).exp();
            } else {
                live.push((u, c));
            }
        }

        // rt(u) and its z-sensitivity inside (prev_t, t] when knot k has
        // value z: linear interpolation against the previous knot, or a
        // straight ray from the origin for the first node.
        let seg = t - prev_t;
        let rt_and_slope = move |u: f64, z: f64| -> (f64, f64) {
            if k == 0 {
                (z * u, u)
            } else {
                let w = (u - prev_t) / seg;
                ((1.0 - w) * prev_rt + w * z * t, w * t)
            }
        };

        let objective = |z: f64| -> f64 {
            let mut pv = cached;
            for &(u, c) in &live {
                let (rt, _) = rt_and_slope(u, z);
                pv += c * (-rt).exp();
            }
            let (rt_n, _) = rt_and_slope(t, z);
            pv + (-rt_n).exp() - 1.0
        };

        let gradient = |z: f64| -> f64 {
            let mut grad = 0.0;
            for &(u, c) in &live {
                let (rt, slope) = rt_and_slope(u, z);
                grad -= c * slope * (-rt).exp();
            }
            let (rt_n, slope_n) = rt_and_slope(t, z);
            grad - slope_n * (-rt_n).exp()
        };

        let guess = if k == 0 { 0.0 } else { rts[k - 1] / times[k - 1] };

        // The objective is strictly decreasing in z, so the bracketed root is
        // unique; Newton from the bracket midpoint converges or Brent takes
        // over on the bracket.
        let (a, b) = expand_bracket(objective, guess, &BracketConfig::default())?;
        match newton_raphson(objective, gradient, 0.5 * (a + b), &self.solver) {
            Ok(result) => Ok(result.root),
            Err(_) => Ok(brent(objective, a, b, &self.solver)?.root),
        }
    }

    /// Curve time between two dates under the curve day count.
    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.curve_day_count.year_fraction_f64(start, end)
    }
}
