//! Piecewise node-based curve representation.
//!
//! Both the discount curve and the credit curve store `(time, value)` knot
//! pairs and interpolate linearly in the accumulated quantity `r·t`. For a
//! zero-rate curve this makes log-discount-factors piecewise linear; for a
//! hazard curve it makes log-survival-probabilities piecewise linear. Either
//! way the curve stays positive and continuous whenever the node values are
//! non-negative.

use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};

/// A piecewise curve with `(time, value)` knots, linear in `value·time`.
///
/// Node times are strictly ascending and positive. The stored value at a
/// knot is a rate-like quantity (continuously compounded zero rate, or
/// average hazard rate); the interpolated quantity is the product
/// `rt = value·time`.
///
/// Extrapolation:
/// - before the first knot, the first value is held flat (`rt = r₁·t`)
/// - after the last knot, the last segment's `rt` gradient is continued
///   (constant forward rate)
///
/// Every "mutation" returns a new curve; existing instances are never
/// modified, so sequential bootstrap steps can hold on to earlier curves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeCurve {
    times: Vec<f64>,
    values: Vec<f64>,
    rts: Vec<f64>,
}

impl NodeCurve {
    /// Creates a curve from `(time, value)` knot pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if the node set is empty, times are not strictly
    /// ascending and positive, or any value is not finite.
    pub fn new(nodes: &[(f64, f64)]) -> CurveResult<Self> {
        let times: Vec<f64> = nodes.iter().map(|&(t, _)| t).collect();
        let values: Vec<f64> = nodes.iter().map(|&(_, v)| v).collect();
        Self::from_values(times, values)
    }

    /// Creates a curve from separate time and value arrays.
    pub fn from_values(times: Vec<f64>, values: Vec<f64>) -> CurveResult<Self> {
        validate_nodes(&times, &values)?;
        let rts = times
            .iter()
            .zip(values.iter())
            .map(|(&t, &v)| t * v)
            .collect();
        Ok(Self { times, values, rts })
    }

    /// Creates a curve from times and accumulated quantities `rt = value·time`.
    ///
    /// This is the rebuild path used after inserting extra knots: the `rt`
    /// array is authoritative and node values are derived as `rt/t`.
    pub fn from_rt(times: Vec<f64>, rts: Vec<f64>) -> CurveResult<Self> {
        let values: Vec<f64> = times
            .iter()
            .zip(rts.iter())
            .map(|(&t, &rt)| rt / t)
            .collect();
        validate_nodes(&times, &values)?;
        Ok(Self { times, values, rts })
    }

    /// Returns the number of knots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns true if the curve has no knots (never true for a valid curve).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Returns the knot times.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Returns the knot values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the accumulated quantities `rt` at the knots.
    #[must_use]
    pub fn rts(&self) -> &[f64] {
        &self.rts
    }

    /// Returns the time of knot `i`.
    #[must_use]
    pub fn node_time(&self, i: usize) -> f64 {
        self.times[i]
    }

    /// Returns the value of knot `i`.
    #[must_use]
    pub fn node_value(&self, i: usize) -> f64 {
        self.values[i]
    }

    /// Returns `rt` at knot `i`.
    #[must_use]
    pub fn node_rt(&self, i: usize) -> f64 {
        self.rts[i]
    }

    /// Returns the time of the last knot.
    #[must_use]
    pub fn last_time(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// Returns the interpolated accumulated quantity `rt` at time `t`.
    #[must_use]
    pub fn rt_at(&self, t: f64) -> f64 {
        let n = self.times.len();

        if t <= self.times[0] {
            return self.values[0] * t;
        }
        if n == 1 {
            return self.values[0] * t;
        }
        if t >= self.times[n - 1] {
            // continue the last segment's gradient
            let (t0, t1) = (self.times[n - 2], self.times[n - 1]);
            let (rt0, rt1) = (self.rts[n - 2], self.rts[n - 1]);
            return rt1 + (t - t1) * (rt1 - rt0) / (t1 - t0);
        }

        let idx = match self
            .times
            .binary_search_by(|probe| probe.partial_cmp(&t).unwrap())
        {
            Ok(exact) => return self.rts[exact],
            Err(insertion) => insertion,
        };

        let (t0, t1) = (self.times[idx - 1], self.times[idx]);
        let (rt0, rt1) = (self.rts[idx - 1], self.rts[idx]);
        ((t1 - t) * rt0 + (t - t0) * rt1) / (t1 - t0)
    }

    /// Returns the interpolated node value (zero rate / average hazard) at `t`.
    #[must_use]
    pub fn value_at(&self, t: f64) -> f64 {
        if t <= self.times[0] {
            return self.values[0];
        }
        self.rt_at(t) / t
    }

    /// Returns `exp(-rt(t))` — the discount factor or survival probability.
    #[must_use]
    pub fn exp_factor(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 1.0;
        }
        (-self.rt_at(t)).exp()
    }

    /// Returns the implied forward rate on the segment ending at knot `i`.
    ///
    /// For `i == 0` this is the first node value (the flat region before the
    /// first knot).
    #[must_use]
    pub fn forward_rate(&self, i: usize) -> f64 {
        if i == 0 {
            return self.values[0];
        }
        (self.rts[i] - self.rts[i - 1]) / (self.times[i] - self.times[i - 1])
    }

    /// Returns a new curve with the value at knot `i` replaced.
    #[must_use]
    pub fn with_value(&self, i: usize, value: f64) -> Self {
        let mut new = self.clone();
        new.values[i] = value;
        new.rts[i] = value * new.times[i];
        new
    }

    /// Returns a new curve with `rt` at knot `i` replaced.
    #[must_use]
    pub fn with_rt(&self, i: usize, rt: f64) -> Self {
        let mut new = self.clone();
        new.rts[i] = rt;
        new.values[i] = rt / new.times[i];
        new
    }

    /// Re-expresses the curve relative to a new base date.
    ///
    /// `offset` is the time of the new base measured from the old base
    /// (positive when the new base is later). Discount factors between any
    /// two dates after the new base are preserved:
    /// `RT'(t) = RT(t + offset) − RT(offset)`.
    ///
    /// Knots at or before the new base are dropped; if the new base lies at
    /// or beyond the last knot, a single nominal knot at `t = 1` carrying
    /// the final rate is synthesized. A negative offset extends the flat
    /// short end backward.
    pub fn rebased(&self, offset: f64) -> CurveResult<Self> {
        if offset == 0.0 {
            return Ok(self.clone());
        }

        let n = self.times.len();
        if offset >= self.times[n - 1] {
            let rate = self.forward_rate(n - 1);
            return Self::from_values(vec![1.0], vec![rate]);
        }

        let rt_offset = self.rt_at(offset);
        let mut times = Vec::with_capacity(n);
        let mut rts = Vec::with_capacity(n);
        for i in 0..n {
            if self.times[i] <= offset {
                continue;
            }
            times.push(self.times[i] - offset);
            rts.push(self.rts[i] - rt_offset);
        }
        Self::from_rt(times, rts)
    }
}

/// Validates knot arrays: non-empty, strictly ascending positive times,
/// finite values.
fn validate_nodes(times: &[f64], values: &[f64]) -> CurveResult<()> {
    if times.is_empty() {
        return Err(CurveError::EmptyCurve);
    }
    if times.len() != values.len() {
        return Err(CurveError::invalid_value(format!(
            "times and values must have same length: {} vs {}",
            times.len(),
            values.len()
        )));
    }
    if times[0] <= 0.0 {
        return Err(CurveError::invalid_value(format!(
            "first node time must be positive, got {}",
            times[0]
        )));
    }
    for i in 1..times.len() {
        if times[i] <= times[i - 1] {
            return Err(CurveError::non_ascending_times(i, times[i - 1], times[i]));
        }
    }
    for (i, &v) in values.iter().enumerate() {
        if !v.is_finite() {
            return Err(CurveError::invalid_value(format!(
                "non-finite value {v} at node {i}"
            )));
        }
    }
    Ok(())
}
