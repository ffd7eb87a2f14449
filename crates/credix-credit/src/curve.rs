//! Credit (hazard rate) curve.

use serde::{Deserialize, Serialize};

use credix_curves::{CurveResult, NodeCurve};

/// A piecewise credit curve storing average hazard rates.
///
/// Thin wrapper over [`NodeCurve`]: the node value at time `t` is the
/// average hazard rate `h̄(t)`, so the accumulated quantity is the hazard
/// integral `Λ(t) = t·h̄(t) = -ln S(t)`. Interpolation is linear in `Λ`,
/// which keeps the survival probability continuous and positive.
///
/// # Example
///
/// ```rust
/// use credix_credit::CreditCurve;
///
/// let curve = CreditCurve::flat(5.0, 0.016).unwrap();
/// let sp = curve.survival_probability(5.0);
/// assert!((sp - (-0.08f64).exp()).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCurve {
    nodes: NodeCurve,
}

impl CreditCurve {
    /// Creates a credit curve from `(time, average hazard)` knot pairs.
    pub fn from_hazard_rates(nodes: &[(f64, f64)]) -> CurveResult<Self> {
        Ok(Self {
            nodes: NodeCurve::new(nodes)?,
        })
    }

    /// Creates a single-knot (flat hazard) curve.
    pub fn flat(t: f64, hazard_rate: f64) -> CurveResult<Self> {
        Self::from_hazard_rates(&[(t, hazard_rate)])
    }

    /// Creates a credit curve from times and accumulated hazard `Λ` values.
    ///
    /// This is the rebuild path used after inserting extra knots.
    pub fn from_rt(times: Vec<f64>, rts: Vec<f64>) -> CurveResult<Self> {
        Ok(Self {
            nodes: NodeCurve::from_rt(times, rts)?,
        })
    }

    /// Creates a credit curve from an existing node curve.
    #[must_use]
    pub fn from_nodes(nodes: NodeCurve) -> Self {
        Self { nodes }
    }

    /// Returns the survival probability `S(t) = exp(-Λ(t))`.
    #[must_use]
    pub fn survival_probability(&self, t: f64) -> f64 {
        self.nodes.exp_factor(t)
    }

    /// Returns the accumulated hazard `Λ(t)`.
    #[must_use]
    pub fn rt_at(&self, t: f64) -> f64 {
        self.nodes.rt_at(t)
    }

    /// Returns the average hazard rate `h̄(t) = Λ(t)/t`.
    #[must_use]
    pub fn hazard_rate(&self, t: f64) -> f64 {
        self.nodes.value_at(t)
    }

    /// Returns the implied forward hazard rate on the segment ending at
    /// knot `i`.
    #[must_use]
    pub fn forward_hazard_rate(&self, i: usize) -> f64 {
        self.nodes.forward_rate(i)
    }

    /// Returns the number of knots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the curve has no knots (never true for a valid curve).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the underlying node curve.
    #[must_use]
    pub fn nodes(&self) -> &NodeCurve {
        &self.nodes
    }

    /// Returns a new curve with every accumulated hazard scaled by `x`.
    ///
    /// `Λ(t) ↦ x·Λ(t)` at every knot; used by the index adjustment.
    pub fn scaled(&self, x: f64) -> CurveResult<Self> {
        let rts: Vec<f64> = self.nodes.rts().iter().map(|&rt| x * rt).collect();
        Self::from_rt(self.nodes.times().to_vec(), rts)
    }
}
