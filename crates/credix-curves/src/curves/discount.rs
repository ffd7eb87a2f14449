//! Discount (zero-rate) curve.

use serde::{Deserialize, Serialize};

use crate::error::CurveResult;
use crate::node_curve::NodeCurve;

/// A discount curve storing continuously compounded zero rates.
///
/// Thin wrapper over [`NodeCurve`]: node values are zero rates, the
/// accumulated quantity is `r·t`, and `exp(-r·t)` is the discount factor.
///
/// # Example
///
/// ```rust
/// use credix_curves::DiscountCurve;
///
/// let curve = DiscountCurve::from_zero_rates(&[(1.0, 0.02), (5.0, 0.03)]).unwrap();
/// let df = curve.discount_factor(2.0);
/// assert!(df > 0.0 && df < 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountCurve {
    nodes: NodeCurve,
}

impl DiscountCurve {
    /// Creates a discount curve from `(time, zero rate)` knot pairs.
    pub fn from_zero_rates(nodes: &[(f64, f64)]) -> CurveResult<Self> {
        Ok(Self {
            nodes: NodeCurve::new(nodes)?,
        })
    }

    /// Creates a flat discount curve at a single zero rate.
    pub fn flat(rate: f64) -> CurveResult<Self> {
        Self::from_zero_rates(&[(1.0, rate)])
    }

    /// Creates a discount curve from an existing node curve.
    #[must_use]
    pub fn from_nodes(nodes: NodeCurve) -> Self {
        Self { nodes }
    }

    /// Returns the discount factor at time `t` (years from the base date).
    #[must_use]
    pub fn discount_factor(&self, t: f64) -> f64 {
        self.nodes.exp_factor(t)
    }

    /// Returns the zero rate at time `t`.
    #[must_use]
    pub fn zero_rate(&self, t: f64) -> f64 {
        self.nodes.value_at(t)
    }

    /// Returns the accumulated quantity `r·t` at time `t`.
    #[must_use]
    pub fn rt_at(&self, t: f64) -> f64 {
        self.nodes.rt_at(t)
    }

    /// Returns the underlying node curve.
    #[must_use]
    pub fn nodes(&self) -> &NodeCurve {
        &self.nodes
    }

    /// Re-expresses the curve relative to a new base date.
    ///
    /// See [`NodeCurve::rebased`] for the offset convention.
    pub fn rebased(&self, offset: f64) -> CurveResult<Self> {
        Ok(Self {
            nodes: self.nodes.rebased(offset)?,
        })
    }
}
