//! Immutable snapshot of an index basket.

use serde::{Deserialize, Serialize};

use crate::curve::CreditCurve;
use crate::error::{CreditError, CreditResult};

/// Tolerance for the weight-sum invariant.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-12;

/// Immutable per-name data for an index basket.
///
/// Holds, for each of the `N` names at inception: its weight (summing to 1
/// across the basket), loss-given-default, credit curve (absent exactly
/// when the name has defaulted), and the aggregate default count and index
/// factor. Every mutator returns a new bundle; an instance is never altered
/// after construction, so bundles can be shared freely across pricing
/// calls.
///
/// # Example
///
/// ```rust
/// use credix_credit::{CreditCurve, IntrinsicIndexDataBundle};
///
/// let curves = vec![
///     CreditCurve::flat(5.0, 0.01).unwrap(),
///     CreditCurve::flat(5.0, 0.02).unwrap(),
/// ];
/// let bundle = IntrinsicIndexDataBundle::new(curves, &[0.4, 0.4]).unwrap();
///
/// assert_eq!(bundle.len(), 2);
/// assert!((bundle.index_factor() - 1.0).abs() < 1e-15);
///
/// let after = bundle.with_default(0).unwrap();
/// assert_eq!(after.num_defaults(), 1);
/// assert!((after.index_factor() - 0.5).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntrinsicIndexDataBundle {
    weights: Vec<f64>,
    lgds: Vec<f64>,
    credit_curves: Vec<Option<CreditCurve>>,
    num_defaults: usize,
    index_factor: f64,
}

impl IntrinsicIndexDataBundle {
    /// Creates a bundle with equal weights and no defaulted names.
    ///
    /// # Arguments
    ///
    /// * `credit_curves` - one calibrated curve per name
    /// * `recoveries` - one recovery rate per name (`lgd = 1 - recovery`)
    pub fn new(credit_curves: Vec<CreditCurve>, recoveries: &[f64]) -> CreditResult<Self> {
        let n = credit_curves.len();
        let weights = vec![1.0 / n as f64; n];
        Self::with_weights(credit_curves, recoveries, weights)
    }

    /// Creates a bundle with explicit weights and no defaulted names.
    pub fn with_weights(
        credit_curves: Vec<CreditCurve>,
        recoveries: &[f64],
        weights: Vec<f64>,
    ) -> CreditResult<Self> {
        let curves = credit_curves.into_iter().map(Some).collect();
        Self::from_parts(curves, recoveries, weights)
    }

    /// Creates a bundle with explicit weights and a defaulted-name set.
    ///
    /// Defaulted names must carry no curve (`None`); alive names must carry
    /// one.
    pub fn from_parts(
        credit_curves: Vec<Option<CreditCurve>>,
        recoveries: &[f64],
        weights: Vec<f64>,
    ) -> CreditResult<Self> {
        let n = credit_curves.len();
        if n == 0 {
            return Err(CreditError::invalid_bundle("empty basket"));
        }
        if recoveries.len() != n || weights.len() != n {
            return Err(CreditError::invalid_bundle(format!(
                "length mismatch: {} curves, {} recoveries, {} weights",
                n,
                recoveries.len(),
                weights.len()
            )));
        }

        let mut lgds = Vec::with_capacity(n);
        for (i, &recovery) in recoveries.iter().enumerate() {
            if !(0.0..=1.0).contains(&recovery) {
                return Err(CreditError::invalid_bundle(format!(
                    "recovery {recovery} outside [0,1] for name {i}"
                )));
            }
            lgds.push(1.0 - recovery);
        }

        let mut sum = 0.0;
        for (i, &w) in weights.iter().enumerate() {
            if w <= 0.0 {
                return Err(CreditError::invalid_bundle(format!(
                    "non-positive weight {w} for name {i}"
                )));
            }
            sum += w;
        }
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(CreditError::invalid_bundle(format!(
                "weights sum to {sum}, expected 1 within {WEIGHT_SUM_TOLERANCE:.0e}"
            )));
        }

        let mut num_defaults = 0;
        let mut index_factor = 0.0;
        for (i, curve) in credit_curves.iter().enumerate() {
            if curve.is_some() {
                index_factor += weights[i];
            } else {
                num_defaults += 1;
            }
        }

        Ok(Self {
            weights,
            lgds,
            credit_curves,
            num_defaults,
            index_factor,
        })
    }

    /// Returns the number of names at inception.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns true if the basket is empty (never true for a valid bundle).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Returns the weight of name `i`.
    #[must_use]
    pub fn weight(&self, i: usize) -> f64 {
        self.weights[i]
    }

    /// Returns the loss-given-default of name `i`.
    #[must_use]
    pub fn lgd(&self, i: usize) -> f64 {
        self.lgds[i]
    }

    /// Returns the credit curve of name `i`, absent when defaulted.
    #[must_use]
    pub fn credit_curve(&self, i: usize) -> Option<&CreditCurve> {
        self.credit_curves[i].as_ref()
    }

    /// Returns true if name `i` has defaulted.
    #[must_use]
    pub fn is_defaulted(&self, i: usize) -> bool {
        self.credit_curves[i].is_none()
    }

    /// Returns the number of defaulted names.
    #[must_use]
    pub fn num_defaults(&self) -> usize {
        self.num_defaults
    }

    /// Returns the remaining weight of non-defaulted names.
    #[must_use]
    pub fn index_factor(&self) -> f64 {
        self.index_factor
    }

    /// Returns a new bundle with name `i` defaulted.
    ///
    /// # Errors
    ///
    /// Rejects out-of-range indices and names that are already defaulted.
    pub fn with_default(&self, i: usize) -> CreditResult<Self> {
        self.with_defaults(&[i])
    }

    /// Returns a new bundle with several names defaulted in one update.
    ///
    /// # Errors
    ///
    /// Rejects out-of-range indices, already-defaulted names, and duplicate
    /// indices within the call.
    pub fn with_defaults(&self, indices: &[usize]) -> CreditResult<Self> {
        let mut new = self.clone();
        for &i in indices {
            if i >= new.len() {
                return Err(CreditError::IndexOutOfRange {
                    index: i,
                    len: new.len(),
                });
            }
            if new.credit_curves[i].is_none() {
                return Err(CreditError::AlreadyDefaulted { index: i });
            }
            new.credit_curves[i] = None;
            new.num_defaults += 1;
            new.index_factor -= new.weights[i];
        }
        Ok(new)
    }

    /// Returns a new bundle with every name's curve replaced in one step.
    ///
    /// Used after a global hazard-rate rescaling. The replacement must
    /// preserve the alive/defaulted pattern: a curve for every alive name,
    /// none for defaulted names.
    pub fn with_credit_curves(&self, curves: Vec<Option<CreditCurve>>) -> CreditResult<Self> {
        if curves.len() != self.len() {
            return Err(CreditError::invalid_bundle(format!(
                "expected {} curves, got {}",
                self.len(),
                curves.len()
            )));
        }
        for (i, (old, new)) in self.credit_curves.iter().zip(curves.iter()).enumerate() {
            match (old, new) {
                (Some(_), None) => {
                    return Err(CreditError::invalid_bundle(format!(
                        "missing curve for alive name {i}"
                    )));
                }
                (None, Some(_)) => {
                    return Err(CreditError::invalid_bundle(format!(
                        "curve supplied for defaulted name {i}"
                    )));
                }
                _ => {}
            }
        }

        let mut bundle = self.clone();
        bundle.credit_curves = curves;
        Ok(bundle)
    }
}
