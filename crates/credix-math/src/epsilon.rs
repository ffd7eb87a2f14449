//! Numerically stable `(e^x - 1)/x` family.
//!
//! The closed-form integrals of the standard credit model repeatedly divide
//! differences of exponentials by small exponents. Direct evaluation loses
//! precision as the exponent approaches zero, so these helpers switch to a
//! Taylor expansion below a per-function cutoff.

/// Cutoff for [`epsilon`]; below this the expansion is exact to machine
/// precision and avoids 0/0 at zero.
const EPSILON_CUTOFF: f64 = 1e-10;

/// Cutoff for [`epsilon_p`]. The direct form divides an `O(x²)` difference
/// by `x²`, so cancellation error grows like `1/x`; the expansion takes
/// over well before that matters.
const EPSILON_P_CUTOFF: f64 = 1e-3;

/// Computes `(e^x - 1) / x` with full precision near zero.
///
/// # Example
///
/// ```rust
/// use credix_math::epsilon;
///
/// assert!((epsilon(0.0) - 1.0).abs() < 1e-15);
/// assert!((epsilon(1.0) - (1f64.exp() - 1.0)).abs() < 1e-15);
/// ```
#[must_use]
pub fn epsilon(x: f64) -> f64 {
    if x.abs() > EPSILON_CUTOFF {
        return x.exp_m1() / x;
    }
    1.0 + x * (0.5 + x / 6.0)
}

/// Computes `(e^x - 1 - x) / x^2` with full precision near zero.
#[must_use]
pub fn epsilon_p(x: f64) -> f64 {
    if x.abs() > EPSILON_P_CUTOFF {
        return (x.exp_m1() - x) / (x * x);
    }
    0.5 + x * (1.0 / 6.0 + x * (1.0 / 24.0 + x / 120.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_epsilon_at_zero() {
        assert_relative_eq!(epsilon(0.0), 1.0, epsilon = 1e-15);
        assert_relative_eq!(epsilon_p(0.0), 0.5, epsilon = 1e-15);
    }

    #[test]
    fn test_epsilon_matches_direct_formula() {
        for &x in &[-2.0, -0.5, -0.01, 0.01, 0.5, 2.0] {
            assert_relative_eq!(epsilon(x), (x.exp() - 1.0) / x, max_relative = 1e-12);
            assert_relative_eq!(
                epsilon_p(x),
                (x.exp() - 1.0 - x) / (x * x),
                max_relative = 1e-10
            );
        }
    }

    #[test]
    fn test_epsilon_continuous_across_cutoff() {
        let below = epsilon(EPSILON_CUTOFF * 0.99);
        let above = epsilon(EPSILON_CUTOFF * 1.01);
        assert_relative_eq!(below, above, max_relative = 1e-12);

        let below_p = epsilon_p(EPSILON_P_CUTOFF * 0.99);
        let above_p = epsilon_p(EPSILON_P_CUTOFF * 1.01);
        assert_relative_eq!(below_p, above_p, max_relative = 1e-10);
    }

    #[test]
    fn test_epsilon_small_argument_series_values() {
        // At x = 1e-6 the series is exact to machine precision
        let x = 1e-6;
        assert_relative_eq!(epsilon(x), 1.0 + x / 2.0 + x * x / 6.0, max_relative = 1e-15);
        assert_relative_eq!(epsilon_p(x), 0.5 + x / 6.0, max_relative = 1e-12);
    }
}
