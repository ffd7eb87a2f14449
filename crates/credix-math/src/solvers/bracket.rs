//! Expanding bracket search.
//!
//! Bootstrap objectives are solved from a guess carried over from the
//! previous node, so a sign-changing interval is rarely known in advance.
//! The search starts from a band around the guess and widens it
//! geometrically until the function changes sign.

use log::trace;

use crate::error::{MathError, MathResult};

/// Configuration for the expanding bracket search.
#[derive(Debug, Clone, Copy)]
pub struct BracketConfig {
    /// Initial half-width as a fraction of the guess (0.25 = ±25%).
    pub initial_fraction: f64,
    /// Absolute initial half-width used when the guess is near zero.
    pub initial_width: f64,
    /// Geometric expansion ratio per attempt.
    pub expansion: f64,
    /// Maximum number of expansion attempts.
    pub max_attempts: u32,
    /// Optional hard lower limit for the bracket (e.g. a log-domain floor).
    pub lower_limit: Option<f64>,
}

impl Default for BracketConfig {
    fn default() -> Self {
        Self {
            initial_fraction: 0.25,
            initial_width: 0.01,
            expansion: 1.6,
            max_attempts: 50,
            lower_limit: None,
        }
    }
}

impl BracketConfig {
    /// Sets a hard lower limit for the bracket.
    #[must_use]
    pub fn with_lower_limit(mut self, limit: f64) -> Self {
        self.lower_limit = Some(limit);
        self
    }
}

/// Searches outward from `guess` for an interval where `f` changes sign.
///
/// The initial interval is `guess ± initial_fraction·|guess|` (or
/// `± initial_width` for a near-zero guess); each attempt widens both ends
/// by the expansion ratio, respecting the configured lower limit.
///
/// # Returns
///
/// A pair `(a, b)` with `f(a) * f(b) <= 0`, suitable for a bracketing
/// solver.
///
/// # Errors
///
/// Returns `MathError::BracketNotFound` if the attempt budget is exhausted
/// without a sign change.
///
/// # Example
///
/// ```rust
/// use credix_math::solvers::{expand_bracket, BracketConfig};
///
/// let f = |x: f64| x * x - 2.0;
/// let (a, b) = expand_bracket(f, 1.0, &BracketConfig::default()).unwrap();
/// assert!(f(a) * f(b) <= 0.0);
/// ```
pub fn expand_bracket<F>(f: F, guess: f64, config: &BracketConfig) -> MathResult<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    let half = if guess.abs() > 1e-12 {
        config.initial_fraction * guess.abs()
    } else {
        config.initial_width
    };

    let clamp = |x: f64| match config.lower_limit {
        Some(limit) => x.max(limit),
        None => x,
    };

    let mut a = clamp(guess - half);
    let mut b = guess + half;
    let mut fa = f(a);
    let mut fb = f(b);

    for attempt in 0..config.max_attempts {
        if fa * fb <= 0.0 {
            trace!("bracket found after {attempt} expansions: [{a}, {b}]");
            return Ok((a, b));
        }

        // Widen the end whose value is closer to zero; widening both is
        // wasteful when the root lies far to one side.
        if fa.abs() < fb.abs() {
            a = clamp(a - config.expansion * (b - a));
            fa = f(a);
        } else {
            b += config.expansion * (b - a);
            fb = f(b);
        }
    }

    Err(MathError::BracketNotFound {
        attempts: config.max_attempts,
        guess,
        a,
        b,
    })
}
