//! Root-finding algorithms.
//!
//! This module provides the scalar solvers used by every calibration step:
//!
//! - [`newton_raphson`]: Fast quadratic convergence when a derivative is available
//! - [`newton_raphson_numerical`]: Newton with a central-difference derivative
//! - [`brent`]: Robust bracketing method combining bisection, secant, and
//!   inverse quadratic interpolation
//! - [`expand_bracket`]: Outward search for a sign change around a guess
//!
//! # Choosing a Solver
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Newton-Raphson | Fastest (quadratic) | May diverge | Derivative |
//! | Brent | Fast (superlinear) | Guaranteed | Bracket |
//!
//! Bootstrap steps typically combine the two: [`expand_bracket`] from an
//! initial guess, Newton inside the bracket, Brent as the fallback when the
//! Newton iterate escapes.

mod bracket;
mod brent;
mod newton;

pub use bracket::{expand_bracket, BracketConfig};
pub use brent::brent;
pub use newton::{newton_raphson, newton_raphson_numerical};

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-12;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Tolerance for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_solver_config() {
        let config = SolverConfig::default()
            .with_tolerance(1e-8)
            .with_max_iterations(50);

        assert!((config.tolerance - 1e-8).abs() < f64::EPSILON);
        assert_eq!(config.max_iterations, 50);
    }

    #[test]
    fn test_bracket_then_brent() {
        let f = |x: f64| x * x - 2.0;

        let (a, b) = expand_bracket(f, 1.0, &BracketConfig::default()).unwrap();
        let result = brent(f, a, b, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_newton_and_brent_agree() {
        // Par-spread-like objective: decreasing and smooth in the rate
        let f = |x: f64| (-x * 5.0).exp() - 0.8;
        let df = |x: f64| -5.0 * (-x * 5.0).exp();
        let config = SolverConfig::default();

        let newton = newton_raphson(f, df, 0.05, &config).unwrap();
        let brent_result = brent(f, 0.0, 0.2, &config).unwrap();

        assert_relative_eq!(newton.root, brent_result.root, epsilon = 1e-10);
    }
}
