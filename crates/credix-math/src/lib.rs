//! # Credix Math
//!
//! Numerical utilities for the Credix credit analytics library.
//!
//! This crate provides:
//!
//! - **Solvers**: Scalar root-finding (Newton-Raphson, Brent) with an
//!   expanding bracket search, reused by every calibration step
//! - **Epsilon functions**: numerically stable `(e^x - 1)/x` family used by
//!   the closed-form credit integrals
//!
//! All solvers operate on plain `f64 -> f64` closures and report structured
//! errors on non-convergence; there is no internal shared state, so
//! independent calibrations can run concurrently.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::uninlined_format_args)]

pub mod epsilon;
pub mod error;
pub mod solvers;

pub use epsilon::{epsilon, epsilon_p};
pub use error::{MathError, MathResult};
pub use solvers::{SolverConfig, SolverResult};
