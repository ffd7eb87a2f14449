//! Error types for curve operations.
//!
//! This module provides error handling for curve construction,
//! interpolation, and bootstrap calibration.

use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone)]
pub enum CurveError {
    /// Curve has no nodes.
    #[error("Curve must have at least one node")]
    EmptyCurve,

    /// Node times are not strictly ascending.
    #[error("Non-ascending node times at index {index}: {prev:.6} >= {current:.6}")]
    NonAscendingTimes {
        /// Index where monotonicity violation occurred.
        index: usize,
        /// Previous time value.
        prev: f64,
        /// Current time value.
        current: f64,
    },

    /// Invalid value (NaN, Inf, or domain error).
    #[error("Invalid value: {reason}")]
    InvalidValue {
        /// Description of why the value is invalid.
        reason: String,
    },

    /// Invalid calibration instrument.
    #[error("Invalid instrument: {reason}")]
    InvalidInstrument {
        /// Description of what's wrong with the instrument.
        reason: String,
    },

    /// Instrument and rate arrays have different lengths.
    #[error("Mismatched lengths: {instruments} instruments vs {rates} rates")]
    MismatchedLengths {
        /// Number of instruments supplied.
        instruments: usize,
        /// Number of rates supplied.
        rates: usize,
    },

    /// Bootstrap failed for a specific instrument.
    #[error("Bootstrap failed for {instrument}: {source}")]
    BootstrapFailed {
        /// Description of the instrument that failed.
        instrument: String,
        /// The underlying solver error.
        source: credix_math::MathError,
    },

    /// Error from the core date/schedule layer.
    #[error(transparent)]
    Core(#[from] credix_core::CoreError),
}

impl CurveError {
    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }

    /// Creates an invalid instrument error.
    #[must_use]
    pub fn invalid_instrument(reason: impl Into<String>) -> Self {
        Self::InvalidInstrument {
            reason: reason.into(),
        }
    }

    /// Creates a non-ascending times error.
    #[must_use]
    pub fn non_ascending_times(index: usize, prev: f64, current: f64) -> Self {
        Self::NonAscendingTimes {
            index,
            prev,
            current,
        }
    }

    /// Creates a bootstrap failure error.
    #[must_use]
    pub fn bootstrap_failed(
        instrument: impl Into<String>,
        source: credix_math::MathError,
    ) -> Self {
        Self::BootstrapFailed {
            instrument: instrument.into(),
            source,
        }
    }
}
