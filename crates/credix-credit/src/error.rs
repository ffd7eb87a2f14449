//! Error types for credit curve and index operations.

use thiserror::Error;

/// A specialized Result type for credit operations.
pub type CreditResult<T> = Result<T, CreditError>;

/// Error types for credit curve calibration and index operations.
#[derive(Error, Debug, Clone)]
pub enum CreditError {
    /// Malformed CDS or index input.
    #[error("Invalid instrument: {reason}")]
    InvalidInstrument {
        /// Description of what's wrong with the instrument.
        reason: String,
    },

    /// Malformed quote set or unknown quote convention usage.
    #[error("Invalid quote: {reason}")]
    InvalidQuote {
        /// Description of the quote problem.
        reason: String,
    },

    /// Index bundle construction or update violated an invariant.
    #[error("Invalid bundle: {reason}")]
    InvalidBundle {
        /// Description of the violated invariant.
        reason: String,
    },

    /// A name was defaulted twice.
    #[error("Name {index} is already defaulted")]
    AlreadyDefaulted {
        /// Index of the offending name.
        index: usize,
    },

    /// A name index was out of range.
    #[error("Name index {index} out of range for basket of {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Basket size.
        len: usize,
    },

    /// Bootstrap implied a negative forward hazard rate and the policy is
    /// [`ArbitrageHandling::Fail`](crate::formula::ArbitrageHandling::Fail).
    #[error("Negative forward hazard rate {forward:.6e} on the segment ending at pillar {pillar}")]
    Arbitrage {
        /// Pillar index preceding the offending segment.
        pillar: usize,
        /// The negative implied forward hazard rate.
        forward: f64,
    },

    /// Calibration failed for a specific pillar.
    #[error("Calibration failed at pillar {pillar}: {source}")]
    Calibration {
        /// Index of the pillar that failed.
        pillar: usize,
        /// The underlying solver error.
        source: credix_math::MathError,
    },

    /// Error from the curve layer.
    #[error(transparent)]
    Curve(#[from] credix_curves::CurveError),

    /// Error from the core date/schedule layer.
    #[error(transparent)]
    Core(#[from] credix_core::CoreError),
}

impl CreditError {
    /// Creates an invalid instrument error.
    #[must_use]
    pub fn invalid_instrument(reason: impl Into<String>) -> Self {
        Self::InvalidInstrument {
            reason: reason.into(),
        }
    }

    /// Creates an invalid quote error.
    #[must_use]
    pub fn invalid_quote(reason: impl Into<String>) -> Self {
        Self::InvalidQuote {
            reason: reason.into(),
        }
    }

    /// Creates an invalid bundle error.
    #[must_use]
    pub fn invalid_bundle(reason: impl Into<String>) -> Self {
        Self::InvalidBundle {
            reason: reason.into(),
        }
    }

    /// Creates a calibration failure error.
    #[must_use]
    pub fn calibration_failed(pillar: usize, source: credix_math::MathError) -> Self {
        Self::Calibration { pillar, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arbitrage_display() {
        let err = CreditError::Arbitrage {
            pillar: 2,
            forward: -1.5e-3,
        };
        let msg = err.to_string();
        assert!(msg.contains("pillar 2"));
        assert!(msg.contains("Negative forward hazard"));
    }

    #[test]
    fn test_already_defaulted_display() {
        let err = CreditError::AlreadyDefaulted { index: 7 };
        assert!(err.to_string().contains("already defaulted"));
    }
}
