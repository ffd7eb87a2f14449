//! Accrual-on-default formula variants and calibration policies.

use serde::{Deserialize, Serialize};

/// The accrual-on-default formula used inside the CDS premium leg.
///
/// The standard model computes the premium accrued between an accrual
/// period's start and the default time with one of three closed forms. The
/// original ISDA formula additionally offsets the integration times by a
/// fixed half-day constant to approximate mid-period default timing; the
/// other two variants use no offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AccrualOnDefaultFormula {
    /// The formula in the original ISDA C code, with the half-day offset.
    #[default]
    OriginalIsda,
    /// The Markit `fix` to the original formula (period-Δt form).
    MarkitFix,
    /// The mathematically exact integral, with no time offset.
    Correct,
}

impl AccrualOnDefaultFormula {
    /// Returns the integration time offset (in years) for this variant.
    ///
    /// Half a day on a 365-day basis for the original ISDA formula, zero
    /// otherwise.
    #[must_use]
    pub const fn omega(&self) -> f64 {
        match self {
            AccrualOnDefaultFormula::OriginalIsda => 1.0 / 730.0,
            AccrualOnDefaultFormula::MarkitFix | AccrualOnDefaultFormula::Correct => 0.0,
        }
    }
}

/// Policy for a bootstrap step that implies a negative forward hazard rate.
///
/// A negative forward hazard rate means the calibrated survival probability
/// is locally increasing; how to react is a desk-level configuration choice,
/// immutable for the lifetime of one calibrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ArbitrageHandling {
    /// Accept the negative forward rate and continue.
    #[default]
    Ignore,
    /// Raise a calibration error.
    Fail,
    /// Clamp the implied forward rate to zero and continue to the next
    /// pillar.
    ZeroHazardRate,
}

/// Whether a present value includes the accrued premium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PriceType {
    /// Market quote convention: accrued premium is excluded. Points-upfront
    /// is a clean price.
    #[default]
    Clean,
    /// Full value including accrued premium.
    Dirty,
}
