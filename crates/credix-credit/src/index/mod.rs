//! Intrinsic index data bundle, pricing, and portfolio adjustment.

mod adjustment;
mod bundle;
mod pricing;

pub use adjustment::PortfolioAdjustment;
pub use bundle::IntrinsicIndexDataBundle;
pub use pricing::IndexCdsPricer;

use rayon::prelude::*;

use credix_curves::DiscountCurve;

use crate::analytic::{CdsAnalytic, CdsQuote};
use crate::calibration::CreditCurveCalibrator;
use crate::error::CreditResult;

/// Calibrates every constituent's hazard curve and assembles a bundle.
///
/// Each name is an independent calibration (its own pillars, quotes, and
/// recovery), so the names run in parallel; no curve or solver state is
/// shared between them. Weights default to equal.
///
/// # Arguments
///
/// * `calibrator` - the shared calibration configuration
/// * `names` - per name: pillar instruments, quotes, and recovery rate
/// * `yield_curve` - the calibrated discount curve
///
/// # Errors
///
/// The first name whose calibration fails aborts the assembly.
pub fn calibrate_constituents(
    calibrator: &CreditCurveCalibrator,
    names: &[(Vec<CdsAnalytic>, Vec<CdsQuote>, f64)],
    yield_curve: &DiscountCurve,
) -> CreditResult<IntrinsicIndexDataBundle> {
    let curves = names
        .par_iter()
        .map(|(pillars, quotes, _)| calibrator.calibrate(pillars, quotes, yield_curve))
        .collect::<CreditResult<Vec<_>>>()?;

    let recoveries: Vec<f64> = names.iter().map(|&(_, _, recovery)| recovery).collect();
    IntrinsicIndexDataBundle::new(curves, &recoveries)
}
