//! # Credix Credit
//!
//! CDS pricing, hazard-curve calibration, and intrinsic index adjustment.
//!
//! This crate provides the credit side of the Credix library:
//!
//! - **Credit Curve**: piecewise hazard curve with survival probabilities
//! - **CDS Analytics**: trade-date-anchored contract descriptions and the
//!   standard-model present value (protection leg, premium leg with the
//!   three accrual-on-default formula variants)
//! - **Calibration**: sequential hazard bootstrap from par-spread,
//!   quoted-spread, or points-upfront quotes, with configurable arbitrage
//!   handling
//! - **Index**: immutable basket bundles, intrinsic index pricing, and the
//!   portfolio adjustment that reprices observed index quotes
//!
//! ## Quick Start
//!
//! ```rust
//! use credix_core::Date;
//! use credix_credit::prelude::*;
//! use credix_curves::DiscountCurve;
//!
//! let trade = Date::from_ymd(2025, 6, 17).unwrap();
//! let maturity = Date::from_ymd(2030, 6, 20).unwrap();
//!
//! let cds = CdsAnalyticBuilder::new(trade, maturity)
//!     .with_recovery_rate(0.4)
//!     .build()
//!     .unwrap();
//! let yield_curve = DiscountCurve::flat(0.03).unwrap();
//!
//! let calibrator = CreditCurveCalibrator::default();
//! let curve = calibrator
//!     .calibrate_single(&cds, &CdsQuote::ParSpread(0.012), &yield_curve)
//!     .unwrap();
//!
//! assert!(curve.survival_probability(5.0) < 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::uninlined_format_args)]

pub mod analytic;
pub mod calibration;
pub mod curve;
pub mod error;
pub mod formula;
pub mod index;
pub mod pricing;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analytic::{CdsAnalytic, CdsAnalyticBuilder, CdsPremiumPeriod, CdsQuote};
    pub use crate::calibration::CreditCurveCalibrator;
    pub use crate::curve::CreditCurve;
    pub use crate::error::{CreditError, CreditResult};
    pub use crate::formula::{AccrualOnDefaultFormula, ArbitrageHandling, PriceType};
    pub use crate::index::{
        calibrate_constituents, IndexCdsPricer, IntrinsicIndexDataBundle, PortfolioAdjustment,
    };
    pub use crate::pricing::CdsPricer;
}

pub use analytic::{CdsAnalytic, CdsAnalyticBuilder, CdsQuote};
pub use calibration::CreditCurveCalibrator;
pub use curve::CreditCurve;
pub use error::{CreditError, CreditResult};
pub use formula::{AccrualOnDefaultFormula, ArbitrageHandling, PriceType};
pub use index::{IndexCdsPricer, IntrinsicIndexDataBundle, PortfolioAdjustment};
pub use pricing::CdsPricer;
