//! # Credix Curves
//!
//! ISDA-compliant discount curve construction for the Credix library.
//!
//! This crate provides:
//!
//! - **Node Curve**: piecewise `(time, value)` curve linear in the
//!   accumulated quantity `r·t`, shared by discount and credit curves
//! - **Discount Curve**: zero-rate curve with `exp(-r·t)` discount factors
//! - **Instruments**: money-market deposits and par swaps for bootstrap
//! - **Bootstrap**: sequential node-by-node calibration with curve-spot
//!   rebasing
//!
//! ## Quick Start
//!
//! ```rust
//! use credix_core::Date;
//! use credix_curves::prelude::*;
//!
//! let spot = Date::from_ymd(2025, 6, 17).unwrap();
//!
//! let instruments: Vec<CurveInstrument> = vec![
//!     MoneyMarketDeposit::from_tenor_months(spot, 6).unwrap().into(),
//!     ParSwap::from_tenor_years(spot, 2).unwrap().into(),
//!     ParSwap::from_tenor_years(spot, 5).unwrap().into(),
//! ];
//! let rates = vec![0.0450, 0.0440, 0.0425];
//!
//! let curve = DiscountCurveBootstrap::new(spot)
//!     .build(&instruments, &rates)
//!     .unwrap();
//!
//! assert!(curve.discount_factor(5.0) < 1.0);
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
#![allow(clippy::uninlined_format_args)]

pub mod bootstrap;
pub mod curves;
pub mod error;
pub mod instruments;
pub mod node_curve;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::DiscountCurveBootstrap;
    pub use crate::curves::DiscountCurve;
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::instruments::{CurveInstrument, MoneyMarketDeposit, ParSwap};
    pub use crate::node_curve::NodeCurve;
}

pub use bootstrap::DiscountCurveBootstrap;
pub use curves::DiscountCurve;
pub use error::{CurveError, CurveResult};
pub use node_curve::NodeCurve;
