//! # Credix Core
//!
//! Core types and conventions for the Credix credit analytics library.
//!
//! This crate provides the foundational building blocks used throughout Credix:
//!
//! - **Types**: Domain-specific types like `Date` and `Frequency`
//! - **Day Count Conventions**: Industry-standard day count fraction calculations
//! - **Schedules**: Accrual period generation for swap and CDS premium legs
//!
//! ## Design Philosophy
//!
//! - **Type Safety**: Newtypes prevent mixing incompatible values
//! - **Explicit Over Implicit**: Clear, self-documenting APIs
//! - **Immutable Values**: Schedules and dates are plain value data
//!
//! ## Example
//!
//! ```rust
//! use credix_core::prelude::*;
//!
//! let start = Date::from_ymd(2025, 3, 20).unwrap();
//! let end = Date::from_ymd(2030, 6, 20).unwrap();
//!
//! let schedule = Schedule::regular(start, end, Frequency::Quarterly, DayCountConvention::Act360)
//!     .unwrap();
//! assert_eq!(schedule.len(), 21);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::uninlined_format_args)]

pub mod daycounts;
pub mod error;
pub mod schedule;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::daycounts::{Act360, Act365Fixed, DayCount, DayCountConvention, Thirty360E};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::schedule::{AccrualPeriod, Schedule};
    pub use crate::types::{Date, Frequency};
}

pub use error::{CoreError, CoreResult};
pub use types::Date;
