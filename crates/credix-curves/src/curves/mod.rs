//! Curve types.

mod discount;

pub use discount::DiscountCurve;
