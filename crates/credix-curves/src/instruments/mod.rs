//! Calibration instruments for the discount-curve bootstrap.
//!
//! Two instrument families build the curve: money-market deposits for the
//! short end and par swaps for the medium-to-long end. Each instrument
//! carries its own day-count and schedule conventions; the market rate is
//! supplied separately, positionally aligned with the instrument list.

mod deposit;
mod swap;

pub use deposit::MoneyMarketDeposit;
pub use swap::ParSwap;

use credix_core::Date;

/// A calibration instrument for the discount-curve bootstrap.
#[derive(Debug, Clone)]
pub enum CurveInstrument {
    /// Money-market deposit (closed-form node).
    Deposit(MoneyMarketDeposit),
    /// Par interest-rate swap (root-found node).
    Swap(ParSwap),
}

impl CurveInstrument {
    /// Returns the pillar date where the curve node is placed.
    #[must_use]
    pub fn pillar_date(&self) -> Date {
        match self {
            CurveInstrument::Deposit(d) => d.pillar_date(),
            CurveInstrument::Swap(s) => s.pillar_date(),
        }
    }

    /// Returns a human-readable description for error reporting.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            CurveInstrument::Deposit(d) => d.description(),
            CurveInstrument::Swap(s) => s.description(),
        }
    }
}

impl From<MoneyMarketDeposit> for CurveInstrument {
    fn from(deposit: MoneyMarketDeposit) -> Self {
        CurveInstrument::Deposit(deposit)
    }
}

impl From<ParSwap> for CurveInstrument {
    fn from(swap: ParSwap) -> Self {
        CurveInstrument::Swap(swap)
    }
}
