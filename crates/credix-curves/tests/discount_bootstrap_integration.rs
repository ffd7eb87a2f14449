//! Integration test: Build an ISDA-style discount curve from market data.
//!
//! Uses a realistic USD instrument set (money-market deposits to 12M, then
//! semi-annual par swaps out to 10Y) and checks that every instrument
//! reprices exactly off the finished curve.
//!
//! | Tenor | Instrument | Rate    |
//! |-------|------------|---------|
//! | 1M    | Deposit    | 4.310%  |
//! | 3M    | Deposit    | 4.420%  |
//! | 6M    | Deposit    | 4.500%  |
//! | 12M   | Deposit    | 4.610%  |
//! | 2Y    | Swap       | 4.400%  |
//! | 3Y    | Swap       | 4.310%  |
//! | 5Y    | Swap       | 4.250%  |
//! | 7Y    | Swap       | 4.270%  |
//! | 10Y   | Swap       | 4.320%  |

use credix_core::daycounts::DayCountConvention;
use credix_core::Date;
use credix_curves::prelude::*;

fn market() -> (Date, Vec<CurveInstrument>, Vec<f64>) {
    let spot = Date::from_ymd(2025, 6, 17).unwrap();

    let mut instruments: Vec<CurveInstrument> = Vec::new();
    let mut rates: Vec<f64> = Vec::new();

    for (months, rate) in [(1, 0.0431), (3, 0.0442), (6, 0.0450), (12, 0.0461)] {
        instruments.push(
            MoneyMarketDeposit::from_tenor_months(spot, months)
                .unwrap()
                .into(),
        );
        rates.push(rate);
    }
    for (years, rate) in [
        (2, 0.0440),
        (3, 0.0431),
        (5, 0.0425),
        (7, 0.0427),
        (10, 0.0432),
    ] {
        instruments.push(ParSwap::from_tenor_years(spot, years).unwrap().into());
        rates.push(rate);
    }

    (spot, instruments, rates)
}

fn curve_time(spot: Date, date: Date) -> f64 {
    DayCountConvention::Act365Fixed.year_fraction_f64(spot, date)
}

#[test]
fn test_full_curve_reprices_every_pillar() {
    let (spot, instruments, rates) = market();

    let curve = DiscountCurveBootstrap::new(spot)
        .build(&instruments, &rates)
        .unwrap();

    for (instrument, &rate) in instruments.iter().zip(rates.iter()) {
        match instrument {
            CurveInstrument::Deposit(deposit) => {
                let t = curve_time(spot, deposit.pillar_date());
                let tau = deposit.year_fraction();
                let pv = curve.discount_factor(t) * (1.0 + rate * tau) - 1.0;
                assert!(
                    pv.abs() < 1e-13,
                    "{} residual {:.3e}",
                    deposit.description(),
                    pv
                );
            }
            CurveInstrument::Swap(swap) => {
                let mut fixed_pv = 0.0;
                for (date, yf) in swap.fixed_payments().unwrap() {
                    fixed_pv += rate * yf * curve.discount_factor(curve_time(spot, date));
                }
                let t_n = curve_time(spot, swap.pillar_date());
                let pv = fixed_pv + curve.discount_factor(t_n) - 1.0;
                assert!(
                    pv.abs() < 1e-12,
                    "{} residual {:.3e}",
                    swap.description(),
                    pv
                );
            }
        }
    }
}

#[test]
fn test_curve_is_arbitrage_free() {
    let (spot, instruments, rates) = market();

    let curve = DiscountCurveBootstrap::new(spot)
        .build(&instruments, &rates)
        .unwrap();

    // Discount factors strictly decreasing out to 10Y for this market
    let mut prev = 1.0;
    for i in 1..=40 {
        let t = f64::from(i) * 0.25;
        let df = curve.discount_factor(t);
        assert!(df < prev, "DF not decreasing at t={t}: {df} >= {prev}");
        prev = df;
    }
}

#[test]
fn test_trade_date_base_matches_spot_base_forwards() {
    let (spot, instruments, rates) = market();
    let trade_date = spot.add_business_days(-2);

    let spot_curve = DiscountCurveBootstrap::new(spot)
        .build(&instruments, &rates)
        .unwrap();
    let trade_curve = DiscountCurveBootstrap::new(trade_date)
        .with_curve_spot_date(spot)
        .build(&instruments, &rates)
        .unwrap();

    let offset = curve_time(trade_date, spot);
    for i in 1..=20 {
        let t = f64::from(i) * 0.5;
        let fwd_spot = spot_curve.discount_factor(t + 0.5) / spot_curve.discount_factor(t);
        let fwd_trade = trade_curve.discount_factor(t + 0.5 + offset)
            / trade_curve.discount_factor(t + offset);
        assert!(
            (fwd_spot - fwd_trade).abs() < 1e-13,
            "forward mismatch at t={t}"
        );
    }
}
