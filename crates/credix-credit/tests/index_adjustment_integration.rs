//! Integration test: intrinsic index assembly and portfolio adjustment.
//!
//! Calibrates a small basket of single names, then reconciles the basket
//! against observed index quotes at one and several reference maturities.

use approx::assert_relative_eq;

use credix_core::Date;
use credix_credit::prelude::*;
use credix_curves::DiscountCurve;

fn trade_date() -> Date {
    Date::from_ymd(2025, 6, 17).unwrap()
}

fn cds(years: i32, recovery: f64) -> CdsAnalytic {
    let maturity = Date::from_ymd(2025 + years, 6, 20).unwrap();
    CdsAnalyticBuilder::new(trade_date(), maturity)
        .with_recovery_rate(recovery)
        .build()
        .unwrap()
}

/// A 10-name basket calibrated from a dispersed set of par spreads.
fn basket(yield_curve: &DiscountCurve) -> IntrinsicIndexDataBundle {
    let calibrator = CreditCurveCalibrator::default();
    let names: Vec<(Vec<CdsAnalytic>, Vec<CdsQuote>, f64)> = (0..10)
        .map(|i| {
            let tight = 0.004 + 0.0016 * f64::from(i);
            let pillars = vec![cds(3, 0.4), cds(5, 0.4), cds(10, 0.4)];
            let quotes = vec![
                CdsQuote::ParSpread(tight * 0.8),
                CdsQuote::ParSpread(tight),
                CdsQuote::ParSpread(tight * 1.25),
            ];
            (pillars, quotes, 0.4)
        })
        .collect();

    calibrate_constituents(&calibrator, &names, yield_curve).unwrap()
}

#[test]
fn test_single_term_adjustment_exactness() {
    let yield_curve = DiscountCurve::flat(0.03).unwrap();
    let bundle = basket(&yield_curve);
    let index = cds(5, 0.4);
    let coupon = 0.01;
    let puf = 0.0185;

    let adjustment = PortfolioAdjustment::default();
    let adjusted = adjustment
        .adjust_curves(puf, &index, coupon, &yield_curve, &bundle)
        .unwrap();

    let pricer = IndexCdsPricer::default();
    let pv = pricer.pv(&index, coupon, &yield_curve, &adjusted, PriceType::Clean);
    assert_relative_eq!(pv, puf * adjusted.index_factor(), epsilon = 1e-14);

    // the input bundle is untouched
    let pv_before = pricer.pv(&index, coupon, &yield_curve, &bundle, PriceType::Clean);
    assert!((pv_before - pv).abs() > 1e-6);
}

#[test]
fn test_multi_term_adjustment_reprices_every_term() {
    let yield_curve = DiscountCurve::flat(0.03).unwrap();
    let bundle = basket(&yield_curve);
    let coupon = 0.01;

    let terms = vec![cds(3, 0.4), cds(5, 0.4), cds(7, 0.4)];
    let pufs = vec![0.004, 0.012, 0.021];

    let adjustment = PortfolioAdjustment::default();
    let adjusted = adjustment
        .adjust_curves_multi(&pufs, &terms, coupon, &yield_curve, &bundle)
        .unwrap();

    let pricer = IndexCdsPricer::default();
    for (term, &puf) in terms.iter().zip(pufs.iter()) {
        let pv = pricer.pv(term, coupon, &yield_curve, &adjusted, PriceType::Clean);
        assert_relative_eq!(pv, puf * adjusted.index_factor(), epsilon = 1e-14);
    }
}

#[test]
fn test_single_and_multi_term_agree_for_one_quote() {
    let yield_curve = DiscountCurve::flat(0.03).unwrap();
    let bundle = basket(&yield_curve);
    let index = cds(5, 0.4);

    let adjustment = PortfolioAdjustment::default();
    let single = adjustment
        .adjust_curves(0.0185, &index, 0.01, &yield_curve, &bundle)
        .unwrap();
    let multi = adjustment
        .adjust_curves_multi(
            &[0.0185],
            std::slice::from_ref(&index),
            0.01,
            &yield_curve,
            &bundle,
        )
        .unwrap();

    assert_eq!(single, multi);
}

#[test]
fn test_adjustment_with_defaulted_names() {
    let yield_curve = DiscountCurve::flat(0.03).unwrap();
    let bundle = basket(&yield_curve).with_defaults(&[1, 6]).unwrap();
    assert_relative_eq!(bundle.index_factor(), 0.8, epsilon = 1e-12);

    let index = cds(5, 0.4);
    let puf = 0.02;
    let adjustment = PortfolioAdjustment::default();
    let adjusted = adjustment
        .adjust_curves(puf, &index, 0.01, &yield_curve, &bundle)
        .unwrap();

    // Defaulted names stay defaulted with no curve
    assert_eq!(adjusted.num_defaults(), 2);
    assert!(adjusted.credit_curve(1).is_none());
    assert!(adjusted.credit_curve(6).is_none());
    assert_relative_eq!(adjusted.index_factor(), 0.8, epsilon = 1e-12);

    let pricer = IndexCdsPricer::default();
    let pv = pricer.pv(&index, 0.01, &yield_curve, &adjusted, PriceType::Clean);
    assert_relative_eq!(pv, puf * adjusted.index_factor(), epsilon = 1e-14);
}

#[test]
fn test_multi_term_scaling_is_piecewise() {
    // After a multi-term adjustment, the ratio of adjusted to original
    // accumulated hazard is constant within each reference window but
    // differs across windows
    let yield_curve = DiscountCurve::flat(0.03).unwrap();
    let bundle = basket(&yield_curve);
    let coupon = 0.01;

    let terms = vec![cds(3, 0.4), cds(7, 0.4)];
    let pufs = vec![0.001, 0.035];

    let adjustment = PortfolioAdjustment::default();
    let adjusted = adjustment
        .adjust_curves_multi(&pufs, &terms, coupon, &yield_curve, &bundle)
        .unwrap();

    let t_short = terms[0].protection_end();
    let original = bundle.credit_curve(0).unwrap();
    let modified = adjusted.credit_curve(0).unwrap();

    let x_first = modified.rt_at(t_short) / original.rt_at(t_short);
    let t_mid = terms[0].protection_end() * 0.6;
    // within the first window the same multiplier applies at the knots...
    let x_at_knot = modified.rt_at(3.0) / original.rt_at(3.0);
    assert_relative_eq!(x_first, x_at_knot, epsilon = 1e-10);
    assert!(t_mid < t_short);

    // ...and the second window's multiplier is different
    let t_long = terms[1].protection_end();
    let x_second = modified.rt_at(t_long) / original.rt_at(t_long);
    assert!((x_first - x_second).abs() > 1e-8);
}

#[test]
fn test_adjustment_rejects_bad_inputs_before_solving() {
    let yield_curve = DiscountCurve::flat(0.03).unwrap();
    let bundle = basket(&yield_curve);
    let adjustment = PortfolioAdjustment::default();

    // puf above 1.0
    assert!(adjustment
        .adjust_curves(1.01, &cds(5, 0.4), 0.01, &yield_curve, &bundle)
        .is_err());

    // mismatched counts
    assert!(adjustment
        .adjust_curves_multi(
            &[0.01],
            &[cds(3, 0.4), cds(5, 0.4)],
            0.01,
            &yield_curve,
            &bundle
        )
        .is_err());

    // unreasonable coupon
    assert!(adjustment
        .adjust_curves(0.01, &cds(5, 0.4), 1.5, &yield_curve, &bundle)
        .is_err());
}
