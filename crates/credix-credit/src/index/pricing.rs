//! Intrinsic index present value.

use credix_curves::DiscountCurve;

use crate::analytic::CdsAnalytic;
use crate::formula::{AccrualOnDefaultFormula, PriceType};
use crate::index::bundle::IntrinsicIndexDataBundle;
use crate::pricing::CdsPricer;

/// Prices an index CDS intrinsically from its constituents.
///
/// The index value is the weighted sum of single-name values: one reference
/// contract is re-priced per alive constituent with that name's own credit
/// curve and loss-given-default. Defaulted names drop out of the sum; their
/// weight loss is already reflected in the bundle's index factor. The
/// result is a fraction of the index's initial notional.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexCdsPricer {
    pricer: CdsPricer,
}

impl IndexCdsPricer {
    /// Creates an index pricer using the given accrual-on-default formula.
    #[must_use]
    pub fn new(formula: AccrualOnDefaultFormula) -> Self {
        Self {
            pricer: CdsPricer::new(formula),
        }
    }

    /// Returns the underlying single-name pricer.
    #[must_use]
    pub fn single_name_pricer(&self) -> &CdsPricer {
        &self.pricer
    }

    /// Present value of the index per unit of initial notional.
    #[must_use]
    pub fn pv(
        &self,
        cds: &CdsAnalytic,
        coupon: f64,
        yield_curve: &DiscountCurve,
        bundle: &IntrinsicIndexDataBundle,
        price_type: PriceType,
    ) -> f64 {
        let mut pv = 0.0;
        for i in 0..bundle.len() {
            let Some(curve) = bundle.credit_curve(i) else {
                continue;
            };
            let constituent = cds.with_lgd(bundle.lgd(i));
            pv += bundle.weight(i)
                * self
                    .pricer
                    .pv(&constituent, coupon, yield_curve, curve, price_type);
        }
        pv
    }
}
