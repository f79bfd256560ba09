//! Calibration objective.

use hazard_core::Date;

use crate::curves::{DiscountCurve, HazardRateCurve};
use crate::error::CurveResult;
use crate::instruments::CreditDefaultSwap;
use crate::pricing::LegPricer;

/// Per-notional value of a calibration CDS to the protection buyer.
///
/// `contingent / N − s · premium / N`, where `s` is the par spread as a
/// decimal. Zero when the trial curve reprices the quote. Scaling by
/// notional keeps the absolute solver tolerance meaningful for any trade
/// size.
#[derive(Clone, Copy)]
pub struct CdsObjective<'a> {
    valuation_date: Date,
    instrument: &'a CreditDefaultSwap,
    discount: &'a dyn DiscountCurve,
    pricer: &'a dyn LegPricer,
}

impl<'a> CdsObjective<'a> {
    /// Creates the objective for one calibration instrument.
    pub fn new(
        valuation_date: Date,
        instrument: &'a CreditDefaultSwap,
        discount: &'a dyn DiscountCurve,
        pricer: &'a dyn LegPricer,
    ) -> Self {
        Self {
            valuation_date,
            instrument,
            discount,
            pricer,
        }
    }

    /// The calibration instrument.
    pub fn instrument(&self) -> &CreditDefaultSwap {
        self.instrument
    }

    /// Residual on `curve`.
    pub fn evaluate(&self, curve: &HazardRateCurve) -> CurveResult<f64> {
        let notional = self.instrument.notional();
        let contingent = self
            .pricer
            .contingent_leg_pv(self.valuation_date, self.instrument, self.discount, curve)?;
        let premium = self
            .pricer
            .premium_leg_pv(self.valuation_date, self.instrument, self.discount, curve)?;
        Ok(contingent / notional - self.instrument.spread() * premium / notional)
    }
}
