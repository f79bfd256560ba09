//! Trade-level CDS analytics.

use hazard_core::Date;

use super::legs::LegPricer;
use crate::curves::{DiscountCurve, HazardRateCurve};
use crate::error::{CurveError, CurveResult};
use crate::instruments::CreditDefaultSwap;

/// Values CDS trades against a discount curve with a given leg pricer.
///
/// Present values are from the protection buyer's side: protection leg
/// received, premium paid.
pub struct CdsPricer<'a> {
    valuation_date: Date,
    discount: &'a dyn DiscountCurve,
    legs: &'a dyn LegPricer,
}

impl<'a> CdsPricer<'a> {
    /// Creates a pricer.
    pub fn new(valuation_date: Date, discount: &'a dyn DiscountCurve, legs: &'a dyn LegPricer) -> Self {
        Self {
            valuation_date,
            discount,
            legs,
        }
    }

    /// Valuation date.
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Premium leg value of a unit spread per unit notional.
    pub fn risky_annuity(&self, cds: &CreditDefaultSwap, hazard: &HazardRateCurve) -> CurveResult<f64> {
        let premium = self
            .legs
            .premium_leg_pv(self.valuation_date, cds, self.discount, hazard)?;
        Ok(premium / cds.notional())
    }

    /// Protection leg value per unit notional.
    pub fn protection_leg(&self, cds: &CreditDefaultSwap, hazard: &HazardRateCurve) -> CurveResult<f64> {
        let contingent = self
            .legs
            .contingent_leg_pv(self.valuation_date, cds, self.discount, hazard)?;
        Ok(contingent / cds.notional())
    }

    /// Protection buyer present value, scaled by notional.
    pub fn present_value(&self, cds: &CreditDefaultSwap, hazard: &HazardRateCurve) -> CurveResult<f64> {
        let protection = self.protection_leg(cds, hazard)?;
        let annuity = self.risky_annuity(cds, hazard)?;
        Ok(cds.notional() * (protection - cds.spread() * annuity))
    }

    /// Spread in basis points at which the trade would be worth zero.
    ///
    /// # Errors
    ///
    /// Fails when the risky annuity is not positive, for example for an
    /// expired trade.
    pub fn par_spread(&self, cds: &CreditDefaultSwap, hazard: &HazardRateCurve) -> CurveResult<f64> {
        let annuity = self.risky_annuity(cds, hazard)?;
        if !(annuity > 0.0) {
            return Err(CurveError::invalid_instrument(format!(
                "risky annuity {annuity} is not positive; par spread undefined"
            )));
        }
        Ok(self.protection_leg(cds, hazard)? / annuity * 10_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::FlatDiscountCurve;
    use crate::pricing::IsdaLegPricer;
    use approx::assert_relative_eq;

    fn setup() -> (Date, CreditDefaultSwap, FlatDiscountCurve, HazardRateCurve) {
        let valuation = Date::from_ymd(2025, 3, 20).unwrap();
        let maturity = Date::from_ymd(2030, 3, 20).unwrap();
        let cds = CreditDefaultSwap::new(valuation, maturity, 100.0, 0.4).unwrap();
        let hazard = HazardRateCurve::new(vec![0.0, 5.0], vec![0.02, 0.02], 0.4).unwrap();
        (valuation, cds, FlatDiscountCurve::new(0.02), hazard)
    }

    #[test]
    fn test_par_spread_zeroes_present_value() {
        let (valuation, cds, discount, hazard) = setup();
        let legs = IsdaLegPricer::default();
        let pricer = CdsPricer::new(valuation, &discount, &legs);

        let par = pricer.par_spread(&cds, &hazard).unwrap();
        // Credit triangle: roughly h (1 - R).
        assert!(par > 110.0 && par < 130.0, "par spread {par}");

        let at_par = cds.with_spread(par);
        let pv = pricer.present_value(&at_par, &hazard).unwrap();
        assert!(pv.abs() < 1e-12, "pv {pv}");
    }

    #[test]
    fn test_present_value_sign() {
        let (valuation, cds, discount, hazard) = setup();
        let legs = IsdaLegPricer::default();
        let pricer = CdsPricer::new(valuation, &discount, &legs);

        // 100bp is below par for h = 2%, so buying protection has value.
        assert!(pricer.present_value(&cds, &hazard).unwrap() > 0.0);
        assert!(pricer.present_value(&cds.with_spread(500.0), &hazard).unwrap() < 0.0);
    }

    #[test]
    fn test_present_value_scales_with_notional() {
        let (valuation, cds, discount, hazard) = setup();
        let legs = IsdaLegPricer::default();
        let pricer = CdsPricer::new(valuation, &discount, &legs);

        let unit = pricer.present_value(&cds, &hazard).unwrap();
        let big = pricer
            .present_value(&cds.clone().with_notional(10_000_000.0), &hazard)
            .unwrap();
        assert_relative_eq!(big, unit * 10_000_000.0, max_relative = 1e-12);
        assert_relative_eq!(
            pricer.risky_annuity(&cds, &hazard).unwrap(),
            pricer
                .risky_annuity(&cds.clone().with_notional(10_000_000.0), &hazard)
                .unwrap(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_par_spread_of_expired_trade_fails() {
        let (_, cds, discount, hazard) = setup();
        let legs = IsdaLegPricer::default();
        let pricer = CdsPricer::new(Date::from_ymd(2031, 1, 2).unwrap(), &discount, &legs);
        assert!(pricer.par_spread(&cds, &hazard).is_err());
    }
}
