//! Parallel calibration of independent credit curves.

use hazard_core::Date;
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::hazard::HazardRateBootstrapper;
use crate::curves::{DiscountCurve, HazardRateCurve};
use crate::error::CurveResult;
use crate::instruments::CreditDefaultSwap;

/// Market quotes for one reference entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCurveQuotes {
    /// Identifier of the reference entity.
    pub name: String,
    /// Curve anchor.
    pub valuation_date: Date,
    /// Contract terms shared by every calibration instrument.
    pub template: CreditDefaultSwap,
    /// Calibration maturities.
    pub tenors: Vec<Date>,
    /// Par spreads in basis points.
    pub spreads_bps: Vec<f64>,
}

impl CreditCurveQuotes {
    /// Creates a quote set.
    pub fn new(
        name: impl Into<String>,
        valuation_date: Date,
        template: CreditDefaultSwap,
        tenors: Vec<Date>,
        spreads_bps: Vec<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            valuation_date,
            template,
            tenors,
            spreads_bps,
        }
    }

    /// Calibrates this entity's curve.
    pub fn calibrate(
        &self,
        bootstrapper: &HazardRateBootstrapper,
        discount: &dyn DiscountCurve,
    ) -> CurveResult<HazardRateCurve> {
        bootstrapper.bootstrap(
            self.valuation_date,
            &self.template,
            &self.tenors,
            &self.spreads_bps,
            discount,
        )
    }
}

/// Calibrates every quote set on the rayon thread pool.
///
/// Results come back in input order. Curves share nothing, so one failure
/// leaves the others unaffected.
pub fn calibrate_all(
    bootstrapper: &HazardRateBootstrapper,
    quotes: &[CreditCurveQuotes],
    discount: &dyn DiscountCurve,
) -> Vec<CurveResult<HazardRateCurve>> {
    debug!("calibrating {} credit curves", quotes.len());
    quotes
        .par_iter()
        .map(|q| q.calibrate(bootstrapper, discount))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::FlatDiscountCurve;

    fn quotes(name: &str, spreads: Vec<f64>) -> CreditCurveQuotes {
        let valuation = Date::from_ymd(2025, 3, 20).unwrap();
        let tenors = vec![
            Date::from_ymd(2026, 3, 20).unwrap(),
            Date::from_ymd(2028, 3, 20).unwrap(),
        ];
        let template = CreditDefaultSwap::new(valuation, tenors[1], 0.0, 0.4).unwrap();
        CreditCurveQuotes::new(name, valuation, template, tenors, spreads)
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let bootstrapper = HazardRateBootstrapper::new();
        let discount = FlatDiscountCurve::new(0.02);
        let sets = vec![
            quotes("A", vec![40.0, 80.0]),
            quotes("B", vec![100.0, 120.0]),
            quotes("C", vec![300.0, 250.0]),
        ];

        let parallel = calibrate_all(&bootstrapper, &sets, &discount);
        assert_eq!(parallel.len(), 3);
        for (set, result) in sets.iter().zip(&parallel) {
            let sequential = set.calibrate(&bootstrapper, &discount).unwrap();
            assert_eq!(result.as_ref().unwrap(), &sequential);
        }
    }

    #[test]
    fn test_failure_is_isolated() {
        let bootstrapper = HazardRateBootstrapper::new();
        let discount = FlatDiscountCurve::new(0.02);
        let sets = vec![quotes("good", vec![40.0, 80.0]), quotes("bad", vec![40.0])];

        let results = calibrate_all(&bootstrapper, &sets, &discount);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }
}
