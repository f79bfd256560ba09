//! Hazard curve calibration.
//!
//! - [`CdsObjective`]: pricing residual of one calibration CDS on a trial curve
//! - [`HazardRateBootstrapper`]: solves the hazard rate of each tenor in turn,
//!   holding earlier tenors fixed
//! - [`calibrate_all`]: calibrates independent credit curves in parallel
//!
//! # Example
//!
//! ```rust
//! use hazard_curves::prelude::*;
//!
//! let valuation = Date::from_ymd(2025, 3, 20).unwrap();
//! let tenors = [
//!     Date::from_ymd(2026, 3, 20).unwrap(),
//!     Date::from_ymd(2030, 3, 20).unwrap(),
//! ];
//! let template = CreditDefaultSwap::new(valuation, tenors[1], 0.0, 0.4).unwrap();
//!
//! let curve = HazardRateBootstrapper::new()
//!     .bootstrap(valuation, &template, &tenors, &[50.0, 150.0], &FlatDiscountCurve::new(0.02))
//!     .unwrap();
//!
//! assert_eq!(curve.len(), 3);
//! assert!(curve.rates()[2] > curve.rates()[1]);
//! ```

mod hazard;
mod objective;
mod parallel;

pub use hazard::HazardRateBootstrapper;
pub use objective::CdsObjective;
pub use parallel::{calibrate_all, CreditCurveQuotes};
