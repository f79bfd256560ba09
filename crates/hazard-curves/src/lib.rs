//! # Hazard Curves
//!
//! Calibration of piecewise-constant hazard-rate curves to CDS par spreads.
//!
//! This crate provides:
//!
//! - **Hazard rate curves**: [`HazardRateCurve`] with survival analytics and
//!   a last-node mutator used during calibration
//! - **Discount curves**: the [`DiscountCurve`] trait with flat and zero-rate
//!   implementations
//! - **Instruments**: [`CreditDefaultSwap`] with schedule generation
//! - **Pricing**: the [`LegPricer`] trait and the ISDA standard model legs
//! - **Bootstrap**: [`HazardRateBootstrapper`], tenor by tenor, with repricing
//!   validation and parallel multi-curve calibration
//!
//! ## Quick Start
//!
//! ```rust
//! use hazard_curves::prelude::*;
//!
//! let valuation = Date::from_ymd(2025, 3, 20).unwrap();
//! let maturity = Date::from_ymd(2030, 3, 20).unwrap();
//! let template = CreditDefaultSwap::new(valuation, maturity, 100.0, 0.4).unwrap();
//! let discount = FlatDiscountCurve::new(0.02);
//!
//! let curve = HazardRateBootstrapper::new()
//!     .bootstrap(valuation, &template, &[maturity], &[100.0], &discount)
//!     .unwrap();
//!
//! assert!(curve.rates()[1] > 0.015 && curve.rates()[1] < 0.018);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::float_cmp)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]

pub mod bootstrap;
pub mod curves;
pub mod error;
pub mod instruments;
pub mod pricing;
pub mod repricing;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::{
        calibrate_all, CdsObjective, CreditCurveQuotes, HazardRateBootstrapper,
    };
    pub use crate::curves::{DiscountCurve, FlatDiscountCurve, HazardRateCurve, ZeroRateDiscountCurve};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::instruments::{AccrualPeriod, CreditDefaultSwap};
    pub use crate::pricing::{CdsPricer, IsdaLegPricer, LegPricer, PriceType};
    pub use crate::repricing::{BootstrapResult, RepricingCheck, RepricingReport};
    pub use hazard_core::{Date, Frequency, Tenor};
    pub use hazard_math::solvers::SolverConfig;
}

pub use bootstrap::{calibrate_all, CdsObjective, CreditCurveQuotes, HazardRateBootstrapper};
pub use curves::{DiscountCurve, FlatDiscountCurve, HazardRateCurve, ZeroRateDiscountCurve};
pub use error::{CurveError, CurveResult};
pub use instruments::CreditDefaultSwap;
pub use pricing::{CdsPricer, IsdaLegPricer, LegPricer, PriceType};
pub use repricing::{BootstrapResult, RepricingCheck, RepricingReport};
