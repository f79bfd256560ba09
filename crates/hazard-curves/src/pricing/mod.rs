//! CDS leg valuation.
//!
//! [`LegPricer`] is the seam between calibration and leg integration. The
//! bundled [`IsdaLegPricer`] follows the ISDA standard model; [`CdsPricer`]
//! builds trade-level analytics on top of any leg pricer.

mod cds;
mod legs;

pub use cds::CdsPricer;
pub use legs::{IsdaLegPricer, LegPricer, PriceType};
