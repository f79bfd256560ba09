//! Calibration instruments.

mod cds;

pub use cds::{AccrualPeriod, CreditDefaultSwap};
