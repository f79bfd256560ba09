//! # Hazard Core
//!
//! Calendar and convention primitives shared by the Hazard credit curve crates.
//!
//! - **Types**: [`Date`], [`Tenor`] and [`Frequency`]
//! - **Day Count Conventions**: ACT/360 for premium accrual and ACT/365F for
//!   curve time
//!
//! ## Example
//!
//! ```rust
//! use hazard_core::prelude::*;
//!
//! let valuation = Date::from_ymd(2025, 3, 20).unwrap();
//! let maturity = Tenor::parse("5Y").unwrap().advance(valuation).unwrap();
//! let t = Act365Fixed.year_fraction_f64(valuation, maturity);
//! assert!(t > 5.0 && t < 5.01);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]

pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::daycounts::{Act360, Act365Fixed, DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Date, Frequency, Tenor, TenorUnit};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{Date, Frequency, Tenor, TenorUnit};
