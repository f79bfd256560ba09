//! Calendar types used to describe CDS schedules and curve tenors.
//!
//! - [`Date`]: Calendar date
//! - [`Tenor`]: Market tenor such as `6M` or `5Y`
//! - [`Frequency`]: Premium payment frequency

mod date;
mod frequency;
mod tenor;

pub use date::Date;
pub use frequency::Frequency;
pub use tenor::{Tenor, TenorUnit};
