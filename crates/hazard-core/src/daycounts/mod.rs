//! Day count conventions.
//!
//! Only the two conventions used by the ISDA standard CDS model are provided:
//!
//! - [`Act360`]: premium accrual
//! - [`Act365Fixed`]: curve time measured from the valuation date
//!
//! ```rust
//! use hazard_core::daycounts::{Act365Fixed, DayCount};
//! use hazard_core::types::Date;
//!
//! let start = Date::from_ymd(2025, 1, 1).unwrap();
//! let end = Date::from_ymd(2026, 1, 1).unwrap();
//! assert_eq!(Act365Fixed.year_fraction_f64(start, end), 1.0);
//! ```

mod act360;
mod act365;

pub use act360::Act360;
pub use act365::Act365Fixed;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Date;

/// Trait for day count conventions.
pub trait DayCount: Send + Sync {
    /// Name of the convention (e.g. "ACT/360").
    fn name(&self) -> &'static str;

    /// Year fraction between two dates. Negative if `end < start`.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal;

    /// Number of days between two dates according to the convention.
    fn day_count(&self, start: Date, end: Date) -> i64;

    /// Year fraction as `f64`, for use in floating-point curve maths.
    fn year_fraction_f64(&self, start: Date, end: Date) -> f64 {
        self.year_fraction(start, end).to_f64().unwrap_or(f64::NAN)
    }
}

/// Runtime-selectable day count convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DayCountConvention {
    /// Actual/360
    #[default]
    #[serde(rename = "ACT/360", alias = "act360")]
    Act360,
    /// Actual/365 Fixed
    #[serde(rename = "ACT/365F", alias = "act365f")]
    Act365Fixed,
}

impl DayCountConvention {
    /// Returns the convention as a trait object.
    #[must_use]
    pub fn to_day_count(self) -> Box<dyn DayCount> {
        match self {
            DayCountConvention::Act360 => Box::new(Act360),
            DayCountConvention::Act365Fixed => Box::new(Act365Fixed),
        }
    }

    /// Year fraction without boxing.
    #[must_use]
    pub fn year_fraction_f64(self, start: Date, end: Date) -> f64 {
        match self {
            DayCountConvention::Act360 => Act360.year_fraction_f64(start, end),
            DayCountConvention::Act365Fixed => Act365Fixed.year_fraction_f64(start, end),
        }
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DayCountConvention::Act360 => Act360.name(),
            DayCountConvention::Act365Fixed => Act365Fixed.name(),
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_convention_dispatch() {
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let end = Date::from_ymd(2025, 4, 1).unwrap();

        let boxed = DayCountConvention::Act360.to_day_count();
        assert_eq!(boxed.name(), "ACT/360");
        assert_relative_eq!(boxed.year_fraction_f64(start, end), 0.25);
        assert_relative_eq!(
            DayCountConvention::Act365Fixed.year_fraction_f64(start, end),
            90.0 / 365.0,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_convention_serde_names() {
        let dc: DayCountConvention = serde_json::from_str("\"ACT/365F\"").unwrap();
        assert_eq!(dc, DayCountConvention::Act365Fixed);
        assert_eq!(dc.to_string(), "ACT/365F");
    }
}
