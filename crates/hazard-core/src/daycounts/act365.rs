//! Actual/365 Fixed day count convention.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// Actual/365 Fixed: actual days over a 365-day year, ignoring leap years.
///
/// Converts calendar dates to curve time for hazard and discount curves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act365Fixed;

impl DayCount for Act365Fixed {
    fn name(&self) -> &'static str {
        "ACT/365F"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(365)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_leap_year_ignored() {
        let start = Date::from_ymd(2024, 1, 1).unwrap();
        let end = Date::from_ymd(2025, 1, 1).unwrap();
        assert_eq!(Act365Fixed.day_count(start, end), 366);
        assert_eq!(Act365Fixed.year_fraction(start, end), dec!(366) / dec!(365));
    }

    #[test]
    fn test_f64_fraction() {
        let start = Date::from_ymd(2025, 3, 20).unwrap();
        let end = Date::from_ymd(2030, 3, 20).unwrap();
        assert_relative_eq!(
            Act365Fixed.year_fraction_f64(start, end),
            1826.0 / 365.0,
            epsilon = 1e-14
        );
    }
}
