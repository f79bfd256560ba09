//! Actual/360 day count convention.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// Actual/360: actual days over a 360-day year.
///
/// Standard accrual basis for CDS premium payments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act360;

impl DayCount for Act360 {
    fn name(&self) -> &'static str {
        "ACT/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quarter_accrual() {
        let start = Date::from_ymd(2025, 3, 20).unwrap();
        let end = Date::from_ymd(2025, 6, 20).unwrap();
        assert_eq!(Act360.day_count(start, end), 92);
        assert_eq!(Act360.year_fraction(start, end), dec!(92) / dec!(360));
    }

    #[test]
    fn test_reversed_dates_negative() {
        let start = Date::from_ymd(2025, 4, 1).unwrap();
        let end = Date::from_ymd(2025, 1, 1).unwrap();
        assert_eq!(Act360.year_fraction(start, end), dec!(-0.25));
    }
}
