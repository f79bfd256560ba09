//! Single-name credit default swap.

use hazard_core::daycounts::DayCountConvention;
use hazard_core::{Date, Frequency};
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};

/// One premium accrual period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualPeriod {
    /// Accrual start.
    pub start: Date,
    /// Accrual end.
    pub end: Date,
    /// Premium payment date.
    pub payment: Date,
}

/// A vanilla CDS, used both as a calibration instrument and as a trade to
/// value on a calibrated curve.
///
/// Instances are immutable. [`with_maturity`](Self::with_maturity) and
/// [`with_spread`](Self::with_spread) derive per-tenor calibration
/// instruments from a template.
///
/// # Example
///
/// ```rust
/// use hazard_core::Date;
/// use hazard_curves::CreditDefaultSwap;
///
/// let start = Date::from_ymd(2025, 3, 20).unwrap();
/// let template = CreditDefaultSwap::new(start, Date::from_ymd(2030, 3, 20).unwrap(), 100.0, 0.4).unwrap();
/// let one_year = template
///     .with_maturity(Date::from_ymd(2026, 3, 20).unwrap())
///     .with_spread(45.0);
/// assert_eq!(one_year.spread_bps(), 45.0);
/// assert_eq!(template.spread_bps(), 100.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditDefaultSwap {
    start_date: Date,
    maturity: Date,
    spread_bps: f64,
    recovery_rate: f64,
    notional: f64,
    frequency: Frequency,
    day_count: DayCountConvention,
    include_accrued_premium: bool,
    protection_from_start_of_day: bool,
}

impl CreditDefaultSwap {
    /// Creates a CDS with unit notional, quarterly ACT/360 premiums, accrued
    /// premium paid on default and protection from the start of each day.
    pub fn new(start_date: Date, maturity: Date, spread_bps: f64, recovery_rate: f64) -> CurveResult<Self> {
        let cds = Self {
            start_date,
            maturity,
            spread_bps,
            recovery_rate,
            notional: 1.0,
            frequency: Frequency::Quarterly,
            day_count: DayCountConvention::Act360,
            include_accrued_premium: true,
            protection_from_start_of_day: true,
        };
        cds.validate()?;
        Ok(cds)
    }

    /// Checks the contract terms.
    pub fn validate(&self) -> CurveResult<()> {
        if self.maturity <= self.start_date {
            return Err(CurveError::invalid_instrument(format!(
                "maturity {} must be after start {}",
                self.maturity, self.start_date
            )));
        }
        if !self.spread_bps.is_finite() {
            return Err(CurveError::invalid_instrument("spread must be finite"));
        }
        if !(0.0..1.0).contains(&self.recovery_rate) {
            return Err(CurveError::invalid_instrument(format!(
                "recovery rate {} outside [0, 1)",
                self.recovery_rate
            )));
        }
        if !(self.notional > 0.0) || !self.notional.is_finite() {
            return Err(CurveError::invalid_instrument(format!(
                "notional {} must be positive",
                self.notional
            )));
        }
        Ok(())
    }

    /// Same contract with a different maturity.
    #[must_use]
    pub fn with_maturity(&self, maturity: Date) -> Self {
        Self {
            maturity,
            ..self.clone()
        }
    }

    /// Same contract with a different par spread.
    #[must_use]
    pub fn with_spread(&self, spread_bps: f64) -> Self {
        Self {
            spread_bps,
            ..self.clone()
        }
    }

    /// Sets the notional.
    #[must_use]
    pub fn with_notional(mut self, notional: f64) -> Self {
        self.notional = notional;
        self
    }

    /// Sets the premium frequency.
    #[must_use]
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the premium accrual day count.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Whether premium accrued up to a default is paid.
    #[must_use]
    pub fn with_accrued_premium(mut self, include: bool) -> Self {
        self.include_accrued_premium = include;
        self
    }

    /// Whether protection starts at the beginning of each day.
    #[must_use]
    pub fn with_protection_from_start_of_day(mut self, flag: bool) -> Self {
        self.protection_from_start_of_day = flag;
        self
    }

    /// Accrual start date.
    #[must_use]
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// Scheduled maturity.
    #[must_use]
    pub fn maturity(&self) -> Date {
        self.maturity
    }

    /// Par spread in basis points.
    #[must_use]
    pub fn spread_bps(&self) -> f64 {
        self.spread_bps
    }

    /// Par spread as a decimal.
    #[must_use]
    pub fn spread(&self) -> f64 {
        self.spread_bps / 10_000.0
    }

    /// Recovery rate.
    #[must_use]
    pub fn recovery_rate(&self) -> f64 {
        self.recovery_rate
    }

    /// Notional.
    #[must_use]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Premium frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Premium accrual day count.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Whether accrued premium is paid on default.
    #[must_use]
    pub fn include_accrued_premium(&self) -> bool {
        self.include_accrued_premium
    }

    /// Whether protection starts at the beginning of each day.
    #[must_use]
    pub fn protection_from_start_of_day(&self) -> bool {
        self.protection_from_start_of_day
    }

    /// Premium schedule, rolled backwards from maturity.
    ///
    /// Any odd period is a short stub at the front. With protection from the
    /// start of day the final period accrues through maturity, so its end is
    /// the day after maturity while payment stays on maturity.
    pub fn premium_schedule(&self) -> CurveResult<Vec<AccrualPeriod>> {
        self.validate()?;
        let step = i32::try_from(self.frequency.months_per_period())
            .map_err(|_| CurveError::invalid_instrument("frequency overflows"))?;

        let mut rolls = vec![self.maturity];
        let mut k = 1;
        loop {
            let roll = self.maturity.add_months(-step * k)?;
            if roll <= self.start_date {
                break;
            }
            rolls.push(roll);
            k += 1;
        }
        rolls.push(self.start_date);
        rolls.reverse();

        let mut periods: Vec<AccrualPeriod> = rolls
            .windows(2)
            .map(|w| AccrualPeriod {
                start: w[0],
                end: w[1],
                payment: w[1],
            })
            .collect();
        if self.protection_from_start_of_day {
            if let Some(last) = periods.last_mut() {
                last.end = last.end.add_days(1);
            }
        }
        Ok(periods)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_validation() {
        assert!(CreditDefaultSwap::new(date(2025, 1, 1), date(2024, 1, 1), 100.0, 0.4).is_err());
        assert!(CreditDefaultSwap::new(date(2025, 1, 1), date(2026, 1, 1), 100.0, 1.0).is_err());
        assert!(CreditDefaultSwap::new(date(2025, 1, 1), date(2026, 1, 1), f64::NAN, 0.4).is_err());
        let cds = CreditDefaultSwap::new(date(2025, 1, 1), date(2026, 1, 1), 100.0, 0.4).unwrap();
        assert!(cds.clone().with_notional(0.0).validate().is_err());
        assert!(cds.with_notional(1e7).validate().is_ok());
    }

    #[test]
    fn test_template_mutators() {
        let template = CreditDefaultSwap::new(date(2025, 3, 20), date(2030, 3, 20), 100.0, 0.4)
            .unwrap()
            .with_notional(1e7);
        let derived = template.with_maturity(date(2027, 3, 20)).with_spread(75.0);
        assert_eq!(derived.maturity(), date(2027, 3, 20));
        assert_eq!(derived.spread_bps(), 75.0);
        assert_eq!(derived.notional(), 1e7);
        assert_eq!(derived.recovery_rate(), 0.4);
        assert_eq!(template.maturity(), date(2030, 3, 20));
        assert_eq!(derived.spread(), 0.0075);
    }

    #[test]
    fn test_regular_schedule() {
        let cds = CreditDefaultSwap::new(date(2025, 3, 20), date(2026, 3, 20), 100.0, 0.4).unwrap();
        let schedule = cds.premium_schedule().unwrap();
        assert_eq!(schedule.len(), 4);
        assert_eq!(schedule[0].start, date(2025, 3, 20));
        assert_eq!(schedule[0].end, date(2025, 6, 20));
        assert_eq!(schedule[3].start, date(2025, 12, 20));
        assert_eq!(schedule[3].end, date(2026, 3, 21));
        assert_eq!(schedule[3].payment, date(2026, 3, 20));
    }

    #[test]
    fn test_front_stub() {
        let cds = CreditDefaultSwap::new(date(2025, 5, 2), date(2026, 3, 20), 100.0, 0.4)
            .unwrap()
            .with_protection_from_start_of_day(false);
        let schedule = cds.premium_schedule().unwrap();
        assert_eq!(schedule.len(), 4);
        assert_eq!(schedule[0].start, date(2025, 5, 2));
        assert_eq!(schedule[0].end, date(2025, 6, 20));
        assert_eq!(schedule[3].end, date(2026, 3, 20));
        for pair in schedule.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }
}
