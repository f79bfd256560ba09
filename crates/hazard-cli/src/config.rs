//! Calibration file format.
//!
//! ```toml
//! valuation_date = "2025-03-20"
//!
//! [discount]
//! rate = 0.02
//!
//! [cds]
//! recovery_rate = 0.4
//!
//! [[quotes]]
//! tenor = "5Y"
//! spread_bps = 100.0
//! ```
//!
//! Dates are quoted ISO strings. A quote gives either a `tenor` from the
//! valuation date or an explicit `maturity`.

use std::path::Path;

use hazard_core::daycounts::DayCountConvention;
use hazard_core::{Date, Frequency, Tenor};
use hazard_curves::{
    CreditDefaultSwap, DiscountCurve, FlatDiscountCurve, HazardRateBootstrapper, IsdaLegPricer, PriceType,
    ZeroRateDiscountCurve,
};
use hazard_math::solvers::SolverConfig;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// A complete calibration request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationFile {
    /// Curve anchor.
    pub valuation_date: Date,

    /// Discount curve.
    pub discount: DiscountConfig,

    /// Contract terms shared by all quotes.
    #[serde(default)]
    pub cds: CdsConfig,

    /// Market quotes, ascending maturity.
    pub quotes: Vec<QuoteConfig>,

    /// Root finder overrides.
    #[serde(default)]
    pub solver: SolverConfig,
}

/// Discount curve, flat or from zero-rate pillars.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiscountConfig {
    /// Flat continuously compounded rate.
    Flat {
        /// The rate.
        rate: f64,
    },
    /// Continuously compounded zero rates at pillar times in years.
    Zero {
        /// Pillar times.
        times: Vec<f64>,
        /// Zero rates.
        zero_rates: Vec<f64>,
    },
}

/// CDS contract terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CdsConfig {
    /// Protection start. Defaults to the valuation date.
    #[serde(default)]
    pub start_date: Option<Date>,

    /// Recovery rate.
    #[serde(default = "default_recovery_rate")]
    pub recovery_rate: f64,

    /// Notional.
    #[serde(default = "default_notional")]
    pub notional: f64,

    /// Premium frequency.
    #[serde(default)]
    pub frequency: Frequency,

    /// Premium accrual day count.
    #[serde(default)]
    pub day_count: DayCountConvention,

    /// Pay premium accrued up to default.
    #[serde(default = "default_true")]
    pub include_accrued_premium: bool,

    /// Protection starts at the beginning of the day.
    #[serde(default = "default_true")]
    pub protection_from_start_of_day: bool,

    /// Weekdays from valuation to cash settlement.
    #[serde(default = "default_cash_settlement_days")]
    pub cash_settlement_days: u32,

    /// Clean or dirty premium leg.
    #[serde(default)]
    pub price_type: PriceType,
}

fn default_recovery_rate() -> f64 {
    0.4
}

fn default_notional() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

fn default_cash_settlement_days() -> u32 {
    3
}

impl Default for CdsConfig {
    fn default() -> Self {
        Self {
            start_date: None,
            recovery_rate: default_recovery_rate(),
            notional: default_notional(),
            frequency: Frequency::default(),
            day_count: DayCountConvention::default(),
            include_accrued_premium: true,
            protection_from_start_of_day: true,
            cash_settlement_days: default_cash_settlement_days(),
            price_type: PriceType::default(),
        }
    }
}

/// One market quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteConfig {
    /// Tenor from the valuation date, e.g. `"5Y"`.
    #[serde(default)]
    pub tenor: Option<Tenor>,

    /// Explicit maturity.
    #[serde(default)]
    pub maturity: Option<Date>,

    /// Par spread in basis points.
    pub spread_bps: f64,
}

impl QuoteConfig {
    /// Maturity of the quote.
    pub fn maturity(&self, valuation_date: Date) -> CliResult<Date> {
        match (self.tenor, self.maturity) {
            (Some(tenor), None) => Ok(tenor.advance(valuation_date)?),
            (None, Some(date)) => Ok(date),
            (Some(_), Some(_)) => Err(CliError::Config(
                "a quote has both tenor and maturity".to_string(),
            )),
            (None, None) => Err(CliError::Config(
                "a quote needs either tenor or maturity".to_string(),
            )),
        }
    }
}

impl CalibrationFile {
    /// Loads and validates a calibration file.
    pub fn from_file(path: impl AsRef<Path>) -> CliResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let file: Self = toml::from_str(&content)?;
        file.validate()?;
        Ok(file)
    }

    /// Checks everything that can be checked without calibrating.
    pub fn validate(&self) -> CliResult<()> {
        if self.quotes.is_empty() {
            return Err(CliError::Config("no quotes".to_string()));
        }
        self.solver
            .validate()
            .map_err(|e| CliError::Config(format!("solver: {e}")))?;
        self.maturities()?;
        self.discount_curve()?;
        self.template()?;
        Ok(())
    }

    /// Quote maturities in file order.
    pub fn maturities(&self) -> CliResult<Vec<Date>> {
        self.quotes
            .iter()
            .map(|q| q.maturity(self.valuation_date))
            .collect()
    }

    /// Quote spreads in basis points.
    pub fn spreads_bps(&self) -> Vec<f64> {
        self.quotes.iter().map(|q| q.spread_bps).collect()
    }

    /// The discount curve.
    pub fn discount_curve(&self) -> CliResult<Box<dyn DiscountCurve>> {
        Ok(match &self.discount {
            DiscountConfig::Flat { rate } => Box::new(FlatDiscountCurve::new(*rate)),
            DiscountConfig::Zero { times, zero_rates } => {
                Box::new(ZeroRateDiscountCurve::new(times.clone(), zero_rates.clone())?)
            }
        })
    }

    /// The calibration template; its maturity is the last quote's.
    pub fn template(&self) -> CliResult<CreditDefaultSwap> {
        let last = self
            .quotes
            .last()
            .ok_or_else(|| CliError::Config("no quotes".to_string()))?
            .maturity(self.valuation_date)?;
        let cds = &self.cds;
        let template = CreditDefaultSwap::new(
            cds.start_date.unwrap_or(self.valuation_date),
            last,
            0.0,
            cds.recovery_rate,
        )?
        .with_notional(cds.notional)
        .with_frequency(cds.frequency)
        .with_day_count(cds.day_count)
        .with_accrued_premium(cds.include_accrued_premium)
        .with_protection_from_start_of_day(cds.protection_from_start_of_day);
        template.validate()?;
        Ok(template)
    }

    /// Bootstrapper configured from the file.
    pub fn bootstrapper(&self) -> HazardRateBootstrapper {
        HazardRateBootstrapper::new()
            .with_solver_config(self.solver)
            .with_pricer(
                IsdaLegPricer::default()
                    .with_cash_settlement_days(self.cds.cash_settlement_days)
                    .with_price_type(self.cds.price_type),
            )
    }
}

/// Example calibration file printed by `hazard template`.
pub const TEMPLATE: &str = r#"# Hazard rate curve calibration
valuation_date = "2025-03-20"

# Flat continuously compounded rate, or zero-rate pillars:
#   times = [0.5, 1.0, 2.0, 5.0, 10.0]
#   zero_rates = [0.030, 0.031, 0.033, 0.036, 0.038]
[discount]
rate = 0.02

[cds]
recovery_rate = 0.4
notional = 1.0
frequency = "quarterly"
day_count = "ACT/360"
include_accrued_premium = true
protection_from_start_of_day = true
cash_settlement_days = 3
price_type = "clean"

# Ascending maturities: `tenor = "5Y"` or `maturity = "2030-03-20"`
[[quotes]]
tenor = "1Y"
spread_bps = 50.0

[[quotes]]
tenor = "3Y"
spread_bps = 90.0

[[quotes]]
tenor = "5Y"
spread_bps = 120.0

[[quotes]]
maturity = "2035-03-20"
spread_bps = 150.0

# Root finder policy; defaults shown.
[solver]
lower_bound = 0.0
upper_bound = 1e10
x_accuracy = 1e-10
f_accuracy = 1e-10
max_iterations = 100
initial_step = 0.0005
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> CalibrationFile {
        toml::from_str(text).unwrap()
    }

    #[test]
    fn test_template_parses() {
        let file = parse(TEMPLATE);
        file.validate().unwrap();
        assert_eq!(file.quotes.len(), 4);
        assert_eq!(file.solver, SolverConfig::default());
        assert_eq!(file.cds.frequency, Frequency::Quarterly);
        assert_eq!(file.cds.day_count, DayCountConvention::Act360);

        let maturities = file.maturities().unwrap();
        assert_eq!(maturities[0], Date::from_ymd(2026, 3, 20).unwrap());
        assert_eq!(maturities[3], Date::from_ymd(2035, 3, 20).unwrap());
    }

    #[test]
    fn test_defaults() {
        let file = parse(
            r#"
valuation_date = "2025-03-20"
discount = { rate = 0.01 }
quotes = [{ tenor = "5Y", spread_bps = 100.0 }]
"#,
        );
        assert_eq!(file.cds.recovery_rate, 0.4);
        assert_eq!(file.cds.cash_settlement_days, 3);
        assert_eq!(file.cds.price_type, PriceType::Clean);
        assert!(file.cds.include_accrued_premium);
        assert_eq!(file.solver, SolverConfig::default());
    }

    #[test]
    fn test_partial_solver_override() {
        let file = parse(
            r#"
valuation_date = "2025-03-20"
discount = { rate = 0.01 }
quotes = [{ tenor = "5Y", spread_bps = 100.0 }]
solver = { max_iterations = 20 }
"#,
        );
        assert_eq!(file.solver.max_iterations, 20);
        assert_eq!(file.solver.upper_bound, 1e10);
    }

    #[test]
    fn test_zero_discount_curve() {
        let file = parse(
            r#"
valuation_date = "2025-03-20"
discount = { times = [1.0, 5.0], zero_rates = [0.03, 0.04] }
quotes = [{ tenor = "5Y", spread_bps = 100.0 }]
"#,
        );
        let curve = file.discount_curve().unwrap();
        assert!((curve.discount_factor(5.0) - (-0.2f64).exp()).abs() < 1e-15);
    }

    #[test]
    fn test_quote_needs_exactly_one_maturity() {
        let both = QuoteConfig {
            tenor: Some(Tenor::years(1)),
            maturity: Some(Date::from_ymd(2026, 3, 20).unwrap()),
            spread_bps: 50.0,
        };
        let valuation = Date::from_ymd(2025, 3, 20).unwrap();
        assert!(matches!(both.maturity(valuation), Err(CliError::Config(_))));

        let neither = QuoteConfig {
            tenor: None,
            maturity: None,
            spread_bps: 50.0,
        };
        assert!(matches!(neither.maturity(valuation), Err(CliError::Config(_))));
    }

    #[test]
    fn test_inverted_solver_bounds_rejected() {
        let file = parse(
            r#"
valuation_date = "2025-03-20"
discount = { rate = 0.01 }
quotes = [{ tenor = "5Y", spread_bps = 100.0 }]
solver = { lower_bound = 10.0, upper_bound = 1.0 }
"#,
        );
        assert!(matches!(file.validate(), Err(CliError::Config(_))));
    }
}
