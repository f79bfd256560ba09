//! Repricing validation for calibrated hazard curves.
//!
//! A calibrated curve must reprice every quote it was built from. Each tenor
//! gets a [`RepricingCheck`] holding the objective residual of its
//! calibration instrument on the final curve. A check passes when the
//! residual is within the solver's `f_accuracy`, or when the solved rate
//! sits within `x_accuracy` of a search bound.
//!
//! ```rust
//! use hazard_curves::prelude::*;
//!
//! let valuation = Date::from_ymd(2025, 3, 20).unwrap();
//! let maturity = Date::from_ymd(2030, 3, 20).unwrap();
//! let template = CreditDefaultSwap::new(valuation, maturity, 100.0, 0.4).unwrap();
//!
//! let result = HazardRateBootstrapper::new()
//!     .bootstrap_validated(valuation, &template, &[maturity], &[100.0], &FlatDiscountCurve::new(0.02))
//!     .unwrap();
//! assert!(result.is_valid(), "{}", result.repricing_report);
//! ```

use std::fmt;
use std::time::{Duration, Instant};

use hazard_core::Date;
use serde::Serialize;

use crate::curves::HazardRateCurve;

/// Result of repricing one calibration quote on the final curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepricingCheck {
    /// Zero-based tenor index.
    pub index: usize,
    /// Maturity of the calibration instrument.
    pub maturity: Date,
    /// Quoted par spread in basis points.
    pub spread_bps: f64,
    /// Solved hazard rate for the tenor.
    pub hazard_rate: f64,
    /// Objective value on the final curve.
    pub residual: f64,
    /// `|residual|`.
    pub error: f64,
    /// Tolerance applied to `error`.
    pub tolerance: f64,
    /// Solved rate lies within `x_accuracy` of a search bound.
    pub at_bound: bool,
    /// Whether the tenor passed.
    pub passed: bool,
}

impl RepricingCheck {
    /// Creates a check from a residual.
    #[must_use]
    pub fn new(
        index: usize,
        maturity: Date,
        spread_bps: f64,
        hazard_rate: f64,
        residual: f64,
        tolerance: f64,
        at_bound: bool,
    ) -> Self {
        let error = residual.abs();
        Self {
            index,
            maturity,
            spread_bps,
            hazard_rate,
            residual,
            error,
            tolerance,
            at_bound,
            passed: error <= tolerance || at_bound,
        }
    }
}

impl fmt::Display for RepricingCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed { "✓" } else { "✗" };
        write!(
            f,
            "{} #{} {} {:.2}bp | h: {:.6} | Error: {:.2e} (tol: {:.2e}){}",
            status,
            self.index,
            self.maturity,
            self.spread_bps,
            self.hazard_rate,
            self.error,
            self.tolerance,
            if self.at_bound { " at bound" } else { "" }
        )
    }
}

/// Repricing report for a whole curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepricingReport {
    checks: Vec<RepricingCheck>,
    max_error: f64,
    rms_error: f64,
    passed_count: usize,
}

impl RepricingReport {
    /// Creates a report from individual checks.
    #[must_use]
    pub fn new(checks: Vec<RepricingCheck>) -> Self {
        let max_error = checks.iter().map(|c| c.error).fold(0.0_f64, f64::max);
        let rms_error = if checks.is_empty() {
            0.0
        } else {
            let sum_sq: f64 = checks.iter().map(|c| c.error * c.error).sum();
            (sum_sq / checks.len() as f64).sqrt()
        };
        let passed_count = checks.iter().filter(|c| c.passed).count();

        Self {
            checks,
            max_error,
            rms_error,
            passed_count,
        }
    }

    /// True when every tenor passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.passed_count == self.checks.len()
    }

    /// Individual checks in tenor order.
    #[must_use]
    pub fn checks(&self) -> &[RepricingCheck] {
        &self.checks
    }

    /// Largest absolute residual.
    #[must_use]
    pub fn max_error(&self) -> f64 {
        self.max_error
    }

    /// Root mean square residual.
    #[must_use]
    pub fn rms_error(&self) -> f64 {
        self.rms_error
    }

    /// Number of tenors that passed.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.passed_count
    }

    /// Number of tenors that failed.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.checks.len() - self.passed_count
    }

    /// Checks that failed.
    #[must_use]
    pub fn failed_checks(&self) -> Vec<&RepricingCheck> {
        self.checks.iter().filter(|c| !c.passed).collect()
    }
}

impl fmt::Display for RepricingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Repricing Report")?;
        writeln!(f, "================")?;
        writeln!(f, "Status: {}", if self.is_valid() { "PASSED" } else { "FAILED" })?;
        writeln!(f, "Tenors: {}/{} passed", self.passed_count, self.checks.len())?;
        writeln!(f, "Max Error: {:.2e}", self.max_error)?;
        writeln!(f, "RMS Error: {:.2e}", self.rms_error)?;

        if !self.checks.is_empty() {
            writeln!(f)?;
            writeln!(f, "Details:")?;
            for check in &self.checks {
                writeln!(f, "  {check}")?;
            }
        }
        Ok(())
    }
}

/// A calibrated curve together with its repricing audit.
#[derive(Debug, Clone, Serialize)]
pub struct BootstrapResult {
    /// The calibrated curve.
    pub curve: HazardRateCurve,
    /// Per-tenor repricing report.
    pub repricing_report: RepricingReport,
    /// Calibration maturities, one per solved node.
    pub maturities: Vec<Date>,
    /// Time taken to calibrate and validate.
    #[serde(skip)]
    pub build_duration: Duration,
}

impl BootstrapResult {
    /// Creates a result.
    #[must_use]
    pub fn new(
        curve: HazardRateCurve,
        repricing_report: RepricingReport,
        maturities: Vec<Date>,
        build_duration: Duration,
    ) -> Self {
        Self {
            curve,
            repricing_report,
            maturities,
            build_duration,
        }
    }

    /// True when every tenor repriced.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.repricing_report.is_valid()
    }

    /// Largest absolute residual.
    #[must_use]
    pub fn max_error(&self) -> f64 {
        self.repricing_report.max_error()
    }

    /// The calibrated curve.
    #[must_use]
    pub fn curve(&self) -> &HazardRateCurve {
        &self.curve
    }

    /// Consumes the result, returning the curve.
    #[must_use]
    pub fn into_curve(self) -> HazardRateCurve {
        self.curve
    }
}

impl fmt::Display for BootstrapResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bootstrap Result")?;
        writeln!(f, "Build time: {:?}", self.build_duration)?;
        writeln!(f)?;
        write!(f, "{}", self.repricing_report)
    }
}

/// Wall-clock timer for curve builds.
pub(crate) struct BuildTimer {
    start: Instant,
}

impl BuildTimer {
    pub(crate) fn start() -> Self {
        Self { start: Instant::now() }
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
