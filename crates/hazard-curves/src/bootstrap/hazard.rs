//! Tenor-by-tenor hazard rate bootstrap.

use std::fmt;
use std::sync::Arc;

use hazard_core::daycounts::{Act365Fixed, DayCount};
use hazard_core::Date;
use hazard_math::solvers::{find_root, RootSolution, SolverConfig};
use log::{debug, info, warn};

use super::objective::CdsObjective;
use crate::curves::{check_strictly_increasing, DiscountCurve, HazardRateCurve};
use crate::error::{CurveError, CurveResult};
use crate::instruments::CreditDefaultSwap;
use crate::pricing::{CdsPricer, IsdaLegPricer, LegPricer};
use crate::repricing::{BootstrapResult, BuildTimer, RepricingCheck, RepricingReport};

/// Calibrates a piecewise-constant hazard curve to CDS par spreads.
///
/// Tenors are solved in ascending order. For tenor `i` the running curve
/// holds nodes at time zero and at each of the first `i + 1` tenor times;
/// the nodes of earlier tenors carry their solved rates and the last node is
/// the unknown. Only the last node changes while tenor `i` is solved, so
/// earlier rates are never revisited.
///
/// The node at time zero carries a copy of the first solved rate. This
/// left-shifted alignment is part of the output format; the time-zero rate
/// does not affect survival probabilities on curves with more than one node.
///
/// # Example
///
/// ```rust
/// use hazard_curves::prelude::*;
///
/// let valuation = Date::from_ymd(2025, 3, 20).unwrap();
/// let maturity = Date::from_ymd(2030, 3, 20).unwrap();
/// let template = CreditDefaultSwap::new(valuation, maturity, 0.0, 0.4).unwrap();
///
/// let bootstrapper = HazardRateBootstrapper::new()
///     .with_solver_config(SolverConfig::default().with_max_iterations(50));
/// let curve = bootstrapper
///     .bootstrap(valuation, &template, &[maturity], &[100.0], &FlatDiscountCurve::new(0.02))
///     .unwrap();
///
/// assert_eq!(curve.rates()[0], curve.rates()[1]);
/// ```
#[derive(Clone)]
pub struct HazardRateBootstrapper {
    config: SolverConfig,
    pricer: Arc<dyn LegPricer>,
}

impl Default for HazardRateBootstrapper {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HazardRateBootstrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HazardRateBootstrapper")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HazardRateBootstrapper {
    /// Default solver policy with the ISDA standard model leg pricer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: SolverConfig::default(),
            pricer: Arc::new(IsdaLegPricer::default()),
        }
    }

    /// Replaces the solver policy.
    #[must_use]
    pub fn with_solver_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the leg pricer.
    #[must_use]
    pub fn with_pricer<P: LegPricer + 'static>(mut self, pricer: P) -> Self {
        self.pricer = Arc::new(pricer);
        self
    }

    /// Solver policy.
    #[must_use]
    pub fn solver_config(&self) -> &SolverConfig {
        &self.config
    }

    /// Leg pricer.
    #[must_use]
    pub fn pricer(&self) -> &dyn LegPricer {
        self.pricer.as_ref()
    }

    /// Node times: zero followed by the ACT/365F year fraction of each tenor.
    #[must_use]
    pub fn tenor_times(valuation_date: Date, tenors: &[Date]) -> Vec<f64> {
        std::iter::once(0.0)
            .chain(tenors.iter().map(|&d| Act365Fixed.year_fraction_f64(valuation_date, d)))
            .collect()
    }

    /// Calibrates the curve.
    ///
    /// # Arguments
    ///
    /// * `valuation_date` - Curve anchor
    /// * `template` - Contract terms shared by every calibration instrument
    /// * `tenors` - Calibration maturities, strictly increasing and after
    ///   the valuation date
    /// * `spreads_bps` - Par spread of each tenor in basis points
    /// * `discount` - Discount curve
    ///
    /// # Errors
    ///
    /// Malformed quotes fail before any solve. A failed tenor aborts the
    /// whole calibration with [`CurveError::CalibrationFailure`]; an
    /// unusable solver policy fails with [`CurveError::InvalidConfiguration`].
    pub fn bootstrap(
        &self,
        valuation_date: Date,
        template: &CreditDefaultSwap,
        tenors: &[Date],
        spreads_bps: &[f64],
        discount: &dyn DiscountCurve,
    ) -> CurveResult<HazardRateCurve> {
        let times = self.check_quotes(valuation_date, template, tenors, spreads_bps)?;
        let recovery = template.recovery_rate();
        let mut solved: Vec<f64> = Vec::with_capacity(tenors.len());

        for (i, (&maturity, &spread)) in tenors.iter().zip(spreads_bps).enumerate() {
            let instrument = template.with_maturity(maturity).with_spread(spread);
            instrument.validate()?;
            let guess = spread / 10_000.0 / (1.0 - recovery);

            let mut rates = Vec::with_capacity(i + 2);
            rates.push(solved.first().copied().unwrap_or(guess));
            rates.extend_from_slice(&solved);
            rates.push(guess);
            let running = HazardRateCurve::new(times[..i + 2].to_vec(), rates, recovery)?;

            let solution = self
                .solve_root(valuation_date, &instrument, discount, &running, guess)
                .map_err(|e| {
                    let e = e.in_calibration(i, maturity);
                    warn!("hazard calibration aborted at tenor {i}: {e}");
                    e
                })?;
            debug!(
                "tenor {i} ({maturity}, {spread}bp): h = {:.10} via {:?} in {} evaluations",
                solution.root, solution.method, solution.evaluations
            );
            solved.push(solution.root);
        }

        let mut rates = Vec::with_capacity(times.len());
        rates.push(solved[0]);
        rates.extend_from_slice(&solved);
        info!("calibrated {} hazard rates", solved.len());
        HazardRateCurve::new(times, rates, recovery)
    }

    /// Solves the last node of `base_curve` so that `instrument` reprices.
    ///
    /// Each trial rate is applied to a fresh copy of `base_curve`; the base
    /// curve itself is left untouched.
    ///
    /// # Errors
    ///
    /// [`CurveError::InvalidConfiguration`] when the solver bounds are
    /// inverted or the guess lies outside them, without evaluating the
    /// objective. Search failures surface as [`CurveError::Math`].
    pub fn solve(
        &self,
        valuation_date: Date,
        instrument: &CreditDefaultSwap,
        discount: &dyn DiscountCurve,
        base_curve: &HazardRateCurve,
        guess: f64,
    ) -> CurveResult<f64> {
        self.solve_root(valuation_date, instrument, discount, base_curve, guess)
            .map(|solution| solution.root)
            .map_err(|e| match e {
                CurveError::Math(m) if m.is_configuration_error() => CurveError::InvalidConfiguration(m),
                other => other,
            })
    }

    fn solve_root(
        &self,
        valuation_date: Date,
        instrument: &CreditDefaultSwap,
        discount: &dyn DiscountCurve,
        base_curve: &HazardRateCurve,
        guess: f64,
    ) -> CurveResult<RootSolution> {
        let objective = CdsObjective::new(valuation_date, instrument, discount, self.pricer.as_ref());
        find_root(
            |h| objective.evaluate(&base_curve.with_last_rate(h)),
            guess,
            &self.config,
        )
    }

    /// Calibrates and reprices every quote on the final curve.
    pub fn bootstrap_validated(
        &self,
        valuation_date: Date,
        template: &CreditDefaultSwap,
        tenors: &[Date],
        spreads_bps: &[f64],
        discount: &dyn DiscountCurve,
    ) -> CurveResult<BootstrapResult> {
        let timer = BuildTimer::start();
        let curve = self.bootstrap(valuation_date, template, tenors, spreads_bps, discount)?;
        let report = self.reprice(valuation_date, template, tenors, spreads_bps, discount, &curve)?;
        if !report.is_valid() {
            warn!("{} of {} tenors failed repricing", report.failed_count(), tenors.len());
        }
        Ok(BootstrapResult::new(curve, report, tenors.to_vec(), timer.elapsed()))
    }

    /// Repricing report of `curve` against the quotes it was built from.
    ///
    /// Node `i + 1` of `curve` is taken as the solved rate of tenor `i`.
    pub fn reprice(
        &self,
        valuation_date: Date,
        template: &CreditDefaultSwap,
        tenors: &[Date],
        spreads_bps: &[f64],
        discount: &dyn DiscountCurve,
        curve: &HazardRateCurve,
    ) -> CurveResult<RepricingReport> {
        if curve.len() != tenors.len() + 1 {
            return Err(CurveError::invalid_curve(format!(
                "curve has {} nodes for {} tenors",
                curve.len(),
                tenors.len()
            )));
        }
        let lo = self.config.lower_bound;
        let hi = self.config.upper_bound;
        let x_acc = self.config.x_accuracy;

        let mut checks = Vec::with_capacity(tenors.len());
        for (i, (&maturity, &spread)) in tenors.iter().zip(spreads_bps).enumerate() {
            let instrument = template.with_maturity(maturity).with_spread(spread);
            let residual = CdsObjective::new(valuation_date, &instrument, discount, self.pricer.as_ref())
                .evaluate(curve)?;
            let h = curve.rates()[i + 1];
            let at_bound = (h - lo).abs() <= x_acc || (hi - h).abs() <= x_acc;
            checks.push(RepricingCheck::new(
                i,
                maturity,
                spread,
                h,
                residual,
                self.config.f_accuracy,
                at_bound,
            ));
        }
        Ok(RepricingReport::new(checks))
    }

    /// Calibrates a curve, then values `trade` on it.
    ///
    /// Returns the curve and the trade's protection buyer present value.
    #[allow(clippy::too_many_arguments)]
    pub fn calibrate_and_price(
        &self,
        valuation_date: Date,
        template: &CreditDefaultSwap,
        tenors: &[Date],
        spreads_bps: &[f64],
        discount: &dyn DiscountCurve,
        trade: &CreditDefaultSwap,
    ) -> CurveResult<(HazardRateCurve, f64)> {
        trade.validate()?;
        let curve = self.bootstrap(valuation_date, template, tenors, spreads_bps, discount)?;
        let pv = CdsPricer::new(valuation_date, discount, self.pricer.as_ref()).present_value(trade, &curve)?;
        Ok((curve, pv))
    }

    fn check_quotes(
        &self,
        valuation_date: Date,
        template: &CreditDefaultSwap,
        tenors: &[Date],
        spreads_bps: &[f64],
    ) -> CurveResult<Vec<f64>> {
        if tenors.len() != spreads_bps.len() {
            return Err(CurveError::MismatchedQuotes {
                tenors: tenors.len(),
                spreads: spreads_bps.len(),
            });
        }
        if tenors.is_empty() {
            return Err(CurveError::invalid_curve("no calibration tenors"));
        }
        if let Some(bad) = spreads_bps.iter().position(|s| !s.is_finite() || *s < 0.0) {
            return Err(CurveError::invalid_instrument(format!(
                "spread {} at tenor {bad} must be finite and non-negative",
                spreads_bps[bad]
            )));
        }
        if tenors[0] <= valuation_date {
            return Err(CurveError::invalid_instrument(format!(
                "first tenor {} is not after valuation date {valuation_date}",
                tenors[0]
            )));
        }
        template.validate()?;

        let times = Self::tenor_times(valuation_date, tenors);
        check_strictly_increasing(&times)?;
        Ok(times)
    }
}
