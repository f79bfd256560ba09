//! Piecewise-constant hazard rate curve.

use serde::Serialize;

use super::check_strictly_increasing;
use crate::error::{CurveError, CurveResult};

/// A piecewise-constant hazard rate term structure.
///
/// Nodes are `(time, rate)` pairs with times in years from the valuation
/// date. The first node sits at time zero. The rate stored at node `k > 0`
/// applies on `(t[k-1], t[k]]`; beyond the last node the last rate is
/// extrapolated flat. The rate at node 0 only matters for single-node curves.
///
/// Curves are immutable. [`with_last_rate`](Self::with_last_rate) returns a
/// new curve, which is how calibration tries candidate rates.
///
/// # Example
///
/// ```rust
/// use hazard_curves::HazardRateCurve;
///
/// let curve = HazardRateCurve::new(vec![0.0, 1.0, 5.0], vec![0.01, 0.01, 0.03], 0.4).unwrap();
/// let s5 = curve.survival_probability(5.0);
/// assert!((s5 - (-0.01f64 - 0.12).exp()).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HazardRateCurve {
    times: Vec<f64>,
    rates: Vec<f64>,
    recovery_rate: f64,
}

impl HazardRateCurve {
    /// Creates a curve from node times, node rates and a recovery rate.
    ///
    /// # Errors
    ///
    /// Fails if the vectors are empty or of different lengths, if the first
    /// time is not zero, if times are not strictly increasing, or if any
    /// value is not finite.
    pub fn new(times: Vec<f64>, rates: Vec<f64>, recovery_rate: f64) -> CurveResult<Self> {
        if times.is_empty() {
            return Err(CurveError::invalid_curve("hazard curve needs at least one node"));
        }
        if times.len() != rates.len() {
            return Err(CurveError::invalid_curve(format!(
                "{} times but {} rates",
                times.len(),
                rates.len()
            )));
        }
        if times[0] != 0.0 {
            return Err(CurveError::invalid_curve(format!(
                "first node must be at time 0, got {}",
                times[0]
            )));
        }
        check_strictly_increasing(&times)?;
        if let Some(bad) = rates.iter().position(|r| !r.is_finite()) {
            return Err(CurveError::invalid_curve(format!(
                "hazard rate at node {bad} is not finite"
            )));
        }
        if !recovery_rate.is_finite() {
            return Err(CurveError::invalid_curve("recovery rate is not finite"));
        }

        Ok(Self {
            times,
            rates,
            recovery_rate,
        })
    }

    /// A single-node curve with a constant hazard rate.
    pub fn flat(rate: f64, recovery_rate: f64) -> CurveResult<Self> {
        Self::new(vec![0.0], vec![rate], recovery_rate)
    }

    /// Node times in years.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Node hazard rates.
    #[must_use]
    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Recovery rate carried with the curve.
    #[must_use]
    pub fn recovery_rate(&self) -> f64 {
        self.recovery_rate
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false; a curve has at least one node.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Rate of the last node.
    #[must_use]
    pub fn last_rate(&self) -> f64 {
        self.rates[self.rates.len() - 1]
    }

    /// Time of the last node.
    #[must_use]
    pub fn last_time(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// Returns a copy of the curve with the last node's rate replaced.
    ///
    /// Every other node is left untouched.
    #[must_use]
    pub fn with_last_rate(&self, rate: f64) -> Self {
        let mut rates = self.rates.clone();
        let last = rates.len() - 1;
        rates[last] = rate;
        Self {
            times: self.times.clone(),
            rates,
            recovery_rate: self.recovery_rate,
        }
    }

    /// Instantaneous hazard rate at time `t`.
    #[must_use]
    pub fn hazard_rate(&self, t: f64) -> f64 {
        let n = self.times.len();
        let idx = self.times.partition_point(|&x| x < t);
        match idx {
            0 => self.rates[1.min(n - 1)],
            i if i >= n => self.rates[n - 1],
            i => self.rates[i],
        }
    }

    /// Integrated hazard `∫₀ᵗ h(s) ds`. Zero for `t <= 0`.
    #[must_use]
    pub fn integrated_hazard(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        let mut total = 0.0;
        let mut prev = self.times[0];
        for (&tk, &hk) in self.times.iter().zip(&self.rates).skip(1) {
            if t <= tk {
                return total + hk * (t - prev);
            }
            total += hk * (tk - prev);
            prev = tk;
        }
        total + self.last_rate() * (t - prev)
    }

    /// Survival probability `exp(-∫₀ᵗ h)`.
    #[must_use]
    pub fn survival_probability(&self, t: f64) -> f64 {
        (-self.integrated_hazard(t)).exp()
    }

    /// Probability of default before `t`.
    #[must_use]
    pub fn default_probability(&self, t: f64) -> f64 {
        1.0 - self.survival_probability(t)
    }

    /// Probability of default in `(t1, t2]` given survival to `t1`.
    #[must_use]
    pub fn conditional_default_probability(&self, t1: f64, t2: f64) -> f64 {
        if t2 <= t1 {
            return 0.0;
        }
        1.0 - (self.integrated_hazard(t1) - self.integrated_hazard(t2)).exp()
    }

    /// Average hazard rate over `[0, t]`.
    #[must_use]
    pub fn average_hazard_rate(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return self.hazard_rate(0.0);
        }
        self.integrated_hazard(t) / t
    }

    /// Continuous credit spread `h̄(t) · (1 − R)` implied by the average hazard.
    #[must_use]
    pub fn credit_spread(&self, t: f64) -> f64 {
        self.average_hazard_rate(t) * (1.0 - self.recovery_rate)
    }
}
