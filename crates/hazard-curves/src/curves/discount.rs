//! Discount curves consumed by the leg pricers.

use serde::{Deserialize, Serialize};

use super::check_strictly_increasing;
use crate::error::{CurveError, CurveResult};

/// Discount factor lookup by time in years from the valuation date.
pub trait DiscountCurve: Send + Sync {
    /// Discount factor to time `t`.
    fn discount_factor(&self, t: f64) -> f64;

    /// Times at which the curve changes shape.
    ///
    /// Leg pricers integrate piecewise between these times. Curves without
    /// nodes return an empty slice.
    fn node_times(&self) -> &[f64] {
        &[]
    }

    /// Continuously compounded zero rate to time `t`.
    fn zero_rate(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return self.zero_rate(1e-6);
        }
        -self.discount_factor(t).ln() / t
    }

    /// Continuously compounded forward rate between `t1` and `t2`.
    fn forward_rate(&self, t1: f64, t2: f64) -> f64 {
        if t2 <= t1 {
            return 0.0;
        }
        (self.discount_factor(t1) / self.discount_factor(t2)).ln() / (t2 - t1)
    }
}

/// Flat continuously compounded curve, `DF(t) = exp(-r t)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlatDiscountCurve {
    rate: f64,
}

impl FlatDiscountCurve {
    /// Creates a flat curve.
    #[must_use]
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    /// The flat rate.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl DiscountCurve for FlatDiscountCurve {
    fn discount_factor(&self, t: f64) -> f64 {
        (-self.rate * t).exp()
    }

    fn zero_rate(&self, _t: f64) -> f64 {
        self.rate
    }
}

/// Curve defined by continuously compounded zero rates at pillar times.
///
/// `r·t` is interpolated linearly between pillars, which gives flat forward
/// rates. Before the first pillar the first zero rate is held flat; after the
/// last pillar the last forward rate is extended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZeroRateDiscountCurve {
    times: Vec<f64>,
    zero_rates: Vec<f64>,
}

impl ZeroRateDiscountCurve {
    /// Creates a curve from pillar times (positive, strictly increasing) and
    /// zero rates.
    pub fn new(times: Vec<f64>, zero_rates: Vec<f64>) -> CurveResult<Self> {
        if times.is_empty() || times.len() != zero_rates.len() {
            return Err(CurveError::invalid_curve(format!(
                "zero curve needs matching non-empty pillars ({} times, {} rates)",
                times.len(),
                zero_rates.len()
            )));
        }
        if times[0] <= 0.0 {
            return Err(CurveError::invalid_curve("zero curve pillars must be after time 0"));
        }
        check_strictly_increasing(&times)?;
        if zero_rates.iter().any(|r| !r.is_finite()) {
            return Err(CurveError::invalid_curve("zero rates must be finite"));
        }
        Ok(Self { times, zero_rates })
    }

    /// Zero rates at the pillars.
    #[must_use]
    pub fn zero_rates(&self) -> &[f64] {
        &self.zero_rates
    }

    fn rt(&self, t: f64) -> f64 {
        let n = self.times.len();
        if t <= self.times[0] {
            return self.zero_rates[0] * t;
        }
        let idx = self.times.partition_point(|&x| x < t);
        let (lo, hi) = if idx >= n {
            if n == 1 {
                return self.zero_rates[0] * t;
            }
            (n - 2, n - 1)
        } else {
            (idx - 1, idx)
        };
        let (t1, t2) = (self.times[lo], self.times[hi]);
        let (rt1, rt2) = (self.zero_rates[lo] * t1, self.zero_rates[hi] * t2);
        rt1 + (rt2 - rt1) * (t - t1) / (t2 - t1)
    }
}

impl DiscountCurve for ZeroRateDiscountCurve {
    fn discount_factor(&self, t: f64) -> f64 {
        (-self.rt(t)).exp()
    }

    fn node_times(&self) -> &[f64] {
        &self.times
    }
}
