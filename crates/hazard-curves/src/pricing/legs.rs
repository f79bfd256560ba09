//! Premium and contingent leg present values.

use hazard_core::daycounts::{Act365Fixed, DayCount};
use hazard_core::Date;
use serde::{Deserialize, Serialize};

use crate::curves::{DiscountCurve, HazardRateCurve};
use crate::error::CurveResult;
use crate::instruments::CreditDefaultSwap;

/// Whether the premium leg is quoted net of accrued premium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceType {
    /// Net of premium accrued up to the step-in date.
    #[default]
    Clean,
    /// Including accrued premium.
    Dirty,
}

/// Computes the two legs of a CDS on a given hazard curve.
///
/// Both values are scaled by notional. The premium leg is the value of a
/// unit spread (the risky annuity times notional), so a trade with spread
/// `s` pays `s * premium_leg_pv`.
pub trait LegPricer: Send + Sync {
    /// Premium leg value per unit spread.
    fn premium_leg_pv(
        &self,
        valuation_date: Date,
        cds: &CreditDefaultSwap,
        discount: &dyn DiscountCurve,
        hazard: &HazardRateCurve,
    ) -> CurveResult<f64>;

    /// Protection (contingent) leg value.
    fn contingent_leg_pv(
        &self,
        valuation_date: Date,
        cds: &CreditDefaultSwap,
        discount: &dyn DiscountCurve,
        hazard: &HazardRateCurve,
    ) -> CurveResult<f64>;
}

/// ISDA standard model leg integration.
///
/// Survival and discounting are integrated exactly on every interval between
/// consecutive hazard and discount curve nodes, assuming both hazard and
/// forward rates are constant within the interval. Values are expressed as
/// of the cash settlement date, `cash_settlement_days` weekdays after the
/// valuation date. The step-in date is the day after valuation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IsdaLegPricer {
    /// Weekdays from valuation to cash settlement.
    pub cash_settlement_days: u32,
    /// Clean or dirty premium leg.
    pub price_type: PriceType,
}

impl Default for IsdaLegPricer {
    fn default() -> Self {
        Self {
            cash_settlement_days: 3,
            price_type: PriceType::Clean,
        }
    }
}

/// Below this, `λ + f` is treated as zero and the closed forms are replaced
/// by their limits.
const SMALL_RATE: f64 = 1e-10;

impl IsdaLegPricer {
    /// Sets the cash settlement lag.
    #[must_use]
    pub fn with_cash_settlement_days(mut self, days: u32) -> Self {
        self.cash_settlement_days = days;
        self
    }

    /// Sets clean or dirty pricing.
    #[must_use]
    pub fn with_price_type(mut self, price_type: PriceType) -> Self {
        self.price_type = price_type;
        self
    }

    fn cash_settlement_discount(&self, valuation_date: Date, discount: &dyn DiscountCurve) -> f64 {
        let settle = valuation_date.add_weekdays(i64::from(self.cash_settlement_days));
        discount.discount_factor(year_time(valuation_date, settle))
    }

    /// Premium accrued from the last accrual start before `step_in` to
    /// `step_in`, per unit spread.
    fn accrued_premium(cds: &CreditDefaultSwap, step_in: Date) -> CurveResult<f64> {
        let accrued = cds
            .premium_schedule()?
            .iter()
            .rev()
            .find(|p| p.start < step_in)
            .map_or(0.0, |p| cds.day_count().year_fraction_f64(p.start, step_in));
        Ok(accrued)
    }

    /// Value of premium accrued at default within one accrual period.
    #[allow(clippy::too_many_arguments)]
    fn accrual_on_default(
        accrual: f64,
        t_start: f64,
        t_end: f64,
        t_step_in: f64,
        nodes: &[f64],
        discount: &dyn DiscountCurve,
        hazard: &HazardRateCurve,
    ) -> f64 {
        let span = t_end - t_start;
        if span <= 0.0 {
            return 0.0;
        }
        let accrual_rate = accrual / span;
        let half_day = 0.5 / 365.0;

        let mut prev = t_start.max(t_step_in);
        let mut s0 = hazard.survival_probability(prev);
        let mut df0 = discount.discount_factor(prev);
        let mut pv = 0.0;

        for t1 in grid(t_start, t_end, nodes).into_iter().skip(1) {
            if t1 <= t_step_in {
                continue;
            }
            let s1 = hazard.survival_probability(t1);
            let df1 = discount.discount_factor(t1);
            let tau0 = prev - t_start + half_day;
            let tau1 = t1 - t_start + half_day;
            let dt = tau1 - tau0;
            let lambda = (s0 / s1).ln() / dt;
            let fwd = (df0 / df1).ln() / dt;
            let k = lambda + fwd + 1e-50;

            pv += if k.abs() < SMALL_RATE {
                lambda * accrual_rate * s0 * df0 * (tau0 * dt + 0.5 * dt * dt)
            } else {
                lambda
                    * accrual_rate
                    * s0
                    * df0
                    * ((tau0 + 1.0 / k) / k - (tau1 + 1.0 / k) / k * s1 / s0 * df1 / df0)
            };

            s0 = s1;
            df0 = df1;
            prev = t1;
        }
        pv
    }
}

impl LegPricer for IsdaLegPricer {
    fn premium_leg_pv(
        &self,
        valuation_date: Date,
        cds: &CreditDefaultSwap,
        discount: &dyn DiscountCurve,
        hazard: &HazardRateCurve,
    ) -> CurveResult<f64> {
        let step_in = valuation_date.add_days(1);
        if cds.maturity() < step_in {
            return Ok(0.0);
        }
        let offset = if cds.protection_from_start_of_day() { -1 } else { 0 };
        let nodes = merged_nodes(hazard, discount);
        let t = |d: Date| year_time(valuation_date, d);

        let mut pv = 0.0;
        for period in cds.premium_schedule()? {
            if period.end <= step_in {
                continue;
            }
            let accrual = cds.day_count().year_fraction_f64(period.start, period.end);
            let survival = hazard.survival_probability(t(period.end.add_days(offset)));
            pv += accrual * discount.discount_factor(t(period.payment)) * survival;

            if cds.include_accrued_premium() {
                pv += Self::accrual_on_default(
                    accrual,
                    t(period.start.add_days(offset)),
                    t(period.end.add_days(offset)),
                    t(step_in.add_days(offset)),
                    &nodes,
                    discount,
                    hazard,
                );
            }
        }

        pv /= self.cash_settlement_discount(valuation_date, discount);
        if self.price_type == PriceType::Clean {
            pv -= Self::accrued_premium(cds, step_in)?;
        }
        Ok(cds.notional() * pv)
    }

    fn contingent_leg_pv(
        &self,
        valuation_date: Date,
        cds: &CreditDefaultSwap,
        discount: &dyn DiscountCurve,
        hazard: &HazardRateCurve,
    ) -> CurveResult<f64> {
        if valuation_date > cds.maturity() {
            return Ok(0.0);
        }
        let step_in = valuation_date.add_days(1);
        let (protection_start, offset) = if cds.protection_from_start_of_day() {
            (valuation_date.add_days(-1), 1)
        } else {
            (valuation_date, 0)
        };
        let start = protection_start
            .max(step_in.add_days(-offset))
            .max(valuation_date.add_days(-1));

        let nodes = merged_nodes(hazard, discount);
        let times = grid(
            year_time(valuation_date, start),
            year_time(valuation_date, cds.maturity()),
            &nodes,
        );

        let lgd = 1.0 - cds.recovery_rate();
        let mut s0 = hazard.survival_probability(times[0]);
        let mut df0 = discount.discount_factor(times[0]);
        let mut pv = 0.0;
        for pair in times.windows(2) {
            let dt = pair[1] - pair[0];
            let s1 = hazard.survival_probability(pair[1]);
            let df1 = discount.discount_factor(pair[1]);
            let lambda = (s0 / s1).ln() / dt;
            let fwd = (df0 / df1).ln() / dt;
            let k = lambda + fwd;

            pv += if k.abs() < SMALL_RATE {
                lgd * lambda * dt * s0 * df0
            } else {
                lgd * (lambda / k) * (1.0 - (-k * dt).exp()) * s0 * df0
            };
            s0 = s1;
            df0 = df1;
        }

        Ok(cds.notional() * pv / self.cash_settlement_discount(valuation_date, discount))
    }
}

fn year_time(from: Date, to: Date) -> f64 {
    Act365Fixed.year_fraction_f64(from, to)
}

/// Sorted union of hazard and discount node times.
fn merged_nodes(hazard: &HazardRateCurve, discount: &dyn DiscountCurve) -> Vec<f64> {
    let mut nodes: Vec<f64> = hazard
        .times()
        .iter()
        .chain(discount.node_times())
        .copied()
        .collect();
    nodes.sort_by(f64::total_cmp);
    nodes.dedup();
    nodes
}

/// `start`, every node strictly inside `(start, end)`, then `end`.
fn grid(start: f64, end: f64, nodes: &[f64]) -> Vec<f64> {
    let mut points = Vec::with_capacity(nodes.len() + 2);
    points.push(start);
    points.extend(nodes.iter().copied().filter(|&t| t > start && t < end));
    if end > start {
        points.push(end);
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::FlatDiscountCurve;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn five_year() -> (Date, CreditDefaultSwap) {
        let valuation = date(2025, 3, 20);
        let cds = CreditDefaultSwap::new(valuation, date(2030, 3, 20), 100.0, 0.4).unwrap();
        (valuation, cds)
    }

    #[test]
    fn test_grid() {
        assert_eq!(grid(0.0, 2.0, &[0.0, 1.0, 2.0, 3.0]), vec![0.0, 1.0, 2.0]);
        assert_eq!(grid(0.5, 0.5, &[1.0]), vec![0.5]);
    }

    #[test]
    fn test_zero_hazard_has_no_protection_value() {
        let (valuation, cds) = five_year();
        let hazard = HazardRateCurve::flat(0.0, 0.4).unwrap();
        let discount = FlatDiscountCurve::new(0.02);
        let pricer = IsdaLegPricer::default();
        let contingent = pricer.contingent_leg_pv(valuation, &cds, &discount, &hazard).unwrap();
        assert_eq!(contingent, 0.0);
    }

    #[test]
    fn test_contingent_leg_matches_closed_form() {
        let (valuation, cds) = five_year();
        let h = 0.02;
        let r = 0.03;
        let hazard = HazardRateCurve::flat(h, 0.4).unwrap();
        let discount = FlatDiscountCurve::new(r);
        let pricer = IsdaLegPricer::default().with_cash_settlement_days(0);

        let t = year_time(valuation, cds.maturity());
        let expected = 0.6 * h / (h + r) * (1.0 - (-(h + r) * t).exp());
        let pv = pricer.contingent_leg_pv(valuation, &cds, &discount, &hazard).unwrap();
        assert_relative_eq!(pv, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_premium_leg_close_to_risky_annuity() {
        let (valuation, cds) = five_year();
        let h = 0.02;
        let r = 0.03;
        let hazard = HazardRateCurve::flat(h, 0.4).unwrap();
        let discount = FlatDiscountCurve::new(r);
        let pricer = IsdaLegPricer::default()
            .with_cash_settlement_days(0)
            .with_price_type(PriceType::Dirty);

        // Continuous annuity scaled from ACT/365 to ACT/360 accrual.
        let t = year_time(valuation, cds.maturity());
        let annuity = (1.0 - (-(h + r) * t).exp()) / (h + r) * 365.0 / 360.0;
        let pv = pricer.premium_leg_pv(valuation, &cds, &discount, &hazard).unwrap();
        assert_relative_eq!(pv, annuity, max_relative = 1e-2);
    }

    #[test]
    fn test_clean_premium_is_dirty_minus_accrued() {
        let (valuation, cds) = five_year();
        let hazard = HazardRateCurve::flat(0.02, 0.4).unwrap();
        let discount = FlatDiscountCurve::new(0.03);
        let dirty = IsdaLegPricer::default().with_price_type(PriceType::Dirty);
        let clean = IsdaLegPricer::default();

        let d = dirty.premium_leg_pv(valuation, &cds, &discount, &hazard).unwrap();
        let c = clean.premium_leg_pv(valuation, &cds, &discount, &hazard).unwrap();
        // One day of ACT/360 accrual from start to step-in.
        assert_relative_eq!(d - c, 1.0 / 360.0, epsilon = 1e-12);
    }

    #[test]
    fn test_accrued_premium_adds_value() {
        let (valuation, cds) = five_year();
        let hazard = HazardRateCurve::flat(0.05, 0.4).unwrap();
        let discount = FlatDiscountCurve::new(0.01);
        let pricer = IsdaLegPricer::default();

        let with = pricer.premium_leg_pv(valuation, &cds, &discount, &hazard).unwrap();
        let without = pricer
            .premium_leg_pv(valuation, &cds.with_accrued_premium(false), &discount, &hazard)
            .unwrap();
        assert!(with > without);
        // Roughly half a period of premium times the default probability.
        assert!(with - without < 0.05);
    }

    #[test]
    fn test_legs_scale_with_notional() {
        let (valuation, cds) = five_year();
        let hazard = HazardRateCurve::flat(0.02, 0.4).unwrap();
        let discount = FlatDiscountCurve::new(0.03);
        let pricer = IsdaLegPricer::default();
        let big = cds.clone().with_notional(1e7);

        let unit = pricer.contingent_leg_pv(valuation, &cds, &discount, &hazard).unwrap();
        let scaled = pricer.contingent_leg_pv(valuation, &big, &discount, &hazard).unwrap();
        assert_relative_eq!(scaled, 1e7 * unit, max_relative = 1e-14);
    }

    #[test]
    fn test_expired_trade_is_worthless() {
        let (_, cds) = five_year();
        let hazard = HazardRateCurve::flat(0.02, 0.4).unwrap();
        let discount = FlatDiscountCurve::new(0.03);
        let pricer = IsdaLegPricer::default();
        let later = date(2031, 1, 1);
        assert_eq!(pricer.premium_leg_pv(later, &cds, &discount, &hazard).unwrap(), 0.0);
        assert_eq!(pricer.contingent_leg_pv(later, &cds, &discount, &hazard).unwrap(), 0.0);
    }
}
