//! Revenue projection
//!
//! Turns a retention curve into money: revenue at each horizon month, the
//! increase over what current retention already earns, a yearly total, and
//! the "lost revenue" gap to a theoretical best-case retention.
//!
//! Yearly increase treats months 1-3 individually and assumes month-6
//! performance for the remaining `steady_state_months`:
//!
//! ```text
//! yearly = inc(1) + inc(2) + inc(3) + inc(6) × 9
//! ```
//!
//! `lost_revenue` is NOT clamped. A business already retaining more than the
//! best-case ceiling gets a negative figure.

use serde::{Deserialize, Serialize};

use crate::core::config::RevenueParams;
use crate::core::finite_or_zero;
use crate::growth::{Horizon, RetentionCurve};
use crate::models::inputs::CalculatorInputs;

/// Revenue figures derived from one retention curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueProjection {
    /// `monthly_customers × average_order_value`
    pub current_revenue: f64,

    /// Share of current revenue attributable to returning customers
    pub current_retention_revenue: f64,

    /// `current_revenue × rate(m)` at each horizon month
    pub revenue: Horizon,

    /// `revenue(m) - current_retention_revenue`
    pub increase: Horizon,

    /// Steady-state monthly increase (month 6)
    pub monthly_increase: f64,

    /// Projected increase over the first year
    pub yearly_increase: f64,

    /// `current_revenue × max_retention_ceiling`
    pub max_possible_retention: f64,

    /// Gap between best-case and current retention revenue (may be negative)
    pub lost_revenue: f64,

    /// Portion of lost revenue assumed to go to competitors
    pub competitor_advantage: f64,
}

/// Converts retention trajectories into revenue deltas
///
/// # Example
/// ```
/// use retention_roi_core_rs::{
///     CalculatorInputs, GrowthParams, RetentionGrowthModel, RevenueParams, RevenueProjector,
/// };
///
/// let inputs = CalculatorInputs::new(100, 2500.0, 20);
/// let growth = GrowthParams::default();
/// let curve = RetentionGrowthModel::new(&growth).project(&inputs);
///
/// let params = RevenueParams::default();
/// let revenue = RevenueProjector::new(&params).project(&inputs, &curve);
/// assert_eq!(revenue.current_revenue, 250_000.0);
/// assert!((revenue.lost_revenue - 125_000.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RevenueProjector<'a> {
    params: &'a RevenueParams,
}

impl<'a> RevenueProjector<'a> {
    pub fn new(params: &'a RevenueParams) -> Self {
        Self { params }
    }

    /// Monthly revenue at current volume
    pub fn current_revenue(inputs: &CalculatorInputs) -> f64 {
        finite_or_zero(inputs.monthly_customers as f64 * inputs.average_order_value)
    }

    /// Project revenue for `curve`
    pub fn project(&self, inputs: &CalculatorInputs, curve: &RetentionCurve) -> RevenueProjection {
        let current_revenue = Self::current_revenue(inputs);
        let current_retention_revenue = finite_or_zero(current_revenue * curve.current_rate);

        let revenue = curve.rates.map(|rate| finite_or_zero(current_revenue * rate));
        let increase = revenue.map(|value| finite_or_zero(value - current_retention_revenue));

        let monthly_increase = increase.month_6;
        let yearly_increase = finite_or_zero(
            increase.month_1
                + increase.month_2
                + increase.month_3
                + increase.month_6 * f64::from(self.params.steady_state_months),
        );

        let max_possible_retention =
            finite_or_zero(current_revenue * self.params.max_retention_ceiling);
        let lost_revenue = finite_or_zero(max_possible_retention - current_retention_revenue);
        let competitor_advantage = finite_or_zero(lost_revenue * self.params.competitor_capture);

        RevenueProjection {
            current_revenue,
            current_retention_revenue,
            revenue,
            increase,
            monthly_increase,
            yearly_increase,
            max_possible_retention,
            lost_revenue,
            competitor_advantage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GrowthParams;
    use crate::growth::RetentionGrowthModel;

    fn project(inputs: CalculatorInputs) -> RevenueProjection {
        let growth = GrowthParams::default();
        let curve = RetentionGrowthModel::new(&growth).project(&inputs);
        let params = RevenueParams::default();
        RevenueProjector::new(&params).project(&inputs, &curve)
    }

    #[test]
    fn test_zero_order_value_gives_zero_revenue() {
        let revenue = project(CalculatorInputs::new(100, 0.0, 20));
        assert_eq!(revenue.current_revenue, 0.0);
        assert_eq!(revenue.monthly_increase, 0.0);
        assert_eq!(revenue.yearly_increase, 0.0);
        assert_eq!(revenue.lost_revenue, 0.0);
    }

    #[test]
    fn test_monthly_increase_is_month_six() {
        let revenue = project(CalculatorInputs::new(300, 100.0, 30));
        assert_eq!(revenue.monthly_increase, revenue.increase.month_6);
    }
}
