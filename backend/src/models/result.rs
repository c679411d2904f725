//! Projection result
//!
//! One immutable result per projection call. The headline figures match what
//! the pricing page displays; `breakdown` carries the intermediate values for
//! charting.

use serde::{Deserialize, Serialize};

use crate::breakeven::BreakEvenEstimate;
use crate::costs::TierCost;
use crate::growth::RetentionCurve;
use crate::models::inputs::CalculatorInputs;
use crate::models::plan::PlanKey;
use crate::revenue::RevenueProjection;

/// Intermediate figures behind a [`ProjectionResult`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionBreakdown {
    pub retention: RetentionCurve,
    pub revenue: RevenueProjection,
    pub cost: TierCost,
    pub break_even: BreakEvenEstimate,
}

/// Output of one projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Normalized inputs the projection ran on
    pub inputs: CalculatorInputs,

    /// Plan the caller asked to cost
    pub selected_plan: PlanKey,

    /// Monthly revenue at current volume
    pub current_revenue: f64,

    /// Gap to best-case retention revenue (may be negative)
    pub lost_revenue: f64,

    /// Incremental monthly revenue at month 6
    pub potential_revenue: f64,

    /// Incremental revenue over the first year
    pub yearly_increase: f64,

    /// Days to break even (0 = no break-even)
    pub days_to_break_even: u64,

    /// Lost revenue assumed captured by competitors
    pub competitor_advantage: f64,

    /// Tier suggested by customer volume
    pub recommended_plan: PlanKey,

    /// Selected plan's base price in local currency
    pub plan_cost: f64,

    /// Follow-up messages needed per month
    pub messages_needed: u64,

    /// Selected plan's base price plus overage, in local currency
    pub total_monthly_cost: f64,

    /// Return on investment, percent (may be negative)
    pub roi: f64,

    /// `potential_revenue - total_monthly_cost`
    pub net_monthly_gain: f64,

    /// `total_monthly_cost × 12`
    pub yearly_cost: f64,

    /// SHA-256 of the config the engine was built with
    pub config_hash: String,

    pub breakdown: ProjectionBreakdown,
}

impl ProjectionResult {
    /// Current repeat-purchase rate (fraction)
    pub fn current_retention_rate(&self) -> f64 {
        self.breakdown.retention.current_rate
    }

    /// Rate the growth curve approaches (fraction)
    pub fn target_retention_rate(&self) -> f64 {
        self.breakdown.retention.target_rate
    }

    /// True when a break-even day exists
    pub fn breaks_even(&self) -> bool {
        self.days_to_break_even > 0
    }
}
