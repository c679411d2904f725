//! Tier cost calculation
//!
//! Computes what a plan costs per month in local currency, given the message
//! volume the retailer's customer base generates, and recommends a tier from
//! customer volume alone.
//!
//! ```text
//! messages  = monthly_customers × messages_per_customer
//! overage   = max(0, messages - included)
//! total     = (price_usd + overage × overage_price_usd) × exchange_rate
//! ```
//!
//! The recommended plan is independent of the plan being costed. Both are
//! always reported.

use serde::{Deserialize, Serialize};

use crate::core::config::{MessagingParams, RecommendationThresholds};
use crate::core::finite_or_zero;
use crate::models::plan::{PlanDefinition, PlanKey};

/// Monthly cost of one plan for one customer volume
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierCost {
    /// Plan that was costed
    pub plan: PlanKey,

    /// Follow-up messages the customer base needs each month
    pub messages_needed: u64,

    /// Messages beyond the plan quota
    pub overage_messages: u64,

    /// Overage charge in USD
    pub overage_cost_usd: f64,

    /// Base price converted to local currency
    pub plan_cost: f64,

    /// Base price plus overage, in local currency
    pub total_monthly_cost: f64,
}

/// Prices a plan against a customer volume
///
/// # Example
/// ```
/// use retention_roi_core_rs::{MessagingParams, PlanCatalog, PlanKey, TierCostCalculator};
///
/// let params = MessagingParams::default();
/// let catalog = PlanCatalog::default();
/// let calculator = TierCostCalculator::new(&params);
///
/// // 300 customers need 1200 messages; Basic includes 1000
/// let cost = calculator.cost(300, catalog.get(PlanKey::Basic));
/// assert_eq!(cost.overage_messages, 200);
/// assert_eq!(cost.total_monthly_cost, 1950.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TierCostCalculator<'a> {
    params: &'a MessagingParams,
}

impl<'a> TierCostCalculator<'a> {
    pub fn new(params: &'a MessagingParams) -> Self {
        Self { params }
    }

    /// Messages needed for `monthly_customers`
    pub fn messages_needed(&self, monthly_customers: u64) -> u64 {
        monthly_customers.saturating_mul(self.params.messages_per_customer)
    }

    /// Convert a USD amount to local currency
    pub fn to_local(&self, usd: f64) -> f64 {
        finite_or_zero(usd * self.params.exchange_rate)
    }

    /// Cost `plan` for `monthly_customers`
    pub fn cost(&self, monthly_customers: u64, plan: &PlanDefinition) -> TierCost {
        let messages_needed = self.messages_needed(monthly_customers);
        let plan_cost = self.to_local(plan.monthly_price_usd);

        if messages_needed <= plan.messages_included {
            return TierCost {
                plan: plan.key,
                messages_needed,
                overage_messages: 0,
                overage_cost_usd: 0.0,
                plan_cost,
                total_monthly_cost: plan_cost,
            };
        }

        let overage_messages = messages_needed - plan.messages_included;
        let overage_cost_usd =
            finite_or_zero(overage_messages as f64 * plan.additional_message_cost_usd);
        let total_monthly_cost = self.to_local(plan.monthly_price_usd + overage_cost_usd);

        TierCost {
            plan: plan.key,
            messages_needed,
            overage_messages,
            overage_cost_usd,
            plan_cost,
            total_monthly_cost,
        }
    }
}

/// Recommend a tier from customer volume
///
/// # Example
/// ```
/// use retention_roi_core_rs::{recommend_plan, PlanKey, RecommendationThresholds};
///
/// let thresholds = RecommendationThresholds::default();
/// assert_eq!(recommend_plan(75, &thresholds), PlanKey::Basic);
/// assert_eq!(recommend_plan(76, &thresholds), PlanKey::Standard);
/// assert_eq!(recommend_plan(301, &thresholds), PlanKey::Pro);
/// ```
pub fn recommend_plan(monthly_customers: u64, thresholds: &RecommendationThresholds) -> PlanKey {
    if monthly_customers <= thresholds.basic_max_customers {
        PlanKey::Basic
    } else if monthly_customers <= thresholds.standard_max_customers {
        PlanKey::Standard
    } else {
        PlanKey::Pro
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::plan::PlanCatalog;

    #[test]
    fn test_quota_boundary_has_no_overage() {
        let params = MessagingParams::default();
        let catalog = PlanCatalog::default();
        let calculator = TierCostCalculator::new(&params);

        // 250 × 4 = 1000, exactly the Basic quota
        let cost = calculator.cost(250, catalog.get(PlanKey::Basic));
        assert_eq!(cost.messages_needed, 1000);
        assert_eq!(cost.overage_messages, 0);
        assert_eq!(cost.total_monthly_cost, 1690.0);
    }

    #[test]
    fn test_messages_needed_saturates() {
        let params = MessagingParams::default();
        let calculator = TierCostCalculator::new(&params);
        assert_eq!(calculator.messages_needed(u64::MAX), u64::MAX);
    }
}
