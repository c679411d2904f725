//! Projection engine
//!
//! Runs the components in order for one set of inputs and one selected plan:
//!
//! 1. Retention growth curve (months 1, 2, 3, 6)
//! 2. Revenue projection (increases, yearly total, lost revenue)
//! 3. Tier cost for the selected plan, plan recommendation
//! 4. Break-even estimate
//! 5. ROI and result assembly
//!
//! # Determinism
//!
//! The engine holds only its validated config. Projections take `&self`, do
//! no I/O and keep no state between calls: the same inputs and plan always
//! produce the same result, and concurrent callers never interfere.

use std::sync::OnceLock;

use thiserror::Error;
use tracing::{debug, warn};

use crate::breakeven::BreakEvenEstimator;
use crate::core::config::{ConfigError, ProjectionConfig};
use crate::core::finite_or_zero;
use crate::costs::{recommend_plan, TierCostCalculator};
use crate::growth::RetentionGrowthModel;
use crate::models::inputs::CalculatorInputs;
use crate::models::plan::{PlanCatalog, PlanKey, PlanKeyError};
use crate::models::result::{ProjectionBreakdown, ProjectionResult};
use crate::revenue::RevenueProjector;

use super::fingerprint::config_hash;

/// Errors raised while setting up a projection
#[derive(Debug, Error, PartialEq)]
pub enum ProjectionError {
    #[error("Invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error(transparent)]
    UnknownPlan(#[from] PlanKeyError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Retention ROI projection engine
///
/// # Example
///
/// ```rust
/// use retention_roi_core_rs::{CalculatorInputs, PlanKey, ProjectionConfig, RoiEngine};
///
/// let engine = RoiEngine::new(ProjectionConfig::default()).unwrap();
/// let inputs = CalculatorInputs::new(100, 2500.0, 20);
/// let result = engine.project(&inputs, PlanKey::Basic);
///
/// assert_eq!(result.current_revenue, 250_000.0);
/// assert_eq!(result.recommended_plan, PlanKey::Standard);
/// assert_eq!(result.messages_needed, 400);
/// assert_eq!(result.total_monthly_cost, 1690.0);
/// ```
#[derive(Debug, Clone)]
pub struct RoiEngine {
    config: ProjectionConfig,
    config_hash: String,
}

impl RoiEngine {
    /// Create an engine from a configuration
    ///
    /// # Errors
    ///
    /// * `ProjectionError::InvalidConfig` - a constant breaks a projection invariant
    /// * `ProjectionError::Serialization` - the config could not be fingerprinted
    pub fn new(config: ProjectionConfig) -> Result<Self, ProjectionError> {
        config.validate()?;
        let config_hash = config_hash(&config)?;

        debug!(config_hash = %config_hash, "projection engine ready");

        Ok(Self {
            config,
            config_hash,
        })
    }

    /// Shared engine using the built-in defaults
    ///
    /// # Panics
    ///
    /// If `ProjectionConfig::default()` fails validation or fingerprinting.
    /// The defaults are constants, so this is a programming error caught by
    /// the unit tests, never a runtime condition.
    pub fn builtin() -> &'static RoiEngine {
        static BUILTIN: OnceLock<RoiEngine> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            RoiEngine::new(ProjectionConfig::default())
                .unwrap_or_else(|e| panic!("built-in projection config rejected: {}", e))
        })
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    pub fn config_hash(&self) -> &str {
        &self.config_hash
    }

    pub fn catalog(&self) -> &PlanCatalog {
        &self.config.plans
    }

    /// Tier suggested for a customer volume
    pub fn recommend(&self, monthly_customers: u64) -> PlanKey {
        recommend_plan(monthly_customers, &self.config.recommendation)
    }

    /// Project retention ROI for `inputs` on the selected plan
    pub fn project(&self, inputs: &CalculatorInputs, selected_plan: PlanKey) -> ProjectionResult {
        if !inputs.is_consistent() {
            warn!(
                monthly_customers = inputs.monthly_customers,
                returning_customers = inputs.returning_customers,
                "returning customers exceed monthly customers, retention rate will exceed 100%"
            );
        }

        let config = &self.config;

        let retention = RetentionGrowthModel::new(&config.growth).project(inputs);
        let revenue = RevenueProjector::new(&config.revenue).project(inputs, &retention);

        let plan = config.plans.get(selected_plan);
        let cost = TierCostCalculator::new(&config.messaging).cost(inputs.monthly_customers, plan);
        let recommended_plan = self.recommend(inputs.monthly_customers);

        let break_even = BreakEvenEstimator::new(&config.break_even).estimate(
            &revenue.increase,
            cost.total_monthly_cost,
            inputs.monthly_customers,
        );

        let roi = roi_percent(revenue.monthly_increase, cost.total_monthly_cost);

        debug!(
            plan = %selected_plan,
            recommended = %recommended_plan,
            current_revenue = revenue.current_revenue,
            monthly_increase = revenue.monthly_increase,
            total_monthly_cost = cost.total_monthly_cost,
            days_to_break_even = break_even.days,
            roi,
            "projection computed"
        );

        ProjectionResult {
            inputs: *inputs,
            selected_plan,
            current_revenue: revenue.current_revenue,
            lost_revenue: revenue.lost_revenue,
            potential_revenue: revenue.monthly_increase,
            yearly_increase: revenue.yearly_increase,
            days_to_break_even: break_even.days,
            competitor_advantage: revenue.competitor_advantage,
            recommended_plan,
            plan_cost: cost.plan_cost,
            messages_needed: cost.messages_needed,
            total_monthly_cost: cost.total_monthly_cost,
            roi,
            net_monthly_gain: finite_or_zero(revenue.monthly_increase - cost.total_monthly_cost),
            yearly_cost: finite_or_zero(cost.total_monthly_cost * 12.0),
            config_hash: self.config_hash.clone(),
            breakdown: ProjectionBreakdown {
                retention,
                revenue,
                cost,
                break_even,
            },
        }
    }

    /// Project `inputs` against every tier, in catalog order
    pub fn compare_plans(&self, inputs: &CalculatorInputs) -> Vec<ProjectionResult> {
        PlanKey::ALL
            .iter()
            .map(|plan| self.project(inputs, *plan))
            .collect()
    }

    /// Tier with the lowest total monthly cost (ties go to the smaller tier)
    pub fn cheapest_plan(&self, inputs: &CalculatorInputs) -> PlanKey {
        let calculator = TierCostCalculator::new(&self.config.messaging);

        let mut cheapest = PlanKey::Basic;
        let mut lowest = f64::INFINITY;
        for plan in self.config.plans.iter() {
            let total = calculator
                .cost(inputs.monthly_customers, plan)
                .total_monthly_cost;
            if total < lowest {
                lowest = total;
                cheapest = plan.key;
            }
        }
        cheapest
    }
}

/// `(gain - cost) / cost × 100`, or 0 when there is no cost
pub fn roi_percent(monthly_increase: f64, total_monthly_cost: f64) -> f64 {
    if total_monthly_cost > 0.0 {
        finite_or_zero((monthly_increase - total_monthly_cost) / total_monthly_cost * 100.0)
    } else {
        0.0
    }
}

/// Project with the built-in configuration
///
/// # Example
///
/// ```rust
/// use retention_roi_core_rs::{compute_projection, PlanKey};
///
/// let result = compute_projection(0, 2500.0, 0, PlanKey::Pro);
/// assert_eq!(result.current_revenue, 0.0);
/// assert_eq!(result.days_to_break_even, 0);
/// ```
pub fn compute_projection(
    monthly_customers: u64,
    average_order_value: f64,
    returning_customers: u64,
    selected_plan: PlanKey,
) -> ProjectionResult {
    let inputs = CalculatorInputs::new(monthly_customers, average_order_value, returning_customers);
    RoiEngine::builtin().project(&inputs, selected_plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roi_percent_zero_cost() {
        assert_eq!(roi_percent(1000.0, 0.0), 0.0);
    }

    #[test]
    fn test_roi_percent_break_even_is_zero() {
        assert_eq!(roi_percent(1690.0, 1690.0), 0.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ProjectionConfig::default();
        config.messaging.exchange_rate = 0.0;
        assert_eq!(
            RoiEngine::new(config).unwrap_err(),
            ProjectionError::InvalidConfig(ConfigError::InvalidExchangeRate(0.0))
        );
    }

    #[test]
    fn test_builtin_engine_uses_default_config() {
        let builtin = RoiEngine::builtin();
        assert_eq!(builtin.config(), &ProjectionConfig::default());
        assert_eq!(
            builtin.config_hash(),
            config_hash(&ProjectionConfig::default()).unwrap()
        );
        assert!(!builtin.config_hash().is_empty());
    }
}
