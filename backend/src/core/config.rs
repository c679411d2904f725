//! Projection configuration
//!
//! Every tuning constant of the engine lives here under a name. The defaults
//! reproduce the fixed heuristic used by the marketing site; callers override
//! individual values (most commonly the exchange rate) through partial JSON.
//!
//! # Critical Invariants
//!
//! - Validation runs once, when an engine is built. The projection itself
//!   never fails.
//! - `messaging.exchange_rate` converts USD list prices into local currency.
//!   It drifts over time and must be refreshed by whoever owns the config.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::plan::{PlanCatalog, PlanKey};

/// Errors raised while validating a [`ProjectionConfig`]
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Retention ceiling must be in (0, 1], got {0}")]
    InvalidRetentionCeiling(f64),

    #[error("Maximum retention uplift must be finite and non-negative, got {0}")]
    InvalidMaxUplift(f64),

    #[error("Logistic growth rate must be finite and positive, got {0}")]
    InvalidGrowthRate(f64),

    #[error("Logistic midpoint month must be finite, got {0}")]
    InvalidMidpoint(f64),

    #[error("Maximum retention ceiling must be in (0, 1], got {0}")]
    InvalidMaxRetentionCeiling(f64),

    #[error("Competitor capture share must be finite and non-negative, got {0}")]
    InvalidCompetitorCapture(f64),

    #[error("Exchange rate must be finite and positive, got {0}")]
    InvalidExchangeRate(f64),

    #[error("Messages per customer must be positive")]
    ZeroMessagesPerCustomer,

    #[error("Recommendation thresholds out of order: basic_max={basic_max}, standard_max={standard_max}")]
    ThresholdsOutOfOrder { basic_max: u64, standard_max: u64 },

    #[error("Break-even {name} must be finite and non-negative, got {value}")]
    InvalidBreakEvenFactor { name: &'static str, value: f64 },

    #[error("Days per month must be positive")]
    ZeroDaysPerMonth,

    #[error("Break-even floor of {floor} days exceeds the {max_days}-day ceiling")]
    FloorAboveCeiling { floor: u64, max_days: u64 },

    #[error("Break-even floor tiers must have increasing customer bounds: {previous} then {next}")]
    FloorTiersOutOfOrder { previous: u64, next: u64 },

    #[error("Plan in slot {expected} has key {found}")]
    MisplacedPlan { expected: PlanKey, found: PlanKey },

    #[error("Plan {plan} monthly price must be finite and positive, got {value}")]
    InvalidPlanPrice { plan: PlanKey, value: f64 },

    #[error("Plan {plan} must include at least one message")]
    EmptyMessageQuota { plan: PlanKey },

    #[error("Plan {plan} overage price must be finite and positive, got {value}")]
    InvalidOveragePrice { plan: PlanKey, value: f64 },
}

/// Logistic retention growth parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthParams {
    /// Highest retention rate the curve approaches (fraction). Default: 0.65
    pub retention_ceiling: f64,

    /// Largest improvement over the current rate (fraction). Default: 0.35
    pub max_uplift: f64,

    /// Logistic steepness `k`. Default: 0.8
    pub growth_rate: f64,

    /// Month of the inflection point `x0`. Default: 3.0
    pub midpoint_month: f64,
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            retention_ceiling: 0.65,
            max_uplift: 0.35,
            growth_rate: 0.8,
            midpoint_month: 3.0,
        }
    }
}

/// Revenue framing parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevenueParams {
    /// Theoretical best-case retention used for "lost revenue". Default: 0.70
    ///
    /// Intentionally higher than `GrowthParams::retention_ceiling`.
    pub max_retention_ceiling: f64,

    /// Share of lost revenue assumed captured by competitors. Default: 0.6
    pub competitor_capture: f64,

    /// Months after the ramp that repeat month-6 performance. Default: 9
    pub steady_state_months: u32,
}

impl Default for RevenueParams {
    fn default() -> Self {
        Self {
            max_retention_ceiling: 0.70,
            competitor_capture: 0.6,
            steady_state_months: 9,
        }
    }
}

/// Message volume and currency parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagingParams {
    /// Follow-up messages sent per customer per month. Default: 4
    pub messages_per_customer: u64,

    /// Local currency units per USD. Default: 130.0
    pub exchange_rate: f64,
}

impl Default for MessagingParams {
    fn default() -> Self {
        Self {
            messages_per_customer: 4,
            exchange_rate: 130.0,
        }
    }
}

/// Customer-volume thresholds for the recommended plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationThresholds {
    /// Up to this many customers → Basic. Default: 75
    pub basic_max_customers: u64,

    /// Up to this many customers → Standard, above → Pro. Default: 300
    pub standard_max_customers: u64,
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            basic_max_customers: 75,
            standard_max_customers: 300,
        }
    }
}

/// Minimum break-even days for businesses below a customer count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakEvenFloor {
    /// Applies when `monthly_customers < below_customers`
    pub below_customers: u64,

    /// Minimum reported days
    pub min_days: u64,
}

/// Break-even estimation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakEvenParams {
    /// Discount on months 1, 2, 3 increases. Default: [0.6, 0.8, 0.9]
    pub friction: [f64; 3],

    /// Weights of the discounted months 1, 2, 3. Default: [0.5, 0.3, 0.2]
    pub ramp_weights: [f64; 3],

    /// Days used to turn a monthly increase into a daily one. Default: 30
    pub days_per_month: u32,

    /// Fixed setup lag added to every estimate. Default: 14
    pub implementation_lag_days: u64,

    /// Size-dependent floors, checked in order. Default: <50 → 45, <150 → 30
    pub floors: Vec<BreakEvenFloor>,

    /// Floor for businesses above every tier. Default: 21
    pub default_floor_days: u64,

    /// Global ceiling. Default: 90
    pub max_days: u64,
}

impl Default for BreakEvenParams {
    fn default() -> Self {
        Self {
            friction: [0.6, 0.8, 0.9],
            ramp_weights: [0.5, 0.3, 0.2],
            days_per_month: 30,
            implementation_lag_days: 14,
            floors: vec![
                BreakEvenFloor {
                    below_customers: 50,
                    min_days: 45,
                },
                BreakEvenFloor {
                    below_customers: 150,
                    min_days: 30,
                },
            ],
            default_floor_days: 21,
            max_days: 90,
        }
    }
}

impl BreakEvenParams {
    /// Floor for a business of the given size
    pub fn floor_for(&self, monthly_customers: u64) -> u64 {
        self.floors
            .iter()
            .find(|tier| monthly_customers < tier.below_customers)
            .map(|tier| tier.min_days)
            .unwrap_or(self.default_floor_days)
    }
}

/// Complete engine configuration
///
/// # Example
/// ```
/// use retention_roi_core_rs::ProjectionConfig;
///
/// let config: ProjectionConfig =
///     serde_json::from_str(r#"{ "messaging": { "exchange_rate": 150.0 } }"#).unwrap();
/// assert_eq!(config.messaging.exchange_rate, 150.0);
/// assert_eq!(config.messaging.messages_per_customer, 4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub growth: GrowthParams,
    pub revenue: RevenueParams,
    pub messaging: MessagingParams,
    pub recommendation: RecommendationThresholds,
    pub break_even: BreakEvenParams,
    pub plans: PlanCatalog,
}

impl ProjectionConfig {
    /// Check every constraint the projection relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let growth = &self.growth;
        if !is_unit_fraction(growth.retention_ceiling) {
            return Err(ConfigError::InvalidRetentionCeiling(growth.retention_ceiling));
        }
        if !is_non_negative(growth.max_uplift) {
            return Err(ConfigError::InvalidMaxUplift(growth.max_uplift));
        }
        if !(growth.growth_rate.is_finite() && growth.growth_rate > 0.0) {
            return Err(ConfigError::InvalidGrowthRate(growth.growth_rate));
        }
        if !growth.midpoint_month.is_finite() {
            return Err(ConfigError::InvalidMidpoint(growth.midpoint_month));
        }

        let revenue = &self.revenue;
        if !is_unit_fraction(revenue.max_retention_ceiling) {
            return Err(ConfigError::InvalidMaxRetentionCeiling(
                revenue.max_retention_ceiling,
            ));
        }
        if !is_non_negative(revenue.competitor_capture) {
            return Err(ConfigError::InvalidCompetitorCapture(revenue.competitor_capture));
        }

        let messaging = &self.messaging;
        if !(messaging.exchange_rate.is_finite() && messaging.exchange_rate > 0.0) {
            return Err(ConfigError::InvalidExchangeRate(messaging.exchange_rate));
        }
        if messaging.messages_per_customer == 0 {
            return Err(ConfigError::ZeroMessagesPerCustomer);
        }

        let thresholds = &self.recommendation;
        if thresholds.basic_max_customers > thresholds.standard_max_customers {
            return Err(ConfigError::ThresholdsOutOfOrder {
                basic_max: thresholds.basic_max_customers,
                standard_max: thresholds.standard_max_customers,
            });
        }

        self.validate_break_even()?;
        self.plans.validate()
    }

    fn validate_break_even(&self) -> Result<(), ConfigError> {
        let params = &self.break_even;
        for value in params.friction {
            if !is_non_negative(value) {
                return Err(ConfigError::InvalidBreakEvenFactor {
                    name: "friction factor",
                    value,
                });
            }
        }
        for value in params.ramp_weights {
            if !is_non_negative(value) {
                return Err(ConfigError::InvalidBreakEvenFactor {
                    name: "ramp weight",
                    value,
                });
            }
        }
        if params.days_per_month == 0 {
            return Err(ConfigError::ZeroDaysPerMonth);
        }

        let mut previous: Option<u64> = None;
        for tier in &params.floors {
            if let Some(prev) = previous {
                if tier.below_customers <= prev {
                    return Err(ConfigError::FloorTiersOutOfOrder {
                        previous: prev,
                        next: tier.below_customers,
                    });
                }
            }
            previous = Some(tier.below_customers);

            if tier.min_days > params.max_days {
                return Err(ConfigError::FloorAboveCeiling {
                    floor: tier.min_days,
                    max_days: params.max_days,
                });
            }
        }
        if params.default_floor_days > params.max_days {
            return Err(ConfigError::FloorAboveCeiling {
                floor: params.default_floor_days,
                max_days: params.max_days,
            });
        }
        Ok(())
    }
}

fn is_unit_fraction(value: f64) -> bool {
    value.is_finite() && value > 0.0 && value <= 1.0
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
