//! Plan catalog
//!
//! The three subscription tiers a retailer can buy. Each tier has a USD base
//! price, a monthly message quota, and a per-message overage price.
//!
//! The catalog is an immutable table ordered Basic, Standard, Pro. Alternate
//! pricing schedules are built with [`PlanCatalog::new`] and go through the
//! same validation as the default one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::core::config::ConfigError;

/// Error returned when a plan key string is not one of the catalog keys
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown plan '{input}': expected one of basic, standard, pro")]
pub struct PlanKeyError {
    pub input: String,
}

/// Identifies one of the three catalog tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanKey {
    Basic,
    Standard,
    Pro,
}

impl PlanKey {
    /// All keys in catalog order
    pub const ALL: [PlanKey; 3] = [PlanKey::Basic, PlanKey::Standard, PlanKey::Pro];

    /// Lowercase key as used by callers ("basic", "standard", "pro")
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanKey::Basic => "basic",
            PlanKey::Standard => "standard",
            PlanKey::Pro => "pro",
        }
    }

    fn index(self) -> usize {
        match self {
            PlanKey::Basic => 0,
            PlanKey::Standard => 1,
            PlanKey::Pro => 2,
        }
    }
}

impl fmt::Display for PlanKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanKey {
    type Err = PlanKeyError;

    /// Parse a plan key, ignoring case and surrounding whitespace
    ///
    /// # Example
    /// ```
    /// use retention_roi_core_rs::PlanKey;
    ///
    /// assert_eq!(" Pro ".parse::<PlanKey>(), Ok(PlanKey::Pro));
    /// assert!("gold".parse::<PlanKey>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(PlanKey::Basic),
            "standard" => Ok(PlanKey::Standard),
            "pro" => Ok(PlanKey::Pro),
            _ => Err(PlanKeyError {
                input: s.to_string(),
            }),
        }
    }
}

/// One pricing tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDefinition {
    /// Catalog key this definition belongs to
    pub key: PlanKey,

    /// Display name (e.g., "Basic")
    pub name: String,

    /// Base subscription price per month, in USD
    pub monthly_price_usd: f64,

    /// Messages covered by the base price each month
    pub messages_included: u64,

    /// Price of each message beyond the quota, in USD
    pub additional_message_cost_usd: f64,
}

impl PlanDefinition {
    pub fn new(
        key: PlanKey,
        name: impl Into<String>,
        monthly_price_usd: f64,
        messages_included: u64,
        additional_message_cost_usd: f64,
    ) -> Self {
        Self {
            key,
            name: name.into(),
            monthly_price_usd,
            messages_included,
            additional_message_cost_usd,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.monthly_price_usd.is_finite() && self.monthly_price_usd > 0.0) {
            return Err(ConfigError::InvalidPlanPrice {
                plan: self.key,
                value: self.monthly_price_usd,
            });
        }
        if self.messages_included == 0 {
            return Err(ConfigError::EmptyMessageQuota { plan: self.key });
        }
        if !(self.additional_message_cost_usd.is_finite()
            && self.additional_message_cost_usd > 0.0)
        {
            return Err(ConfigError::InvalidOveragePrice {
                plan: self.key,
                value: self.additional_message_cost_usd,
            });
        }
        Ok(())
    }
}

/// Immutable table of the three pricing tiers
///
/// # Example
/// ```
/// use retention_roi_core_rs::{PlanCatalog, PlanKey};
///
/// let catalog = PlanCatalog::default();
/// let standard = catalog.get(PlanKey::Standard);
/// assert_eq!(standard.monthly_price_usd, 49.0);
/// assert_eq!(standard.messages_included, 5000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanCatalog {
    plans: [PlanDefinition; 3],
}

impl PlanCatalog {
    /// Build a catalog from one definition per tier
    ///
    /// # Errors
    /// Returns `ConfigError` if a definition is filed under the wrong key or
    /// breaks a positivity constraint (price, quota, overage price).
    pub fn new(
        basic: PlanDefinition,
        standard: PlanDefinition,
        pro: PlanDefinition,
    ) -> Result<Self, ConfigError> {
        let catalog = Self {
            plans: [basic, standard, pro],
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check key ordering and per-plan constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (expected, plan) in PlanKey::ALL.iter().zip(self.plans.iter()) {
            if plan.key != *expected {
                return Err(ConfigError::MisplacedPlan {
                    expected: *expected,
                    found: plan.key,
                });
            }
            plan.validate()?;
        }
        Ok(())
    }

    /// Look up a tier by key
    pub fn get(&self, key: PlanKey) -> &PlanDefinition {
        &self.plans[key.index()]
    }

    /// Iterate tiers in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &PlanDefinition> {
        self.plans.iter()
    }
}

impl Default for PlanCatalog {
    fn default() -> Self {
        Self {
            plans: [
                PlanDefinition::new(PlanKey::Basic, "Basic", 13.0, 1_000, 0.01),
                PlanDefinition::new(PlanKey::Standard, "Standard", 49.0, 5_000, 0.008),
                PlanDefinition::new(PlanKey::Pro, "Pro", 149.0, 15_000, 0.006),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        assert!(PlanCatalog::default().validate().is_ok());
    }

    #[test]
    fn test_plan_key_round_trips_through_str() {
        for key in PlanKey::ALL {
            assert_eq!(key.as_str().parse::<PlanKey>(), Ok(key));
        }
    }

    #[test]
    fn test_misplaced_plan_rejected() {
        let result = PlanCatalog::new(
            PlanDefinition::new(PlanKey::Standard, "Standard", 49.0, 5_000, 0.008),
            PlanDefinition::new(PlanKey::Basic, "Basic", 13.0, 1_000, 0.01),
            PlanDefinition::new(PlanKey::Pro, "Pro", 149.0, 15_000, 0.006),
        );
        assert_eq!(
            result.unwrap_err(),
            ConfigError::MisplacedPlan {
                expected: PlanKey::Basic,
                found: PlanKey::Standard,
            }
        );
    }
}
