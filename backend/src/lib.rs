//! Retention ROI Core - Rust Engine
//!
//! Projects the return on a follow-up messaging subscription for a retailer,
//! from three inputs: monthly customers, average order value, and returning
//! customers.
//!
//! # Architecture
//!
//! - **models**: Domain types (inputs, plan catalog, result)
//! - **core**: Configuration and numeric guards
//! - **growth**: Logistic retention growth model
//! - **revenue**: Revenue deltas, yearly increase, lost revenue
//! - **costs**: Tier cost with overage, plan recommendation
//! - **breakeven**: Friction-weighted break-even estimate
//! - **orchestrator**: Engine assembling the final result
//!
//! # Critical Invariants
//!
//! 1. Projections are pure: same inputs + plan + config = identical result
//! 2. Projections never fail; degenerate inputs degrade to 0, never NaN/Infinity
//! 3. Every tuning constant is a named, overridable config value
//!
//! # Example
//!
//! ```rust
//! use retention_roi_core_rs::{CalculatorInputs, PlanKey, RoiEngine};
//!
//! let engine = RoiEngine::builtin();
//! let inputs = CalculatorInputs::from_raw("300", "100", "30");
//! let result = engine.project(&inputs, PlanKey::Basic);
//!
//! assert_eq!(result.messages_needed, 1200);
//! assert_eq!(result.total_monthly_cost, 1950.0);
//! assert_eq!(result.days_to_break_even, 40);
//! ```

// Module declarations
pub mod breakeven;
pub mod core;
pub mod costs;
pub mod growth;
pub mod models;
pub mod orchestrator;
pub mod revenue;

// Re-exports for convenience
pub use breakeven::{BreakEvenEstimate, BreakEvenEstimator};
pub use crate::core::config::{
    BreakEvenFloor, BreakEvenParams, ConfigError, GrowthParams, MessagingParams,
    ProjectionConfig, RecommendationThresholds, RevenueParams,
};
pub use costs::{recommend_plan, TierCost, TierCostCalculator};
pub use growth::{Horizon, RetentionCurve, RetentionGrowthModel, HORIZON_MONTHS};
pub use models::{
    inputs::{amount_from_f64, count_from_f64, normalize_amount, normalize_count, CalculatorInputs},
    plan::{PlanCatalog, PlanDefinition, PlanKey, PlanKeyError},
    result::{ProjectionBreakdown, ProjectionResult},
};
pub use orchestrator::{compute_projection, config_hash, roi_percent, ProjectionError, RoiEngine};
pub use revenue::{RevenueProjection, RevenueProjector};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn retention_roi_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::projection::compute_projection, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::projection::compare_plans, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::projection::plan_catalog, m)?)?;
    Ok(())
}
