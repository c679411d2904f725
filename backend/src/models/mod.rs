//! Domain models for the retention projection

pub mod inputs;
pub mod plan;
pub mod result;

// Re-exports
pub use inputs::{
    amount_from_f64, count_from_f64, normalize_amount, normalize_count, CalculatorInputs,
};
pub use plan::{PlanCatalog, PlanDefinition, PlanKey, PlanKeyError};
pub use result::{ProjectionBreakdown, ProjectionResult};
