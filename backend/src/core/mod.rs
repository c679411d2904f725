//! Engine-wide configuration and numeric guards

pub mod config;

pub use config::{
    BreakEvenFloor, BreakEvenParams, ConfigError, GrowthParams, MessagingParams,
    ProjectionConfig, RecommendationThresholds, RevenueParams,
};

/// Replace NaN and infinities with 0
///
/// Applied wherever a projected figure leaves a component, so the result
/// object never carries non-finite values.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        tracing::trace!(value, "non-finite projection value clamped to 0");
        0.0
    }
}
