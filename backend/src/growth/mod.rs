//! Retention growth model
//!
//! Models how the repeat-purchase rate improves once automated follow-ups are
//! switched on. Improvement follows a logistic S-curve: slow adoption in the
//! first months, an inflection around the midpoint, near-saturation by
//! month 6.
//!
//! ```text
//! rate(m) = current + L / (1 + e^(-k·(m - x0)))
//! L       = min(ceiling, current + max_uplift) - current
//! ```
//!
//! # Critical Invariants
//!
//! - Zero monthly customers means a current rate of 0, never NaN
//! - `target_rate <= retention_ceiling` and `target_rate - current_rate <= max_uplift`
//! - When `current_rate < target_rate` the curve is non-decreasing over the horizon
//!
//! A current rate above the ceiling (returning > monthly customers, or an
//! already very loyal base) gives a negative `L` and a declining curve. That
//! is accepted, not corrected.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::config::GrowthParams;
use crate::models::inputs::CalculatorInputs;

/// Months at which the projection is evaluated
pub const HORIZON_MONTHS: [u32; 4] = [1, 2, 3, 6];

/// One value per horizon month
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Horizon {
    pub month_1: f64,
    pub month_2: f64,
    pub month_3: f64,
    pub month_6: f64,
}

impl Horizon {
    /// Evaluate `f` at each horizon month
    pub fn from_fn(mut f: impl FnMut(u32) -> f64) -> Self {
        let [m1, m2, m3, m6] = HORIZON_MONTHS;
        Self {
            month_1: f(m1),
            month_2: f(m2),
            month_3: f(m3),
            month_6: f(m6),
        }
    }

    /// Apply `f` to every value
    pub fn map(self, mut f: impl FnMut(f64) -> f64) -> Self {
        Self {
            month_1: f(self.month_1),
            month_2: f(self.month_2),
            month_3: f(self.month_3),
            month_6: f(self.month_6),
        }
    }

    /// Values in month order
    pub fn to_array(self) -> [f64; 4] {
        [self.month_1, self.month_2, self.month_3, self.month_6]
    }
}

/// Retention trajectory for one set of inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetentionCurve {
    /// `returning / monthly` as a fraction (0 when there are no customers)
    pub current_rate: f64,

    /// Rate the curve approaches
    pub target_rate: f64,

    /// `target_rate - current_rate` (L)
    pub improvement_potential: f64,

    /// Projected rate at months 1, 2, 3, 6
    pub rates: Horizon,
}

/// Logistic retention projection
///
/// # Example
/// ```
/// use retention_roi_core_rs::{CalculatorInputs, GrowthParams, RetentionGrowthModel};
///
/// let params = GrowthParams::default();
/// let model = RetentionGrowthModel::new(&params);
/// let curve = model.project(&CalculatorInputs::new(100, 2500.0, 20));
///
/// assert!((curve.current_rate - 0.20).abs() < 1e-12);
/// assert!((curve.target_rate - 0.55).abs() < 1e-12);
/// // The midpoint sits exactly halfway
/// assert!((curve.rates.month_3 - 0.375).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RetentionGrowthModel<'a> {
    params: &'a GrowthParams,
}

impl<'a> RetentionGrowthModel<'a> {
    pub fn new(params: &'a GrowthParams) -> Self {
        Self { params }
    }

    /// Fraction of monthly customers who are repeat buyers
    pub fn current_rate(inputs: &CalculatorInputs) -> f64 {
        if inputs.monthly_customers == 0 {
            trace!("no monthly customers, retention rate defined as 0");
            return 0.0;
        }
        inputs.returning_customers as f64 / inputs.monthly_customers as f64
    }

    /// Capped rate the curve grows toward
    pub fn target_rate(&self, current_rate: f64) -> f64 {
        self.params
            .retention_ceiling
            .min(current_rate + self.params.max_uplift)
    }

    /// Logistic fraction of the improvement realised by `month`
    pub fn adoption(&self, month: f64) -> f64 {
        let exponent = -self.params.growth_rate * (month - self.params.midpoint_month);
        1.0 / (1.0 + exponent.exp())
    }

    /// Retention rate at an arbitrary month
    pub fn rate_at(&self, current_rate: f64, improvement_potential: f64, month: f64) -> f64 {
        current_rate + improvement_potential * self.adoption(month)
    }

    /// Project the retention curve over the horizon
    pub fn project(&self, inputs: &CalculatorInputs) -> RetentionCurve {
        let current_rate = Self::current_rate(inputs);
        let target_rate = self.target_rate(current_rate);
        let improvement_potential = target_rate - current_rate;

        let rates = Horizon::from_fn(|month| {
            self.rate_at(current_rate, improvement_potential, f64::from(month))
        });

        RetentionCurve {
            current_rate,
            target_rate,
            improvement_potential,
            rates,
        }
    }
}
