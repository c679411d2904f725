//! Break-even estimation
//!
//! Estimates how many days of incremental revenue it takes to cover one
//! month of subscription cost. Early months are discounted for adoption
//! friction, blended into a single ramp figure, and spread over a month:
//!
//! ```text
//! ramp  = 0.5·(0.6·inc(1)) + 0.3·(0.8·inc(2)) + 0.2·(0.9·inc(3))
//! daily = ramp / 30
//! days  = ceil(total_cost / daily) + 14
//! ```
//!
//! The result is then raised to a size-dependent floor and capped at a
//! global ceiling. No positive daily improvement means no break-even, which
//! is reported as 0 days.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::config::BreakEvenParams;
use crate::core::finite_or_zero;
use crate::growth::Horizon;

/// Break-even figures for one projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenEstimate {
    /// Friction-weighted ramp-up increase per month
    pub weighted_average_increase: f64,

    /// `weighted_average_increase / days_per_month`
    pub daily_cash_flow_improvement: f64,

    /// Days before floor and ceiling are applied (None = no break-even)
    pub raw_days: Option<u64>,

    /// Reported days (0 = no break-even)
    pub days: u64,
}

/// Estimates days to break even
///
/// # Example
/// ```
/// use retention_roi_core_rs::{BreakEvenEstimator, BreakEvenParams, Horizon};
///
/// let params = BreakEvenParams::default();
/// let estimator = BreakEvenEstimator::new(&params);
///
/// let increase = Horizon { month_1: 0.0, month_2: 0.0, month_3: 0.0, month_6: 0.0 };
/// let estimate = estimator.estimate(&increase, 1690.0, 100);
/// assert_eq!(estimate.days, 0);
/// assert_eq!(estimate.raw_days, None);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BreakEvenEstimator<'a> {
    params: &'a BreakEvenParams,
}

impl<'a> BreakEvenEstimator<'a> {
    pub fn new(params: &'a BreakEvenParams) -> Self {
        Self { params }
    }

    /// Blend friction-discounted months 1-3 into one monthly figure
    pub fn weighted_average_increase(&self, increase: &Horizon) -> f64 {
        let [f1, f2, f3] = self.params.friction;
        let [w1, w2, w3] = self.params.ramp_weights;

        finite_or_zero(
            w1 * (increase.month_1 * f1) + w2 * (increase.month_2 * f2) + w3 * (increase.month_3 * f3),
        )
    }

    /// Estimate break-even days for `total_monthly_cost`
    pub fn estimate(
        &self,
        increase: &Horizon,
        total_monthly_cost: f64,
        monthly_customers: u64,
    ) -> BreakEvenEstimate {
        let weighted_average_increase = self.weighted_average_increase(increase);
        let daily_cash_flow_improvement =
            weighted_average_increase / f64::from(self.params.days_per_month);

        if daily_cash_flow_improvement <= 0.0 {
            trace!(
                daily_cash_flow_improvement,
                "no positive daily improvement, break-even undefined"
            );
            return BreakEvenEstimate {
                weighted_average_increase,
                daily_cash_flow_improvement,
                raw_days: None,
                days: 0,
            };
        }

        // `as` saturates, so an enormous ratio lands on u64::MAX and is capped below
        let payback_days = (total_monthly_cost / daily_cash_flow_improvement).ceil() as u64;
        let raw_days = payback_days.saturating_add(self.params.implementation_lag_days);

        let floor = self.params.floor_for(monthly_customers);
        let days = raw_days.max(floor).min(self.params.max_days);

        BreakEvenEstimate {
            weighted_average_increase,
            daily_cash_flow_improvement,
            raw_days: Some(raw_days),
            days,
        }
    }
}
