//! Property tests for projection invariants
//!
//! These hold for any input, including inconsistent ones (more returning
//! than monthly customers) and extreme magnitudes.

use proptest::prelude::*;
use retention_roi_core_rs::{
    compute_projection, BreakEvenParams, CalculatorInputs, PlanKey, ProjectionResult, RoiEngine,
};

fn plan_strategy() -> impl Strategy<Value = PlanKey> {
    prop_oneof![
        Just(PlanKey::Basic),
        Just(PlanKey::Standard),
        Just(PlanKey::Pro),
    ]
}

/// Realistic inputs: returning customers never exceed monthly customers
fn consistent_inputs() -> impl Strategy<Value = (u64, f64, u64)> {
    (0u64..1_000_000, 0.0f64..100_000.0).prop_flat_map(|(monthly, aov)| {
        (Just(monthly), Just(aov), 0u64..=monthly)
    })
}

fn headline_figures(result: &ProjectionResult) -> [f64; 10] {
    [
        result.current_revenue,
        result.lost_revenue,
        result.potential_revenue,
        result.yearly_increase,
        result.competitor_advantage,
        result.plan_cost,
        result.total_monthly_cost,
        result.roi,
        result.net_monthly_gain,
        result.yearly_cost,
    ]
}

proptest! {
    #[test]
    fn prop_target_rate_is_capped(
        monthly in any::<u64>(),
        aov in any::<f64>(),
        returning in any::<u64>(),
        plan in plan_strategy(),
    ) {
        let result = compute_projection(monthly, aov, returning, plan);
        let current = result.current_retention_rate();
        let target = result.target_retention_rate();

        prop_assert!(target <= 0.65);
        prop_assert!(target - current <= 0.35 + 1e-12);
    }

    #[test]
    fn prop_curve_rises_while_below_target(
        (monthly, aov, returning) in consistent_inputs(),
    ) {
        let result = compute_projection(monthly, aov, returning, PlanKey::Basic);
        let retention = &result.breakdown.retention;
        prop_assume!(retention.current_rate < retention.target_rate);

        let rates = retention.rates;
        prop_assert!(rates.month_1 >= retention.current_rate);
        prop_assert!(rates.month_2 >= rates.month_1);
        prop_assert!(rates.month_3 >= rates.month_2);
        prop_assert!(rates.month_6 >= rates.month_3);
    }

    #[test]
    fn prop_break_even_is_zero_or_within_bounds(
        monthly in any::<u64>(),
        aov in any::<f64>(),
        returning in any::<u64>(),
        plan in plan_strategy(),
    ) {
        let result = compute_projection(monthly, aov, returning, plan);
        let floor = BreakEvenParams::default().floor_for(monthly);
        let days = result.days_to_break_even;

        prop_assert!(days == 0 || (floor..=90).contains(&days), "days = {}", days);
        prop_assert_eq!(days == 0, result.breakdown.break_even.raw_days.is_none());
    }

    #[test]
    fn prop_all_figures_finite(
        monthly in any::<u64>(),
        aov in any::<f64>(),
        returning in any::<u64>(),
        plan in plan_strategy(),
    ) {
        let result = compute_projection(monthly, aov, returning, plan);
        for value in headline_figures(&result) {
            prop_assert!(value.is_finite(), "non-finite figure in {:?}", result);
        }
        for value in result.breakdown.retention.rates.to_array() {
            prop_assert!(value.is_finite());
        }
    }

    #[test]
    fn prop_projection_is_idempotent(
        (monthly, aov, returning) in consistent_inputs(),
        plan in plan_strategy(),
    ) {
        let first = compute_projection(monthly, aov, returning, plan);
        let second = compute_projection(monthly, aov, returning, plan);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_cost_covers_plan_price(
        monthly in 0u64..10_000_000,
        plan in plan_strategy(),
    ) {
        let result = compute_projection(monthly, 100.0, 0, plan);
        prop_assert!(result.total_monthly_cost >= result.plan_cost);
        prop_assert_eq!(result.messages_needed, monthly * 4);
    }

    #[test]
    fn prop_cheapest_plan_is_minimal(
        monthly in 0u64..100_000,
    ) {
        let engine = RoiEngine::builtin();
        let inputs = CalculatorInputs::new(monthly, 100.0, 0);
        let cheapest = engine.cheapest_plan(&inputs);
        let results = engine.compare_plans(&inputs);

        let best = results
            .iter()
            .find(|r| r.selected_plan == cheapest)
            .map(|r| r.total_monthly_cost)
            .unwrap_or(f64::NAN);
        for result in &results {
            prop_assert!(best <= result.total_monthly_cost);
        }
    }
}
