//! End-to-end projection tests
//!
//! Runs the full engine (growth → revenue → cost → break-even → ROI) on
//! reference scenarios and checks the properties every projection holds.

use retention_roi_core_rs::{
    compute_projection, config_hash, CalculatorInputs, PlanKey, ProjectionConfig, RoiEngine,
};

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {}, got {}",
        expected,
        actual
    );
}

// ============================================================================
// Reference scenarios
// ============================================================================

#[test]
fn test_reference_scenario_basic() {
    let result = compute_projection(100, 2500.0, 20, PlanKey::Basic);

    assert_eq!(result.current_revenue, 250_000.0);
    assert_close(result.current_retention_rate(), 0.20, 1e-12);
    assert_close(result.target_retention_rate(), 0.55, 1e-12);
    assert_eq!(result.selected_plan, PlanKey::Basic);
    assert_eq!(result.recommended_plan, PlanKey::Standard);
    assert_eq!(result.messages_needed, 400);
    assert_close(result.plan_cost, 1690.0, 1e-9);
    assert_close(result.total_monthly_cost, 1690.0, 1e-9);

    assert_close(result.potential_revenue, 80_222.389_056_781_8, 1e-6);
    assert_close(result.yearly_increase, 807_577.125_713_151_8, 1e-5);
    assert_close(result.lost_revenue, 125_000.0, 1e-6);
    assert_close(result.competitor_advantage, 75_000.0, 1e-6);
    assert_eq!(result.days_to_break_even, 30);
    assert_close(result.roi, 4_646.886_926_436_793, 1e-6);
    assert!(result.breaks_even());
}

#[test]
fn test_overage_scenario() {
    let result = compute_projection(300, 100.0, 30, PlanKey::Basic);

    assert_eq!(result.messages_needed, 1200);
    assert_close(result.total_monthly_cost, 1950.0, 1e-9);
    assert_eq!(result.recommended_plan, PlanKey::Standard);
    assert_eq!(result.days_to_break_even, 40);
    assert_close(result.yearly_increase, 96_909.255_085_578_22, 1e-6);
    assert_close(result.lost_revenue, 18_000.0, 1e-6);
    assert_close(result.roi, 393.676_240_349_426_5, 1e-6);
}

#[test]
fn test_standard_plan_scenario() {
    let result = compute_projection(500, 300.0, 50, PlanKey::Standard);

    assert_eq!(result.messages_needed, 2000);
    assert_close(result.total_monthly_cost, 6370.0, 1e-9);
    assert_eq!(result.recommended_plan, PlanKey::Pro);
    assert_eq!(result.days_to_break_even, 31);
    assert_close(result.roi, 655.626_898_494_020_1, 1e-6);
}

#[test]
fn test_small_business_floor() {
    let result = compute_projection(40, 1000.0, 10, PlanKey::Basic);
    assert_eq!(result.days_to_break_even, 45);
    assert_eq!(result.recommended_plan, PlanKey::Basic);
    assert_close(result.roi, 659.501_908_229_886_9, 1e-6);
}

#[test]
fn test_unprofitable_plan_is_capped_and_negative() {
    let result = compute_projection(10, 5.0, 1, PlanKey::Pro);
    assert_close(result.total_monthly_cost, 19_370.0, 1e-9);
    assert_eq!(result.days_to_break_even, 90);
    assert_close(result.roi, -99.917_168_416_048_75, 1e-6);
    assert!(result.net_monthly_gain < 0.0);
}

// ============================================================================
// Edge cases
// ============================================================================

#[test]
fn test_zero_customers() {
    for plan in PlanKey::ALL {
        let result = compute_projection(0, 2500.0, 0, plan);
        assert_eq!(result.current_revenue, 0.0);
        assert_eq!(result.current_retention_rate(), 0.0);
        assert_eq!(result.days_to_break_even, 0);
        assert!(!result.breaks_even());
        assert_eq!(result.messages_needed, 0);
        assert_eq!(result.recommended_plan, PlanKey::Basic);
        // Increase is 0, so ROI is a total loss on the subscription
        assert_close(result.roi, -100.0, 1e-9);
    }
}

#[test]
fn test_lost_revenue_goes_negative_above_seventy_percent() {
    let result = compute_projection(100, 100.0, 90, PlanKey::Basic);
    assert!(result.lost_revenue < 0.0);
    assert_close(result.lost_revenue, -2_000.0, 1e-6);
    assert_close(result.competitor_advantage, -1_200.0, 1e-6);
}

#[test]
fn test_returning_above_monthly_does_not_fail() {
    let result = compute_projection(100, 50.0, 250, PlanKey::Standard);
    assert_close(result.current_retention_rate(), 2.5, 1e-12);
    assert_close(result.target_retention_rate(), 0.65, 1e-12);
    // Curve declines toward the ceiling, so there is no positive payback
    assert_eq!(result.days_to_break_even, 0);
    assert!(result.roi.is_finite());
}

#[test]
fn test_raw_string_inputs() {
    let inputs = CalculatorInputs::from_raw("100 customers", "2500.00", "");
    let result = RoiEngine::builtin().project(&inputs, PlanKey::Basic);
    assert_eq!(result.inputs.monthly_customers, 100);
    assert_eq!(result.inputs.returning_customers, 0);
    assert_eq!(result.current_revenue, 250_000.0);
    assert_eq!(result.current_retention_rate(), 0.0);
}

#[test]
fn test_recommendation_boundaries() {
    let engine = RoiEngine::builtin();
    assert_eq!(engine.recommend(75), PlanKey::Basic);
    assert_eq!(engine.recommend(76), PlanKey::Standard);
    assert_eq!(engine.recommend(300), PlanKey::Standard);
    assert_eq!(engine.recommend(301), PlanKey::Pro);
}

#[test]
fn test_recommendation_independent_of_selected_plan() {
    for plan in PlanKey::ALL {
        assert_eq!(
            compute_projection(76, 100.0, 10, plan).recommended_plan,
            PlanKey::Standard
        );
    }
}

#[test]
fn test_idempotent() {
    let a = compute_projection(123, 456.78, 9, PlanKey::Standard);
    let b = compute_projection(123, 456.78, 9, PlanKey::Standard);
    assert_eq!(a, b);
    assert_eq!(a.roi.to_bits(), b.roi.to_bits());
    assert_eq!(a.yearly_increase.to_bits(), b.yearly_increase.to_bits());
}

#[test]
fn test_derived_totals() {
    let result = compute_projection(100, 2500.0, 20, PlanKey::Basic);
    assert_close(
        result.net_monthly_gain,
        result.potential_revenue - result.total_monthly_cost,
        1e-9,
    );
    assert_close(result.yearly_cost, result.total_monthly_cost * 12.0, 1e-9);
}

// ============================================================================
// Plan comparison
// ============================================================================

#[test]
fn test_compare_plans_in_catalog_order() {
    let inputs = CalculatorInputs::new(100, 2500.0, 20);
    let results = RoiEngine::builtin().compare_plans(&inputs);

    let plans: Vec<PlanKey> = results.iter().map(|r| r.selected_plan).collect();
    assert_eq!(plans, PlanKey::ALL.to_vec());

    // Revenue side does not depend on the plan
    for result in &results {
        assert_eq!(result.potential_revenue, results[0].potential_revenue);
        assert_eq!(result.recommended_plan, PlanKey::Standard);
    }

    let single = compute_projection(100, 2500.0, 20, PlanKey::Pro);
    assert_eq!(results[2], single);
}

#[test]
fn test_cheapest_plan_shifts_with_volume() {
    let engine = RoiEngine::builtin();
    // Within quota everywhere: list prices decide
    assert_eq!(
        engine.cheapest_plan(&CalculatorInputs::new(100, 10.0, 0)),
        PlanKey::Basic
    );
    // 8000 messages: basic $83, standard $73, pro $149
    assert_eq!(
        engine.cheapest_plan(&CalculatorInputs::new(2000, 10.0, 0)),
        PlanKey::Standard
    );
    // 40000 messages: basic $403, standard $329, pro $299
    assert_eq!(
        engine.cheapest_plan(&CalculatorInputs::new(10_000, 10.0, 0)),
        PlanKey::Pro
    );
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_results_carry_config_hash() {
    let result = compute_projection(100, 2500.0, 20, PlanKey::Basic);
    let expected = config_hash(&ProjectionConfig::default()).unwrap();
    assert_eq!(result.config_hash, expected);
    assert_eq!(result.config_hash, RoiEngine::builtin().config_hash());
}

#[test]
fn test_custom_exchange_rate_changes_cost_and_hash() {
    let mut config = ProjectionConfig::default();
    config.messaging.exchange_rate = 150.0;
    let engine = RoiEngine::new(config).unwrap();

    let inputs = CalculatorInputs::new(100, 2500.0, 20);
    let custom = engine.project(&inputs, PlanKey::Basic);
    let builtin = RoiEngine::builtin().project(&inputs, PlanKey::Basic);

    assert_close(custom.total_monthly_cost, 1950.0, 1e-9);
    assert_eq!(custom.potential_revenue, builtin.potential_revenue);
    assert_ne!(custom.config_hash, builtin.config_hash);
}

#[test]
fn test_result_serializes_to_json() {
    let result = compute_projection(100, 2500.0, 20, PlanKey::Basic);
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["selected_plan"], "basic");
    assert_eq!(json["recommended_plan"], "standard");
    assert_eq!(json["messages_needed"], 400);
    assert_eq!(json["days_to_break_even"], 30);
    assert_eq!(json["breakdown"]["cost"]["overage_messages"], 0);
    assert_eq!(json["inputs"]["monthly_customers"], 100);
}
