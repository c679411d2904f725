//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict, PyList, etc.)

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList, PyString};

use crate::breakeven::BreakEvenEstimate;
use crate::core::config::{
    BreakEvenFloor, BreakEvenParams, GrowthParams, MessagingParams, ProjectionConfig,
    RecommendationThresholds, RevenueParams,
};
use crate::costs::TierCost;
use crate::growth::{Horizon, RetentionCurve};
use crate::models::inputs::{amount_from_f64, count_from_f64, normalize_amount, normalize_count};
use crate::models::plan::{PlanCatalog, PlanDefinition, PlanKey};
use crate::models::result::ProjectionResult;
use crate::revenue::RevenueProjection;

// ========================================================================
// PyDict Extraction Helpers
// ========================================================================

/// Extract a field with a default value if missing.
///
/// # Errors
/// Returns error only if type conversion fails (not if field is missing)
fn extract_with_default<T>(dict: &Bound<'_, PyDict>, key: &str, default: T) -> PyResult<T>
where
    for<'py> T: FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) => value.extract(),
        None => Ok(default),
    }
}

/// Extract a nested dict, if present
fn extract_section<'py>(
    dict: &Bound<'py, PyDict>,
    key: &str,
) -> PyResult<Option<Bound<'py, PyDict>>> {
    match dict.get_item(key)? {
        Some(value) => Ok(Some(value.downcast_into()?)),
        None => Ok(None),
    }
}

fn value_error(message: String) -> PyErr {
    PyErr::new::<pyo3::exceptions::PyValueError, _>(message)
}

// ========================================================================
// Raw Inputs
// ========================================================================

/// Read a customer count from a Python str or number; anything else is 0
pub fn raw_count(value: &Bound<'_, PyAny>) -> PyResult<u64> {
    if let Ok(text) = value.downcast::<PyString>() {
        return Ok(normalize_count(text.to_str()?));
    }
    Ok(value.extract::<f64>().map(count_from_f64).unwrap_or(0))
}

/// Read a money amount from a Python str or number; anything else is 0
pub fn raw_amount(value: &Bound<'_, PyAny>) -> PyResult<f64> {
    if let Ok(text) = value.downcast::<PyString>() {
        return Ok(normalize_amount(text.to_str()?));
    }
    Ok(value.extract::<f64>().map(amount_from_f64).unwrap_or(0.0))
}

// ========================================================================
// Configuration Parsers
// ========================================================================

/// Convert Python dict to ProjectionConfig
///
/// Every section and field is optional; missing values take the defaults.
/// Validation is left to the engine.
pub fn parse_projection_config(py_config: &Bound<'_, PyDict>) -> PyResult<ProjectionConfig> {
    let defaults = ProjectionConfig::default();

    let growth = match extract_section(py_config, "growth")? {
        Some(section) => parse_growth_params(&section, defaults.growth)?,
        None => defaults.growth,
    };
    let revenue = match extract_section(py_config, "revenue")? {
        Some(section) => parse_revenue_params(&section, defaults.revenue)?,
        None => defaults.revenue,
    };
    let messaging = match extract_section(py_config, "messaging")? {
        Some(section) => parse_messaging_params(&section, defaults.messaging)?,
        None => defaults.messaging,
    };
    let recommendation = match extract_section(py_config, "recommendation")? {
        Some(section) => parse_recommendation(&section, defaults.recommendation)?,
        None => defaults.recommendation,
    };
    let break_even = match extract_section(py_config, "break_even")? {
        Some(section) => parse_break_even_params(&section, defaults.break_even)?,
        None => defaults.break_even,
    };
    let plans = match py_config.get_item("plans")? {
        Some(value) => parse_plan_catalog(&value.downcast_into()?)?,
        None => defaults.plans,
    };

    Ok(ProjectionConfig {
        growth,
        revenue,
        messaging,
        recommendation,
        break_even,
        plans,
    })
}

fn parse_growth_params(py: &Bound<'_, PyDict>, d: GrowthParams) -> PyResult<GrowthParams> {
    Ok(GrowthParams {
        retention_ceiling: extract_with_default(py, "retention_ceiling", d.retention_ceiling)?,
        max_uplift: extract_with_default(py, "max_uplift", d.max_uplift)?,
        growth_rate: extract_with_default(py, "growth_rate", d.growth_rate)?,
        midpoint_month: extract_with_default(py, "midpoint_month", d.midpoint_month)?,
    })
}

fn parse_revenue_params(py: &Bound<'_, PyDict>, d: RevenueParams) -> PyResult<RevenueParams> {
    Ok(RevenueParams {
        max_retention_ceiling: extract_with_default(
            py,
            "max_retention_ceiling",
            d.max_retention_ceiling,
        )?,
        competitor_capture: extract_with_default(py, "competitor_capture", d.competitor_capture)?,
        steady_state_months: extract_with_default(
            py,
            "steady_state_months",
            d.steady_state_months,
        )?,
    })
}

fn parse_messaging_params(py: &Bound<'_, PyDict>, d: MessagingParams) -> PyResult<MessagingParams> {
    Ok(MessagingParams {
        messages_per_customer: extract_with_default(
            py,
            "messages_per_customer",
            d.messages_per_customer,
        )?,
        exchange_rate: extract_with_default(py, "exchange_rate", d.exchange_rate)?,
    })
}

fn parse_recommendation(
    py: &Bound<'_, PyDict>,
    d: RecommendationThresholds,
) -> PyResult<RecommendationThresholds> {
    Ok(RecommendationThresholds {
        basic_max_customers: extract_with_default(
            py,
            "basic_max_customers",
            d.basic_max_customers,
        )?,
        standard_max_customers: extract_with_default(
            py,
            "standard_max_customers",
            d.standard_max_customers,
        )?,
    })
}

fn parse_break_even_params(py: &Bound<'_, PyDict>, d: BreakEvenParams) -> PyResult<BreakEvenParams> {
    let floors = match py.get_item("floors")? {
        Some(value) => {
            let py_floors: Bound<'_, PyList> = value.downcast_into()?;
            let mut floors = Vec::with_capacity(py_floors.len());
            for item in py_floors.iter() {
                let floor: Bound<'_, PyDict> = item.downcast_into()?;
                floors.push(BreakEvenFloor {
                    below_customers: extract_with_default(&floor, "below_customers", 0)?,
                    min_days: extract_with_default(&floor, "min_days", 0)?,
                });
            }
            floors
        }
        None => d.floors,
    };

    Ok(BreakEvenParams {
        friction: extract_with_default(py, "friction", d.friction)?,
        ramp_weights: extract_with_default(py, "ramp_weights", d.ramp_weights)?,
        days_per_month: extract_with_default(py, "days_per_month", d.days_per_month)?,
        implementation_lag_days: extract_with_default(
            py,
            "implementation_lag_days",
            d.implementation_lag_days,
        )?,
        floors,
        default_floor_days: extract_with_default(py, "default_floor_days", d.default_floor_days)?,
        max_days: extract_with_default(py, "max_days", d.max_days)?,
    })
}

fn parse_plan_catalog(py_plans: &Bound<'_, PyList>) -> PyResult<PlanCatalog> {
    if py_plans.len() != 3 {
        return Err(value_error(format!(
            "plans must list exactly 3 tiers (basic, standard, pro), got {}",
            py_plans.len()
        )));
    }

    let mut definitions = Vec::with_capacity(3);
    for (item, key) in py_plans.iter().zip(PlanKey::ALL) {
        let plan: Bound<'_, PyDict> = item.downcast_into()?;
        definitions.push(PlanDefinition {
            key,
            name: extract_with_default(&plan, "name", key.as_str().to_string())?,
            monthly_price_usd: extract_with_default(&plan, "monthly_price_usd", 0.0)?,
            messages_included: extract_with_default(&plan, "messages_included", 0)?,
            additional_message_cost_usd: extract_with_default(
                &plan,
                "additional_message_cost_usd",
                0.0,
            )?,
        });
    }

    let mut definitions = definitions.into_iter();
    match (definitions.next(), definitions.next(), definitions.next()) {
        (Some(basic), Some(standard), Some(pro)) => PlanCatalog::new(basic, standard, pro)
            .map_err(|e| value_error(format!("Invalid plan catalog: {}", e))),
        _ => Err(value_error("plans must list exactly 3 tiers".to_string())),
    }
}

// ========================================================================
// Result Converters
// ========================================================================

fn horizon_to_py<'py>(py: Python<'py>, horizon: &Horizon) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("month_1", horizon.month_1)?;
    dict.set_item("month_2", horizon.month_2)?;
    dict.set_item("month_3", horizon.month_3)?;
    dict.set_item("month_6", horizon.month_6)?;
    Ok(dict)
}

fn retention_to_py<'py>(py: Python<'py>, curve: &RetentionCurve) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("current_rate", curve.current_rate)?;
    dict.set_item("target_rate", curve.target_rate)?;
    dict.set_item("improvement_potential", curve.improvement_potential)?;
    dict.set_item("rates", horizon_to_py(py, &curve.rates)?)?;
    Ok(dict)
}

fn revenue_to_py<'py>(py: Python<'py>, revenue: &RevenueProjection) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("current_revenue", revenue.current_revenue)?;
    dict.set_item("current_retention_revenue", revenue.current_retention_revenue)?;
    dict.set_item("revenue", horizon_to_py(py, &revenue.revenue)?)?;
    dict.set_item("increase", horizon_to_py(py, &revenue.increase)?)?;
    dict.set_item("monthly_increase", revenue.monthly_increase)?;
    dict.set_item("yearly_increase", revenue.yearly_increase)?;
    dict.set_item("max_possible_retention", revenue.max_possible_retention)?;
    dict.set_item("lost_revenue", revenue.lost_revenue)?;
    dict.set_item("competitor_advantage", revenue.competitor_advantage)?;
    Ok(dict)
}

fn cost_to_py<'py>(py: Python<'py>, cost: &TierCost) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("plan", cost.plan.as_str())?;
    dict.set_item("messages_needed", cost.messages_needed)?;
    dict.set_item("overage_messages", cost.overage_messages)?;
    dict.set_item("overage_cost_usd", cost.overage_cost_usd)?;
    dict.set_item("plan_cost", cost.plan_cost)?;
    dict.set_item("total_monthly_cost", cost.total_monthly_cost)?;
    Ok(dict)
}

fn break_even_to_py<'py>(
    py: Python<'py>,
    estimate: &BreakEvenEstimate,
) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("weighted_average_increase", estimate.weighted_average_increase)?;
    dict.set_item("daily_cash_flow_improvement", estimate.daily_cash_flow_improvement)?;
    dict.set_item("raw_days", estimate.raw_days)?;
    dict.set_item("days", estimate.days)?;
    Ok(dict)
}

/// Convert ProjectionResult to Python dict
pub fn projection_result_to_py(py: Python, result: &ProjectionResult) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);

    let inputs = PyDict::new(py);
    inputs.set_item("monthly_customers", result.inputs.monthly_customers)?;
    inputs.set_item("average_order_value", result.inputs.average_order_value)?;
    inputs.set_item("returning_customers", result.inputs.returning_customers)?;
    dict.set_item("inputs", inputs)?;

    dict.set_item("selected_plan", result.selected_plan.as_str())?;
    dict.set_item("current_revenue", result.current_revenue)?;
    dict.set_item("lost_revenue", result.lost_revenue)?;
    dict.set_item("potential_revenue", result.potential_revenue)?;
    dict.set_item("yearly_increase", result.yearly_increase)?;
    dict.set_item("days_to_break_even", result.days_to_break_even)?;
    dict.set_item("competitor_advantage", result.competitor_advantage)?;
    dict.set_item("recommended_plan", result.recommended_plan.as_str())?;
    dict.set_item("plan_cost", result.plan_cost)?;
    dict.set_item("messages_needed", result.messages_needed)?;
    dict.set_item("total_monthly_cost", result.total_monthly_cost)?;
    dict.set_item("roi", result.roi)?;
    dict.set_item("net_monthly_gain", result.net_monthly_gain)?;
    dict.set_item("yearly_cost", result.yearly_cost)?;
    dict.set_item("config_hash", &result.config_hash)?;

    let breakdown = PyDict::new(py);
    breakdown.set_item("retention", retention_to_py(py, &result.breakdown.retention)?)?;
    breakdown.set_item("revenue", revenue_to_py(py, &result.breakdown.revenue)?)?;
    breakdown.set_item("cost", cost_to_py(py, &result.breakdown.cost)?)?;
    breakdown.set_item("break_even", break_even_to_py(py, &result.breakdown.break_even)?)?;
    dict.set_item("breakdown", breakdown)?;

    Ok(dict.unbind())
}

/// Convert PlanDefinition to Python dict
pub fn plan_definition_to_py(py: Python, plan: &PlanDefinition) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("key", plan.key.as_str())?;
    dict.set_item("name", &plan.name)?;
    dict.set_item("monthly_price_usd", plan.monthly_price_usd)?;
    dict.set_item("messages_included", plan.messages_included)?;
    dict.set_item("additional_message_cost_usd", plan.additional_message_cost_usd)?;
    Ok(dict.unbind())
}
