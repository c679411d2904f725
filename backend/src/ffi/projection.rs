//! PyO3 entry points for the projection engine
//!
//! # Example (from Python)
//!
//! ```python
//! from retention_roi_core_rs import compute_projection
//!
//! result = compute_projection("100", 2500, 20, plan="basic")
//! print(result["days_to_break_even"], result["roi"])
//!
//! # Override only the exchange rate
//! result = compute_projection(100, 2500, 20, config={"messaging": {"exchange_rate": 150.0}})
//! ```

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use super::types::{
    parse_projection_config, plan_definition_to_py, projection_result_to_py, raw_amount, raw_count,
};
use crate::models::inputs::CalculatorInputs;
use crate::models::plan::PlanKey;
use crate::orchestrator::RoiEngine;

fn build_engine(config: Option<&Bound<'_, PyDict>>) -> PyResult<Option<RoiEngine>> {
    match config {
        Some(py_config) => {
            let rust_config = parse_projection_config(py_config)?;
            RoiEngine::new(rust_config).map(Some).map_err(|e| {
                PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                    "Failed to create projection engine: {}",
                    e
                ))
            })
        }
        None => Ok(None),
    }
}

fn read_inputs(
    monthly_customers: &Bound<'_, PyAny>,
    average_order_value: &Bound<'_, PyAny>,
    returning_customers: &Bound<'_, PyAny>,
) -> PyResult<CalculatorInputs> {
    Ok(CalculatorInputs {
        monthly_customers: raw_count(monthly_customers)?,
        average_order_value: raw_amount(average_order_value)?,
        returning_customers: raw_count(returning_customers)?,
    })
}

/// Project retention ROI for one plan
///
/// Inputs may be numbers or strings; unreadable values count as 0.
///
/// # Errors
///
/// Raises ValueError if:
/// - `plan` is not one of "basic", "standard", "pro"
/// - `config` contains values that fail validation
#[pyfunction]
#[pyo3(signature = (monthly_customers, average_order_value, returning_customers, plan = "basic", config = None))]
pub fn compute_projection(
    py: Python<'_>,
    monthly_customers: &Bound<'_, PyAny>,
    average_order_value: &Bound<'_, PyAny>,
    returning_customers: &Bound<'_, PyAny>,
    plan: &str,
    config: Option<&Bound<'_, PyDict>>,
) -> PyResult<Py<PyDict>> {
    let selected: PlanKey = plan
        .parse()
        .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("{}", e)))?;
    let inputs = read_inputs(monthly_customers, average_order_value, returning_customers)?;

    let custom = build_engine(config)?;
    let engine = custom.as_ref().unwrap_or_else(|| RoiEngine::builtin());

    projection_result_to_py(py, &engine.project(&inputs, selected))
}

/// Project retention ROI for every plan, in catalog order
#[pyfunction]
#[pyo3(signature = (monthly_customers, average_order_value, returning_customers, config = None))]
pub fn compare_plans(
    py: Python<'_>,
    monthly_customers: &Bound<'_, PyAny>,
    average_order_value: &Bound<'_, PyAny>,
    returning_customers: &Bound<'_, PyAny>,
    config: Option<&Bound<'_, PyDict>>,
) -> PyResult<Py<PyList>> {
    let inputs = read_inputs(monthly_customers, average_order_value, returning_customers)?;

    let custom = build_engine(config)?;
    let engine = custom.as_ref().unwrap_or_else(|| RoiEngine::builtin());

    let list = PyList::empty(py);
    for result in engine.compare_plans(&inputs) {
        list.append(projection_result_to_py(py, &result)?)?;
    }
    Ok(list.unbind())
}

/// Return the plan catalog as a list of dicts
#[pyfunction]
#[pyo3(signature = (config = None))]
pub fn plan_catalog(py: Python<'_>, config: Option<&Bound<'_, PyDict>>) -> PyResult<Py<PyList>> {
    let custom = build_engine(config)?;
    let engine = custom.as_ref().unwrap_or_else(|| RoiEngine::builtin());

    let list = PyList::empty(py);
    for plan in engine.catalog().iter() {
        list.append(plan_definition_to_py(py, plan)?)?;
    }
    Ok(list.unbind())
}
