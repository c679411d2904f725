//! Python bindings (feature `pyo3`)

pub mod projection;
pub mod types;
