//! Orchestrator - runs the projection components and assembles the result
//!
//! See `engine.rs` for the full pipeline.

pub mod engine;
pub mod fingerprint;

// Re-export main types for convenience
pub use engine::{compute_projection, roi_percent, ProjectionError, RoiEngine};
pub use fingerprint::config_hash;
