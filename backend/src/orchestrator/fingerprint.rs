//! Config fingerprint
//!
//! Results are stamped with a SHA-256 of the config that produced them, so a
//! consumer holding a cached projection can tell whether it was computed
//! under the current exchange rate and tuning.
//!
//! The config is serialized to a `serde_json::Value` with every object's keys
//! sorted before hashing, making the digest independent of field order.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

use super::engine::ProjectionError;

/// Hex-encoded SHA-256 of the canonical JSON form of `config`
///
/// # Example
/// ```
/// use retention_roi_core_rs::{config_hash, ProjectionConfig};
///
/// let a = config_hash(&ProjectionConfig::default()).unwrap();
/// let mut changed = ProjectionConfig::default();
/// changed.messaging.exchange_rate = 135.0;
/// let b = config_hash(&changed).unwrap();
///
/// assert_eq!(a.len(), 64);
/// assert_ne!(a, b);
/// ```
pub fn config_hash<T: Serialize>(config: &T) -> Result<String, ProjectionError> {
    let value = serde_json::to_value(config)
        .map_err(|e| ProjectionError::Serialization(format!("Config serialization failed: {}", e)))?;

    let json = serde_json::to_string(&sort_keys(value))
        .map_err(|e| ProjectionError::Serialization(format!("Config serialization failed: {}", e)))?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> =
                map.into_iter().map(|(k, v)| (k, sort_keys(v))).collect();
            Value::Object(sorted.into_iter().collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ProjectionConfig;

    #[test]
    fn test_hash_is_stable_across_calls() {
        let config = ProjectionConfig::default();
        assert_eq!(config_hash(&config).unwrap(), config_hash(&config).unwrap());
    }

    #[test]
    fn test_hash_ignores_key_order() {
        let a: Value = serde_json::from_str(r#"{"b": 1, "a": {"y": 2, "x": 3}}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"a": {"x": 3, "y": 2}, "b": 1}"#).unwrap();
        assert_eq!(config_hash(&a).unwrap(), config_hash(&b).unwrap());
    }
}
