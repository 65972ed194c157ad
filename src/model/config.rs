//! Opaque model architecture descriptions.

use crate::core::Result;
use serde::{Deserialize, Serialize};

/// An opaque, serializable description of a network architecture (layer
/// topology, activations, shapes).
///
/// Produced by the coordinator's model and consumed by participants to
/// instantiate an identical architecture. FLARE never interprets the
/// interior; only equality and serialization are defined.
///
/// Stored as canonical JSON text so the blob survives non-self-describing
/// wire formats intact. `from_json` re-renders through `serde_json::Value`,
/// which normalizes whitespace and key order before comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig(String);

impl ModelConfig {
    /// Wrap an architecture document.
    pub fn new(value: serde_json::Value) -> Self {
        Self(value.to_string())
    }

    /// Build from any serializable architecture description.
    pub fn from_value<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Self(serde_json::to_value(value)?.to_string()))
    }

    /// The canonical JSON text.
    pub fn as_json(&self) -> &str {
        &self.0
    }

    /// Parse and normalize from a JSON string.
    pub fn from_json(s: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(s)?;
        Ok(Self::new(value))
    }

    /// Parse the document back into a JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_json_roundtrip() {
        let config = ModelConfig::new(json!({
            "layers": [
                {"units": 128, "activation": "relu"},
                {"units": 10, "activation": "softmax"},
            ],
            "input_shape": [28, 28],
        }));
        let parsed = ModelConfig::from_json(config.as_json()).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_config_equality_ignores_formatting() {
        let a = ModelConfig::from_json(r#"{"units": 10, "activation": "relu"}"#).unwrap();
        let b = ModelConfig::from_json(r#"{ "activation":"relu", "units":10 }"#).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_config_equality_is_structural() {
        let a = ModelConfig::new(json!({"units": 10}));
        let b = ModelConfig::new(json!({"units": 10}));
        let c = ModelConfig::new(json!({"units": 12}));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(ModelConfig::from_json("{not json").is_err());
    }
}
