//! Declarative configuration for graphs and constraint sets.

use crate::constraints::ConstraintConfig;
use serde::{Deserialize, Serialize};

/// The node attribute holding the frame, unless configured otherwise.
pub const DEFAULT_FRAME_ATTRIBUTE: &str = "t";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Name of the node attribute that holds the frame of a detection.
    pub frame_attribute: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self { frame_attribute: DEFAULT_FRAME_ATTRIBUTE.to_string() }
    }
}

impl GraphConfig {
    pub fn with_frame_attribute(attribute: impl Into<String>) -> Self {
        Self { frame_attribute: attribute.into() }
    }
}

/// Graph settings plus the ordered list of constraints to instantiate.
///
/// ```json
/// {
///   "graph": { "frame_attribute": "frame" },
///   "constraints": [
///     { "type": "edge_endpoint_consistency" },
///     { "type": "max_parents", "max_parents": 1 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub graph: GraphConfig,
    pub constraints: Vec<ConstraintConfig>,
}

impl TrackingConfig {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_object() {
        let config = TrackingConfig::from_json_str("{}").unwrap();
        assert_eq!(config.graph.frame_attribute, "t");
        assert!(config.constraints.is_empty());
    }

    #[test]
    fn test_full_config() {
        let config = TrackingConfig::from_json_str(
            r#"{
                "graph": { "frame_attribute": "frame" },
                "constraints": [
                    { "type": "edge_endpoint_consistency" },
                    { "type": "max_parents", "max_parents": 2 }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.graph, GraphConfig::with_frame_attribute("frame"));
        assert_eq!(
            config.constraints,
            vec![ConstraintConfig::EdgeEndpointConsistency, ConstraintConfig::MaxParents { max_parents: 2 }]
        );
    }

    #[test]
    fn test_unknown_constraint_type_is_rejected() {
        let err = TrackingConfig::from_json_str(r#"{ "constraints": [ { "type": "max_children" } ] }"#);
        assert!(err.is_err());
    }
}
