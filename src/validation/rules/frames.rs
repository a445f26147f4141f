//! Rule for reading a node's frame out of its attributes.

use crate::graph::error::GraphError;
use crate::graph::node::{Frame, NodeData};

/// Reads the frame of `node` from its `attribute`.
///
/// The frame must be present and must be a JSON integer. Floats such as `1.0`
/// are rejected rather than truncated, since frames are compared for equality.
pub(crate) fn frame_of(node: &NodeData, attribute: &str) -> Result<Frame, GraphError> {
    let value = node.attributes.get(attribute).ok_or_else(|| GraphError::MissingAttribute {
        node: node.id,
        attribute: attribute.to_string(),
    })?;

    value.as_i64().ok_or_else(|| GraphError::InvalidFrame {
        node: node.id,
        attribute: attribute.to_string(),
        value: value.clone(),
    })
}
