//! Defines the `NodeId` and per-node payload stored in the temporal graph.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A discrete time index. Every node belongs to exactly one frame.
pub type Frame = i64;

/// Free-form node/edge attributes. One of them (by default `"t"`) holds the frame.
pub type Attributes = BTreeMap<String, serde_json::Value>;

/// A caller-chosen, opaque identifier for a detection.
///
/// Unlike petgraph's `NodeIndex`, this id is never reused or reassigned by the
/// graph, so it stays meaningful to external collaborators such as a variable table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl NodeId {
    pub fn new(id: u64) -> Self { Self(id) }
    pub fn get(&self) -> u64 { self.0 }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self { Self(id) }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The weight stored for every node inside the underlying petgraph.
///
/// The id is kept alongside the attributes so that a petgraph traversal can be
/// mapped back to caller ids without a reverse lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    pub id: NodeId,
    pub attributes: Attributes,
}

impl NodeData {
    pub fn new(id: NodeId, attributes: Attributes) -> Self { Self { id, attributes } }

    /// Merges `attributes` into the existing ones, overwriting duplicate keys.
    pub fn merge(&mut self, attributes: Attributes) {
        self.attributes.extend(attributes);
    }
}
