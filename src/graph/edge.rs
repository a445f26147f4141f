//! Defines the `EdgeKey` type, representing a candidate link between two detections.

use super::node::{Attributes, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a directed edge by its endpoints.
///
/// The graph holds at most one edge per ordered pair, so `(source, target)`
/// is a complete key. A valid edge always has `frame(source) < frame(target)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey {
    pub source: NodeId,
    pub target: NodeId,
}

impl EdgeKey {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self { source: source.into(), target: target.into() }
    }
}

impl From<(u64, u64)> for EdgeKey {
    fn from((source, target): (u64, u64)) -> Self {
        Self::new(source, target)
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.source, self.target)
    }
}

/// The weight stored for every edge inside the underlying petgraph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeData {
    pub attributes: Attributes,
}

impl EdgeData {
    pub fn new(attributes: Attributes) -> Self { Self { attributes } }
}
