//! Defines the error types for the graph module.
use super::edge::EdgeKey;
use super::node::{Frame, NodeId};
use thiserror::Error;

/// Structural errors raised by the temporal graph.
///
/// Reference-integrity errors (`UnknownNode`, `UnknownEdge`) surface at the
/// mutation that would break them, and the mutation is not applied. Frame
/// errors surface at the first read that recomputes frame metadata.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node {node} has no '{attribute}' frame attribute")]
    MissingAttribute { node: NodeId, attribute: String },

    #[error("Node {node} has a non-integer '{attribute}' frame attribute: {value}")]
    InvalidFrame { node: NodeId, attribute: String, value: serde_json::Value },

    #[error("Node {0} is not in the graph")]
    UnknownNode(NodeId),

    #[error("Edge {0} is not in the graph")]
    UnknownEdge(EdgeKey),

    #[error("Edge {edge} does not point forwards in time, but from frame {source_frame} to {target_frame}")]
    TimeDirectionViolation { edge: EdgeKey, source_frame: Frame, target_frame: Frame },

    #[error("Graph data could not be parsed: {0}")]
    Import(String),
}

impl From<serde_json::Error> for GraphError {
    fn from(e: serde_json::Error) -> Self {
        GraphError::Import(e.to_string())
    }
}
