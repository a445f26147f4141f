//! metadata.rs
//! Derived per-frame index, cached between mutations.

use super::error::GraphError;
use super::node::{Frame, NodeId};
use super::storage::GraphStore;
use crate::validation::rules::{frames, time_direction};
use std::collections::BTreeMap;
use std::ops::Range;

/// The per-frame partition of all nodes, plus the frame range it spans.
///
/// Pure cache: always recomputable from the node/edge set alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameIndex {
    nodes_by_frame: BTreeMap<Frame, Vec<NodeId>>,
    range: Option<Range<Frame>>,
}

impl FrameIndex {
    /// `begin..end` where `begin` is the first frame and `end` is one past the last.
    /// `None` for an empty graph.
    pub fn range(&self) -> Option<Range<Frame>> { self.range.clone() }

    /// Nodes in frame `t`, sorted by id. Empty for frames without nodes.
    pub fn nodes_in_frame(&self, t: Frame) -> &[NodeId] {
        self.nodes_by_frame.get(&t).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Frames that hold at least one node, in increasing order.
    pub fn frames(&self) -> impl Iterator<Item = Frame> + '_ {
        self.nodes_by_frame.keys().copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes_by_frame.values().map(Vec::len).sum()
    }

    /// Recomputes the index from scratch. O(V + E).
    ///
    /// Groups nodes by frame, derives the range, then checks that every edge
    /// points forwards in time. The first violation found is returned.
    pub(crate) fn build(store: &GraphStore, frame_attribute: &str) -> Result<Self, GraphError> {
        if store.is_empty() {
            return Ok(Self::default());
        }

        let mut nodes_by_frame: BTreeMap<Frame, Vec<NodeId>> = BTreeMap::new();
        for node in store.nodes() {
            let t = frames::frame_of(node, frame_attribute)?;
            nodes_by_frame.entry(t).or_default().push(node.id);
        }
        for nodes in nodes_by_frame.values_mut() {
            nodes.sort_unstable();
        }

        let range = match (nodes_by_frame.iter().next(), nodes_by_frame.iter().next_back()) {
            (Some((&first, _)), Some((&last, last_nodes))) => {
                // The exclusive end must itself be a representable frame.
                let end = last.checked_add(1).ok_or_else(|| GraphError::InvalidFrame {
                    node: last_nodes.first().copied().unwrap_or_default(),
                    attribute: frame_attribute.to_string(),
                    value: last.into(),
                })?;
                Some(first..end)
            }
            _ => None,
        };

        for (edge, _) in store.edges() {
            // Both endpoints were framed above; a miss here means the store is corrupt.
            let source_frame = Self::frame_in(store, edge.source, frame_attribute)?;
            let target_frame = Self::frame_in(store, edge.target, frame_attribute)?;
            time_direction::check_edge(edge, source_frame, target_frame)?;
        }

        Ok(Self { nodes_by_frame, range })
    }

    fn frame_in(store: &GraphStore, id: NodeId, frame_attribute: &str) -> Result<Frame, GraphError> {
        let node = store.node(id).ok_or(GraphError::UnknownNode(id))?;
        frames::frame_of(node, frame_attribute)
    }
}

/// Two-state cache: `Stale` after any mutation, `Fresh` after a successful rebuild.
#[derive(Debug, Clone, Default)]
pub(crate) enum Metadata {
    #[default]
    Stale,
    Fresh(FrameIndex),
}

impl Metadata {
    pub(crate) fn is_stale(&self) -> bool { matches!(self, Metadata::Stale) }

    pub(crate) fn invalidate(&mut self) { *self = Metadata::Stale; }

    pub(crate) fn fresh(&self) -> Option<&FrameIndex> {
        match self {
            Metadata::Fresh(index) => Some(index),
            Metadata::Stale => None,
        }
    }
}
