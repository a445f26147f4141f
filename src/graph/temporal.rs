//! temporal.rs
//! The track graph: detections tagged with frames, and forward-in-time links between them.

use super::edge::{EdgeData, EdgeKey};
use super::error::GraphError;
use super::metadata::{FrameIndex, Metadata};
use super::node::{Attributes, Frame, NodeId};
use super::storage::GraphStore;
use crate::config::GraphConfig;
use crate::validation::rules::frames;
use petgraph::Direction;
use std::ops::Range;
use tracing::debug;

/// A graph of detections across discrete frames, with candidate links that
/// always point strictly forward in time.
///
/// Per-frame metadata is cached and rebuilt lazily: every mutation marks it
/// stale, and the first read that needs it (`ensure_fresh`, `frame_range`,
/// `nodes_in_frame`) rebuilds it once. Batching many mutations before a query
/// therefore costs a single O(V + E) rebuild.
///
/// # Concurrency
///
/// Reads that may rebuild the cache take `&mut self`, so at most one caller can
/// mutate or trigger a rebuild at a time. Once fresh, the graph can be shared
/// (`&TemporalGraph` is `Sync`) and [`frame_index`](Self::frame_index), edge
/// iteration and constraint instantiation may run from many threads.
#[derive(Debug, Clone, Default)]
pub struct TemporalGraph {
    config: GraphConfig,
    store: GraphStore,
    metadata: Metadata,
}

impl TemporalGraph {
    pub fn new() -> Self { Self::default() }

    pub fn with_config(config: GraphConfig) -> Self { Self { config, ..Self::default() } }

    pub fn config(&self) -> &GraphConfig { &self.config }
    pub fn frame_attribute(&self) -> &str { &self.config.frame_attribute }

    // --- Node mutation ---

    /// Adds a node, or merges `attributes` into an existing node with the same id.
    ///
    /// The frame attribute is not checked here; a missing frame surfaces at
    /// the next metadata rebuild.
    pub fn add_node(&mut self, id: impl Into<NodeId>, attributes: Attributes) {
        self.store.upsert_node(id.into(), attributes);
        self.metadata.invalidate();
    }

    /// Adds a node whose only attribute is its frame.
    pub fn add_node_at(&mut self, id: impl Into<NodeId>, frame: Frame) {
        let mut attributes = Attributes::new();
        attributes.insert(self.config.frame_attribute.clone(), frame.into());
        self.add_node(id, attributes);
    }

    pub fn add_nodes<I, N>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = (N, Attributes)>,
        N: Into<NodeId>,
    {
        for (id, attributes) in nodes {
            self.store.upsert_node(id.into(), attributes);
        }
        self.metadata.invalidate();
    }

    /// Sets a single attribute on an existing node.
    pub fn set_node_attribute(
        &mut self,
        id: impl Into<NodeId>,
        key: impl Into<String>,
        value: serde_json::Value,
    ) -> Result<(), GraphError> {
        let id = id.into();
        let node = self.store.node_mut(id).ok_or(GraphError::UnknownNode(id))?;
        node.attributes.insert(key.into(), value);
        self.metadata.invalidate();
        Ok(())
    }

    /// Removes a node together with all its incident edges.
    pub fn remove_node(&mut self, id: impl Into<NodeId>) -> Result<(), GraphError> {
        let id = id.into();
        if !self.store.remove_node(id) {
            return Err(GraphError::UnknownNode(id));
        }
        self.metadata.invalidate();
        Ok(())
    }

    /// Removes every listed node that exists; unknown ids are skipped.
    pub fn remove_nodes<I, N>(&mut self, ids: I)
    where
        I: IntoIterator<Item = N>,
        N: Into<NodeId>,
    {
        for id in ids {
            self.store.remove_node(id.into());
        }
        self.metadata.invalidate();
    }

    // --- Edge mutation ---

    /// Adds an edge between two existing nodes, or merges `attributes` into an
    /// existing edge. The time direction is checked at the next metadata rebuild.
    pub fn add_edge(
        &mut self,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        attributes: Attributes,
    ) -> Result<(), GraphError> {
        let edge = EdgeKey { source: source.into(), target: target.into() };
        self.check_endpoints(edge)?;
        self.store.upsert_edge(edge, attributes);
        self.metadata.invalidate();
        Ok(())
    }

    /// Adds many edges. All endpoints are checked before any edge is inserted,
    /// so on error the graph is unchanged.
    pub fn add_edges<I>(&mut self, edges: I) -> Result<(), GraphError>
    where
        I: IntoIterator<Item = (EdgeKey, Attributes)>,
    {
        let edges: Vec<(EdgeKey, Attributes)> = edges.into_iter().collect();
        for (edge, _) in &edges {
            self.check_endpoints(*edge)?;
        }
        for (edge, attributes) in edges {
            self.store.upsert_edge(edge, attributes);
        }
        self.metadata.invalidate();
        Ok(())
    }

    /// Adds many edges, storing each weight as the `"weight"` attribute.
    pub fn add_weighted_edges<I>(&mut self, edges: I) -> Result<(), GraphError>
    where
        I: IntoIterator<Item = (EdgeKey, f64)>,
    {
        self.add_edges(edges.into_iter().map(|(edge, weight)| {
            let mut attributes = Attributes::new();
            attributes.insert("weight".to_string(), weight.into());
            (edge, attributes)
        }))
    }

    pub fn remove_edge(&mut self, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Result<(), GraphError> {
        let edge = EdgeKey { source: source.into(), target: target.into() };
        if !self.store.remove_edge(edge) {
            return Err(GraphError::UnknownEdge(edge));
        }
        self.metadata.invalidate();
        Ok(())
    }

    /// Removes all nodes and edges.
    pub fn clear(&mut self) {
        self.store.clear();
        self.metadata.invalidate();
    }

    /// Removes all edges, keeping the nodes.
    pub fn clear_edges(&mut self) {
        self.store.clear_edges();
        self.metadata.invalidate();
    }

    fn check_endpoints(&self, edge: EdgeKey) -> Result<(), GraphError> {
        for id in [edge.source, edge.target] {
            if !self.store.contains_node(id) {
                return Err(GraphError::UnknownNode(id));
            }
        }
        Ok(())
    }

    // --- Topology queries (no metadata needed) ---

    pub fn node_count(&self) -> usize { self.store.node_count() }
    pub fn edge_count(&self) -> usize { self.store.edge_count() }
    pub fn is_empty(&self) -> bool { self.store.is_empty() }

    pub fn contains_node(&self, id: impl Into<NodeId>) -> bool { self.store.contains_node(id.into()) }
    pub fn contains_edge(&self, edge: impl Into<EdgeKey>) -> bool { self.store.contains_edge(edge.into()) }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.store.nodes().map(|n| n.id)
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.store.edges().map(|(edge, _)| edge)
    }

    pub fn node_attributes(&self, id: impl Into<NodeId>) -> Option<&Attributes> {
        self.store.node(id.into()).map(|n| &n.attributes)
    }

    pub fn edge_attributes(&self, edge: impl Into<EdgeKey>) -> Option<&Attributes> {
        self.store.edge(edge.into()).map(|e: &EdgeData| &e.attributes)
    }

    /// All edges that point forward into `node`, in insertion order.
    /// Empty if the node is unknown.
    pub fn incoming_edges(&self, node: impl Into<NodeId>) -> Vec<EdgeKey> {
        self.store.incident_edges(node.into(), Direction::Incoming)
    }

    /// All edges that point forward out of `node`, in insertion order.
    /// Empty if the node is unknown.
    pub fn outgoing_edges(&self, node: impl Into<NodeId>) -> Vec<EdgeKey> {
        self.store.incident_edges(node.into(), Direction::Outgoing)
    }

    /// Reads the frame of a single node directly from its attributes.
    pub fn frame_of(&self, id: impl Into<NodeId>) -> Result<Frame, GraphError> {
        let id = id.into();
        let node = self.store.node(id).ok_or(GraphError::UnknownNode(id))?;
        frames::frame_of(node, &self.config.frame_attribute)
    }

    // --- Frame metadata ---

    pub fn is_stale(&self) -> bool { self.metadata.is_stale() }

    /// Rebuilds frame metadata if any mutation happened since the last rebuild.
    ///
    /// On error the cache stays stale, so the next read retries after the
    /// caller repairs the graph.
    pub fn ensure_fresh(&mut self) -> Result<&FrameIndex, GraphError> {
        if self.metadata.is_stale() {
            let index = FrameIndex::build(&self.store, &self.config.frame_attribute)?;
            debug!(
                "Rebuilt frame metadata: {} nodes, {} edges, range {:?}",
                self.store.node_count(),
                self.store.edge_count(),
                index.range()
            );
            self.metadata = Metadata::Fresh(index);
        }
        Ok(self.metadata.fresh().expect("BUG: metadata must be fresh after a successful rebuild"))
    }

    /// The cached frame index, if no mutation happened since the last rebuild.
    pub fn frame_index(&self) -> Option<&FrameIndex> { self.metadata.fresh() }

    /// `(begin, end)` as a half-open range of frames this graph has nodes for.
    /// `None` for an empty graph.
    pub fn frame_range(&mut self) -> Result<Option<Range<Frame>>, GraphError> {
        Ok(self.ensure_fresh()?.range())
    }

    /// All nodes in frame `t`, sorted by id.
    pub fn nodes_in_frame(&mut self, t: Frame) -> Result<&[NodeId], GraphError> {
        Ok(self.ensure_fresh()?.nodes_in_frame(t))
    }
}
