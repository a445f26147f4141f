//! storage.rs
//! Adjacency storage: a petgraph `StableDiGraph` plus a caller-id index.

use super::edge::{EdgeData, EdgeKey};
use super::node::{Attributes, NodeData, NodeId};
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::Direction;
use std::collections::HashMap;

/// Owns nodes and edges. Knows nothing about frames.
///
/// `StableDiGraph` keeps the indices of surviving nodes valid across removals,
/// which keeps `index` consistent without a rebuild after `remove_node`.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    graph: StableDiGraph<NodeData, EdgeData>,
    index: HashMap<NodeId, NodeIndex>,
}

impl GraphStore {
    pub fn new() -> Self { Self::default() }

    pub fn node_count(&self) -> usize { self.graph.node_count() }
    pub fn edge_count(&self) -> usize { self.graph.edge_count() }
    pub fn is_empty(&self) -> bool { self.graph.node_count() == 0 }

    pub fn contains_node(&self, id: NodeId) -> bool { self.index.contains_key(&id) }

    pub fn contains_edge(&self, edge: EdgeKey) -> bool {
        self.find_edge(edge).is_some()
    }

    /// Inserts a node, or merges `attributes` into an existing one.
    pub fn upsert_node(&mut self, id: NodeId, attributes: Attributes) {
        match self.index.get(&id) {
            Some(&idx) => self.graph[idx].merge(attributes),
            None => {
                let idx = self.graph.add_node(NodeData::new(id, attributes));
                self.index.insert(id, idx);
            }
        }
    }

    /// Removes a node and all its incident edges. Returns `false` if absent.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        match self.index.remove(&id) {
            Some(idx) => {
                self.graph.remove_node(idx);
                true
            }
            None => false,
        }
    }

    /// Inserts an edge, or merges `attributes` into an existing one.
    /// Returns `false` (and does nothing) if an endpoint is missing.
    pub fn upsert_edge(&mut self, edge: EdgeKey, attributes: Attributes) -> bool {
        let (Some(&u), Some(&v)) = (self.index.get(&edge.source), self.index.get(&edge.target)) else {
            return false;
        };
        match self.graph.find_edge(u, v) {
            Some(e) => self.graph[e].attributes.extend(attributes),
            None => {
                self.graph.add_edge(u, v, EdgeData::new(attributes));
            }
        }
        true
    }

    pub fn remove_edge(&mut self, edge: EdgeKey) -> bool {
        match self.find_edge(edge) {
            Some(e) => self.graph.remove_edge(e).is_some(),
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.graph.clear();
        self.index.clear();
    }

    pub fn clear_edges(&mut self) {
        self.graph.clear_edges();
    }

    // --- Accessors ---

    pub fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.index.get(&id).map(|&idx| &self.graph[idx])
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        let idx = *self.index.get(&id)?;
        self.graph.node_weight_mut(idx)
    }

    pub fn edge(&self, edge: EdgeKey) -> Option<&EdgeData> {
        self.find_edge(edge).and_then(|e| self.graph.edge_weight(e))
    }

    /// Iterates over all nodes in storage order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeData> + '_ {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// Iterates over all edges in storage order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, &EdgeData)> + '_ {
        (&self.graph).edge_references().map(move |e| (self.key_of(e.source(), e.target()), e.weight()))
    }

    /// Edges incident to `id` in `direction`, in insertion order.
    pub fn incident_edges(&self, id: NodeId, direction: Direction) -> Vec<EdgeKey> {
        let Some(&idx) = self.index.get(&id) else {
            return Vec::new();
        };
        // petgraph links new edges at the head of each adjacency list.
        let mut edges: Vec<EdgeKey> = self
            .graph
            .edges_directed(idx, direction)
            .map(|e| self.key_of(e.source(), e.target()))
            .collect();
        edges.reverse();
        edges
    }

    fn find_edge(&self, edge: EdgeKey) -> Option<EdgeIndex> {
        let u = *self.index.get(&edge.source)?;
        let v = *self.index.get(&edge.target)?;
        self.graph.find_edge(u, v)
    }

    #[inline(always)]
    fn key_of(&self, u: NodeIndex, v: NodeIndex) -> EdgeKey {
        EdgeKey { source: self.graph[u].id, target: self.graph[v].id }
    }
}
