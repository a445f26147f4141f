//! The lookup capability for indicator variables, owned outside the core.

use super::expression::LinearExpression;
use crate::graph::{EdgeKey, NodeId, TemporalGraph};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Index of a decision variable in the solver's variable vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct VariableId(pub usize);

impl VariableId {
    #[inline(always)]
    pub fn index(&self) -> usize { self.0 }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// The kind of indicator a constraint asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariableKind {
    /// "Is this node part of the selected solution?"
    NodeSelected,
    /// "Is this edge part of the selected solution?"
    EdgeSelected,
}

/// A graph element a variable can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Node(NodeId),
    Edge(EdgeKey),
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Node(id) => write!(f, "node {}", id),
            Element::Edge(edge) => write!(f, "edge {}", edge),
        }
    }
}

/// Maps graph elements to decision variables.
///
/// Implementations must return a stable handle for the lifetime of a solve
/// and must answer for every node and edge present in the graph at
/// instantiation time. `None` is a contract violation that constraints report
/// as [`ConstraintError::MissingVariable`](crate::constraints::ConstraintError).
pub trait VariableTable {
    fn indicator(&self, kind: VariableKind, element: Element) -> Option<VariableId>;

    /// The indicator as a linear expression, summable with others.
    fn expr(&self, kind: VariableKind, element: Element) -> Option<LinearExpression> {
        self.indicator(kind, element).map(LinearExpression::variable)
    }
}

/// A dense variable table: one `NodeSelected` indicator per node, then one
/// `EdgeSelected` indicator per edge, numbered from 0.
#[derive(Debug, Clone, Default)]
pub struct IndicatorTable {
    nodes: HashMap<NodeId, VariableId>,
    edges: HashMap<EdgeKey, VariableId>,
}

impl IndicatorTable {
    /// Allocates indicators for every node and edge of `graph`, in id order.
    pub fn for_graph(graph: &TemporalGraph) -> Self {
        let mut node_ids: Vec<NodeId> = graph.nodes().collect();
        node_ids.sort_unstable();
        let mut edge_keys: Vec<EdgeKey> = graph.edges().collect();
        edge_keys.sort_unstable();

        let nodes: HashMap<NodeId, VariableId> =
            node_ids.into_iter().enumerate().map(|(i, id)| (id, VariableId(i))).collect();
        let offset = nodes.len();
        let edges = edge_keys
            .into_iter()
            .enumerate()
            .map(|(i, key)| (key, VariableId(offset + i)))
            .collect();

        Self { nodes, edges }
    }

    pub fn len(&self) -> usize { self.nodes.len() + self.edges.len() }
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn node(&self, id: impl Into<NodeId>) -> Option<VariableId> {
        self.nodes.get(&id.into()).copied()
    }

    pub fn edge(&self, edge: impl Into<EdgeKey>) -> Option<VariableId> {
        self.edges.get(&edge.into()).copied()
    }
}

impl VariableTable for IndicatorTable {
    fn indicator(&self, kind: VariableKind, element: Element) -> Option<VariableId> {
        match (kind, element) {
            (VariableKind::NodeSelected, Element::Node(id)) => self.nodes.get(&id).copied(),
            (VariableKind::EdgeSelected, Element::Edge(edge)) => self.edges.get(&edge).copied(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Attributes;

    #[test]
    fn test_dense_allocation() {
        let mut graph = TemporalGraph::new();
        graph.add_node_at(10, 0);
        graph.add_node_at(5, 0);
        graph.add_node_at(7, 1);
        graph.add_edge(10, 7, Attributes::new()).unwrap();
        graph.add_edge(5, 7, Attributes::new()).unwrap();

        let table = IndicatorTable::for_graph(&graph);
        assert_eq!(table.len(), 5);
        assert_eq!(table.node(5), Some(VariableId(0)));
        assert_eq!(table.node(7), Some(VariableId(1)));
        assert_eq!(table.node(10), Some(VariableId(2)));
        assert_eq!(table.edge(EdgeKey::new(5, 7)), Some(VariableId(3)));
        assert_eq!(table.edge(EdgeKey::new(10, 7)), Some(VariableId(4)));
    }

    #[test]
    fn test_kind_must_match_element() {
        let mut graph = TemporalGraph::new();
        graph.add_node_at(0, 0);
        let table = IndicatorTable::for_graph(&graph);

        assert_eq!(table.indicator(VariableKind::NodeSelected, Element::Node(NodeId(0))), Some(VariableId(0)));
        assert_eq!(table.indicator(VariableKind::EdgeSelected, Element::Node(NodeId(0))), None);
        assert_eq!(
            table.expr(VariableKind::NodeSelected, Element::Node(NodeId(0))),
            Some(LinearExpression::variable(VariableId(0)))
        );
    }
}
