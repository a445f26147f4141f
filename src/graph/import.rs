//! Bulk import/export of attribute-bearing node and edge records.

use super::edge::EdgeKey;
use super::error::GraphError;
use super::node::{Attributes, NodeId};
use super::temporal::TemporalGraph;
use crate::config::GraphConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::{Read, Write};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    #[serde(flatten)]
    pub attributes: Attributes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(flatten)]
    pub attributes: Attributes,
}

/// Pre-existing graph data, e.g. detections exported by an upstream stage.
///
/// ```json
/// {
///   "nodes": [ { "id": 0, "t": 0, "x": 1.5 }, { "id": 1, "t": 1, "x": 2.0 } ],
///   "edges": [ { "source": 0, "target": 1, "distance": 0.5 } ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphData {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl TemporalGraph {
    /// Builds a graph from bulk data. Edges are subject to the same endpoint
    /// checks as `add_edge`.
    pub fn from_data(data: GraphData, config: GraphConfig) -> Result<Self, GraphError> {
        let mut graph = Self::with_config(config);
        graph.extend(data)?;
        Ok(graph)
    }

    /// Adds all nodes of `data`, then all of its edges.
    ///
    /// Every edge endpoint must be an existing node or one of `data.nodes`.
    /// Endpoints are checked before anything is inserted, so on error the
    /// graph is unchanged.
    pub fn extend(&mut self, data: GraphData) -> Result<(), GraphError> {
        let (node_count, edge_count) = (data.nodes.len(), data.edges.len());
        let imported: HashSet<NodeId> = data.nodes.iter().map(|n| n.id).collect();
        for edge in &data.edges {
            for id in [edge.source, edge.target] {
                if !self.contains_node(id) && !imported.contains(&id) {
                    return Err(GraphError::UnknownNode(id));
                }
            }
        }

        self.add_nodes(data.nodes.into_iter().map(|n| (n.id, n.attributes)));
        self.add_edges(
            data.edges
                .into_iter()
                .map(|e| (EdgeKey { source: e.source, target: e.target }, e.attributes)),
        )?;
        debug!("Imported {} nodes and {} edges", node_count, edge_count);
        Ok(())
    }

    pub fn to_data(&self) -> GraphData {
        let mut nodes: Vec<NodeRecord> = self
            .nodes()
            .filter_map(|id| {
                self.node_attributes(id)
                    .map(|attributes| NodeRecord { id, attributes: attributes.clone() })
            })
            .collect();
        nodes.sort_by_key(|n| n.id);

        let mut edges: Vec<EdgeRecord> = self
            .edges()
            .filter_map(|edge| {
                self.edge_attributes(edge).map(|attributes| EdgeRecord {
                    source: edge.source,
                    target: edge.target,
                    attributes: attributes.clone(),
                })
            })
            .collect();
        edges.sort_by_key(|e| (e.source, e.target));

        GraphData { nodes, edges }
    }

    pub fn from_json_reader<R: Read>(reader: R, config: GraphConfig) -> Result<Self, GraphError> {
        let data: GraphData = serde_json::from_reader(reader)?;
        Self::from_data(data, config)
    }

    pub fn to_json_writer<W: Write>(&self, writer: W) -> Result<(), GraphError> {
        serde_json::to_writer(writer, &self.to_data())?;
        Ok(())
    }
}
