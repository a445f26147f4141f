//! The validator that runs every structural rule against the whole graph.
use super::rules::time_direction;
use crate::graph::{Frame, GraphError, NodeId, TemporalGraph};
use std::collections::HashMap;

/// Collects every frame and time-direction violation in a graph.
///
/// Unlike a metadata rebuild, it does not stop at the first problem, which
/// makes it the tool of choice for repairing a graph imported from upstream.
pub struct Validator<'a> {
    graph: &'a TemporalGraph,
}

impl<'a> Validator<'a> {
    pub fn new(graph: &'a TemporalGraph) -> Self {
        Self { graph }
    }

    /// # Returns
    /// - `Ok(())` if every node has a valid frame and every edge points forward.
    /// - `Err(Vec<GraphError>)` with all violations: frame errors first, then
    ///   edge errors. Edges touching a node without a valid frame are skipped.
    pub fn validate(&self) -> Result<(), Vec<GraphError>> {
        let mut errors = Vec::new();

        let mut frames: HashMap<NodeId, Frame> = HashMap::with_capacity(self.graph.node_count());
        for id in self.graph.nodes() {
            match self.graph.frame_of(id) {
                Ok(t) => {
                    frames.insert(id, t);
                }
                Err(e) => errors.push(e),
            }
        }

        for edge in self.graph.edges() {
            if let (Some(&source_frame), Some(&target_frame)) = (frames.get(&edge.source), frames.get(&edge.target)) {
                if let Err(e) = time_direction::check_edge(edge, source_frame, target_frame) {
                    errors.push(e);
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Attributes, EdgeKey};

    #[test]
    fn test_valid_graph() {
        let mut graph = TemporalGraph::new();
        graph.add_node_at(0, 0);
        graph.add_node_at(1, 1);
        graph.add_edge(0, 1, Attributes::new()).unwrap();
        assert_eq!(Validator::new(&graph).validate(), Ok(()));
    }

    #[test]
    fn test_reports_all_violations() {
        let mut graph = TemporalGraph::new();
        graph.add_node_at(0, 2);
        graph.add_node_at(1, 1);
        graph.add_node_at(2, 1);
        graph.add_node(3, Attributes::new());
        graph.add_edge(0, 1, Attributes::new()).unwrap();
        graph.add_edge(1, 2, Attributes::new()).unwrap();
        graph.add_edge(3, 0, Attributes::new()).unwrap();

        let errors = Validator::new(&graph).validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&GraphError::MissingAttribute { node: NodeId(3), attribute: "t".into() }));
        assert!(errors.contains(&GraphError::TimeDirectionViolation {
            edge: EdgeKey::new(0, 1),
            source_frame: 2,
            target_frame: 1,
        }));
        assert!(errors.contains(&GraphError::TimeDirectionViolation {
            edge: EdgeKey::new(1, 2),
            source_frame: 1,
            target_frame: 1,
        }));
    }
}
