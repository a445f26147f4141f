//! Ties every edge indicator to the indicators of its endpoints.

use super::{indicator, ConstraintError, ConstraintSpec};
use crate::graph::TemporalGraph;
use crate::solver::{Element, LinearConstraint, Relation, VariableKind, VariableTable};
use serde::{Deserialize, Serialize};

/// Ensures that if an edge `(u, v)` is selected, `u` and `v` are selected too.
///
/// Adds, for each edge `e = (u, v)`:
///
/// ```text
/// 2 x_e − x_u − x_v ≤ 0
/// ```
///
/// Nothing registers this constraint implicitly; a driver that wants it in
/// every solve must add it itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeEndpointConsistency;

impl ConstraintSpec for EdgeEndpointConsistency {
    fn name(&self) -> &'static str { "edge_endpoint_consistency" }

    fn instantiate(
        &self,
        graph: &TemporalGraph,
        variables: &dyn VariableTable,
    ) -> Result<Vec<LinearConstraint>, ConstraintError> {
        let mut constraints = Vec::with_capacity(graph.edge_count());
        for edge in graph.edges() {
            let ind_e = indicator(variables, VariableKind::EdgeSelected, Element::Edge(edge))?;
            let ind_u = indicator(variables, VariableKind::NodeSelected, Element::Node(edge.source))?;
            let ind_v = indicator(variables, VariableKind::NodeSelected, Element::Node(edge.target))?;

            let mut constraint = LinearConstraint::new();
            constraint.set_coefficient(ind_e, 2.0);
            constraint.set_coefficient(ind_u, -1.0);
            constraint.set_coefficient(ind_v, -1.0);
            constraint.set_relation(Relation::LessEqual);
            constraint.set_value(0.0);
            constraints.push(constraint);
        }
        Ok(constraints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Attributes, EdgeKey};
    use crate::solver::{IndicatorTable, VariableId};
    use rstest::rstest;

    fn make_pair() -> TemporalGraph {
        let mut graph = TemporalGraph::new();
        graph.add_node_at(0, 0);
        graph.add_node_at(1, 1);
        graph.add_edge(0, 1, Attributes::new()).unwrap();
        graph
    }

    #[test]
    fn test_constraint_form() {
        let graph = make_pair();
        let table = IndicatorTable::for_graph(&graph);
        let constraints = EdgeEndpointConsistency.instantiate(&graph, &table).unwrap();

        assert_eq!(constraints.len(), 1);
        let c = &constraints[0];
        assert_eq!(c.coefficient(table.edge(EdgeKey::new(0, 1)).unwrap()), 2.0);
        assert_eq!(c.coefficient(table.node(0).unwrap()), -1.0);
        assert_eq!(c.coefficient(table.node(1).unwrap()), -1.0);
        assert_eq!(c.relation(), Relation::LessEqual);
        assert_eq!(c.value(), 0.0);
        assert_eq!(c.to_string(), "2 x2 - x0 - x1 <= 0");
    }

    // (x_u, x_v, x_e)
    #[rstest]
    #[case(0.0, 0.0, 0.0, true)]
    #[case(1.0, 0.0, 0.0, true)]
    #[case(1.0, 1.0, 0.0, true)]
    #[case(1.0, 1.0, 1.0, true)]
    #[case(1.0, 0.0, 1.0, false)]
    #[case(0.0, 1.0, 1.0, false)]
    #[case(0.0, 0.0, 1.0, false)]
    fn test_selected_edge_requires_both_endpoints(
        #[case] x_u: f64,
        #[case] x_v: f64,
        #[case] x_e: f64,
        #[case] feasible: bool,
    ) {
        let graph = make_pair();
        let table = IndicatorTable::for_graph(&graph);
        let constraints = EdgeEndpointConsistency.instantiate(&graph, &table).unwrap();

        let values = [x_u, x_v, x_e];
        assert_eq!(constraints[0].is_satisfied_by(|v: VariableId| values[v.index()]), feasible);
    }

    #[test]
    fn test_no_edges_no_constraints() {
        let mut graph = make_pair();
        graph.clear_edges();
        let table = IndicatorTable::for_graph(&graph);
        assert!(EdgeEndpointConsistency.instantiate(&graph, &table).unwrap().is_empty());
    }
}
