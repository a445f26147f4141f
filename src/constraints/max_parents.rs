//! Bounds the number of selected incoming edges per node.

use super::{edge_expr, ConstraintError, ConstraintSpec};
use crate::graph::TemporalGraph;
use crate::solver::{LinearConstraint, LinearExpression, VariableTable};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Ensures that every node has no more than `max_parents` selected edges to
/// earlier frames.
///
/// Adds, for each node `v`:
///
/// ```text
/// Σ_{e ∈ in_edges(v)} x_e ≤ max_parents
/// ```
///
/// Nodes without incoming edges still get the vacuous `0 ≤ max_parents`, so
/// the output always holds exactly one constraint per node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxParents {
    pub max_parents: u32,
}

impl MaxParents {
    pub fn new(max_parents: u32) -> Self {
        Self { max_parents }
    }
}

impl ConstraintSpec for MaxParents {
    fn name(&self) -> &'static str { "max_parents" }

    fn instantiate(
        &self,
        graph: &TemporalGraph,
        variables: &dyn VariableTable,
    ) -> Result<Vec<LinearConstraint>, ConstraintError> {
        let mut constraints = Vec::with_capacity(graph.node_count());
        for node in graph.nodes() {
            let incoming = graph.incoming_edges(node);
            let sum = incoming
                .iter()
                .map(|&edge| edge_expr(variables, edge))
                .sum::<Result<LinearExpression, ConstraintError>>()?;
            trace!("max_parents: node {} has {} incoming edges", node, incoming.len());
            constraints.push(sum.leq(f64::from(self.max_parents)));
        }
        Ok(constraints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Attributes, EdgeKey};
    use crate::solver::{IndicatorTable, Relation, VariableId};
    use rstest::rstest;

    fn make_fan_in(parents: u64) -> TemporalGraph {
        let mut graph = TemporalGraph::new();
        graph.add_node_at(0, 1);
        for p in 1..=parents {
            graph.add_node_at(p, 0);
            graph.add_edge(p, 0, Attributes::new()).unwrap();
        }
        graph
    }

    #[test]
    fn test_one_constraint_per_node() {
        let graph = make_fan_in(3);
        let table = IndicatorTable::for_graph(&graph);
        let constraints = MaxParents::new(1).instantiate(&graph, &table).unwrap();
        assert_eq!(constraints.len(), 4);
        assert!(constraints.iter().all(|c| c.relation() == Relation::LessEqual && c.value() == 1.0));
    }

    #[test]
    fn test_fan_in_constraint_sums_incoming_edges() {
        let graph = make_fan_in(2);
        let table = IndicatorTable::for_graph(&graph);
        let constraints = MaxParents::new(1).instantiate(&graph, &table).unwrap();

        let fan_in = constraints.iter().find(|c| !c.coefficients().is_empty()).unwrap();
        assert_eq!(fan_in.coefficients().len(), 2);
        assert_eq!(fan_in.coefficient(table.edge(EdgeKey::new(1, 0)).unwrap()), 1.0);
        assert_eq!(fan_in.coefficient(table.edge(EdgeKey::new(2, 0)).unwrap()), 1.0);
    }

    #[rstest]
    #[case(0, 1, 0, true)]
    #[case(1, 1, 1, true)]
    #[case(1, 2, 2, false)]
    #[case(2, 2, 2, true)]
    #[case(2, 3, 3, false)]
    fn test_fan_in_feasibility(
        #[case] max_parents: u32,
        #[case] parents: u64,
        #[case] selected: u64,
        #[case] feasible: bool,
    ) {
        let graph = make_fan_in(parents);
        let table = IndicatorTable::for_graph(&graph);
        let constraints = MaxParents::new(max_parents).instantiate(&graph, &table).unwrap();

        let chosen: Vec<_> = (1..=selected).filter_map(|p| table.edge(EdgeKey::new(p, 0))).collect();
        let values = |v: VariableId| if chosen.contains(&v) { 1.0 } else { 0.0 };
        assert_eq!(constraints.iter().all(|c| c.is_satisfied_by(values)), feasible);
    }

    #[test]
    fn test_missing_edge_variable_is_reported() {
        let graph = make_fan_in(1);
        let table = IndicatorTable::for_graph(&TemporalGraph::new());
        let err = MaxParents::new(1).instantiate(&graph, &table).unwrap_err();
        assert!(matches!(err, ConstraintError::MissingVariable { .. }));
    }
}
