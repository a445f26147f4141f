//! Core of a tracking-by-assignment pipeline.
//!
//! Detections across frames live in a [`TemporalGraph`] whose edges always
//! point forward in time. Rules about valid trajectories are
//! [`ConstraintSpec`]s that compile the graph, together with externally
//! allocated indicator variables, into [`LinearConstraint`]s for an ILP solver.
//!
//! ```
//! use tracklink_core::{Attributes, ConstraintSet, EdgeEndpointConsistency, IndicatorTable, MaxParents, TemporalGraph};
//!
//! let mut graph = TemporalGraph::new();
//! graph.add_node_at(0, 0);
//! graph.add_node_at(1, 0);
//! graph.add_node_at(2, 1);
//! graph.add_edge(0, 2, Attributes::new()).unwrap();
//! graph.add_edge(1, 2, Attributes::new()).unwrap();
//! assert_eq!(graph.frame_range().unwrap(), Some(0..2));
//!
//! let variables = IndicatorTable::for_graph(&graph);
//! let constraints = ConstraintSet::new()
//!     .with(EdgeEndpointConsistency)
//!     .with(MaxParents::new(1))
//!     .instantiate(&graph, &variables)
//!     .unwrap();
//! assert_eq!(constraints[0].constraints.len(), 2);
//! assert_eq!(constraints[1].constraints.len(), 3);
//! ```

pub mod config;
pub mod constraints;
pub mod graph;
pub mod solver;
pub mod validation;

pub use config::{GraphConfig, TrackingConfig};
pub use constraints::{
    ConstraintConfig, ConstraintError, ConstraintGroup, ConstraintSet, ConstraintSpec, EdgeEndpointConsistency,
    MaxParents,
};
pub use graph::{Attributes, EdgeKey, Frame, FrameIndex, GraphData, GraphError, NodeId, TemporalGraph};
pub use solver::{
    Element, IndicatorTable, LinearConstraint, LinearExpression, Relation, VariableId, VariableKind, VariableTable,
};
pub use validation::Validator;
