//! Compiles combinatorial rules about valid trajectories into linear constraints.
//!
//! Every rule is a [`ConstraintSpec`]: a pure function of the graph and the
//! variable table. A [`ConstraintSet`] runs an ordered list of them and keeps
//! the output grouped per rule.

use crate::graph::{EdgeKey, TemporalGraph};
use crate::solver::{Element, LinearConstraint, LinearExpression, VariableId, VariableKind, VariableTable};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::debug;

pub mod max_parents;
pub mod select_edge_nodes;

pub use max_parents::MaxParents;
pub use select_edge_nodes::EdgeEndpointConsistency;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConstraintError {
    /// The variable table has no variable of `kind` for a graph element.
    /// This is a contract violation by the table, not by the graph.
    #[error("Variable table has no {kind:?} variable for {element}")]
    MissingVariable { kind: VariableKind, element: Element },
}

/// A rule that turns graph topology and indicator variables into linear constraints.
///
/// Implementations hold only their configuration. `instantiate` must not have
/// side effects and must return the same constraints for an unchanged graph.
pub trait ConstraintSpec: fmt::Debug + Send + Sync {
    /// A short, stable identifier used in logs and constraint groups.
    fn name(&self) -> &'static str;

    fn instantiate(
        &self,
        graph: &TemporalGraph,
        variables: &dyn VariableTable,
    ) -> Result<Vec<LinearConstraint>, ConstraintError>;
}

pub(crate) fn indicator(
    variables: &dyn VariableTable,
    kind: VariableKind,
    element: Element,
) -> Result<VariableId, ConstraintError> {
    variables
        .indicator(kind, element)
        .ok_or(ConstraintError::MissingVariable { kind, element })
}

pub(crate) fn edge_expr(variables: &dyn VariableTable, edge: EdgeKey) -> Result<LinearExpression, ConstraintError> {
    let (kind, element) = (VariableKind::EdgeSelected, Element::Edge(edge));
    variables
        .expr(kind, element)
        .ok_or(ConstraintError::MissingVariable { kind, element })
}

/// Declarative form of the built-in constraints, e.g. for loading from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConstraintConfig {
    MaxParents { max_parents: u32 },
    EdgeEndpointConsistency,
}

impl ConstraintConfig {
    pub fn build(&self) -> Box<dyn ConstraintSpec> {
        match *self {
            ConstraintConfig::MaxParents { max_parents } => Box::new(MaxParents::new(max_parents)),
            ConstraintConfig::EdgeEndpointConsistency => Box::new(EdgeEndpointConsistency),
        }
    }
}

/// The constraints produced by one spec.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintGroup {
    pub name: &'static str,
    pub constraints: Vec<LinearConstraint>,
}

/// An ordered collection of constraint specs.
#[derive(Debug, Default)]
pub struct ConstraintSet {
    specs: Vec<Box<dyn ConstraintSpec>>,
}

impl ConstraintSet {
    pub fn new() -> Self { Self::default() }

    pub fn from_config(configs: &[ConstraintConfig]) -> Self {
        Self { specs: configs.iter().map(ConstraintConfig::build).collect() }
    }

    pub fn push(&mut self, spec: impl ConstraintSpec + 'static) {
        self.specs.push(Box::new(spec));
    }

    pub fn with(mut self, spec: impl ConstraintSpec + 'static) -> Self {
        self.push(spec);
        self
    }

    pub fn len(&self) -> usize { self.specs.len() }
    pub fn is_empty(&self) -> bool { self.specs.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &dyn ConstraintSpec> + '_ {
        self.specs.iter().map(|s| s.as_ref())
    }

    /// Instantiates every spec in order, one group per spec.
    pub fn instantiate(
        &self,
        graph: &TemporalGraph,
        variables: &dyn VariableTable,
    ) -> Result<Vec<ConstraintGroup>, ConstraintError> {
        self.specs.iter().map(|spec| Self::instantiate_one(spec.as_ref(), graph, variables)).collect()
    }

    /// Like [`instantiate`](Self::instantiate), but runs the specs on the rayon
    /// thread pool. Groups come back in the same order.
    pub fn instantiate_parallel(
        &self,
        graph: &TemporalGraph,
        variables: &(dyn VariableTable + Sync),
    ) -> Result<Vec<ConstraintGroup>, ConstraintError> {
        self.specs
            .par_iter()
            .map(|spec| Self::instantiate_one(spec.as_ref(), graph, variables))
            .collect()
    }

    fn instantiate_one(
        spec: &dyn ConstraintSpec,
        graph: &TemporalGraph,
        variables: &dyn VariableTable,
    ) -> Result<ConstraintGroup, ConstraintError> {
        let constraints = spec.instantiate(graph, variables)?;
        debug!("Instantiated {} constraints for '{}'", constraints.len(), spec.name());
        Ok(ConstraintGroup { name: spec.name(), constraints })
    }
}

/// Flattens groups into the single ordered sequence a solver consumes.
pub fn flatten(groups: Vec<ConstraintGroup>) -> Vec<LinearConstraint> {
    groups.into_iter().flat_map(|g| g.constraints).collect()
}
