//! Boundary types shared with an external ILP solver.
//!
//! The core never allocates variables or solves anything. It reads indicator
//! variables through a [`VariableTable`] and hands [`LinearConstraint`]s back.
pub mod constraint;
pub mod expression;
pub mod variables;

pub use constraint::{LinearConstraint, Relation};
pub use expression::LinearExpression;
pub use variables::{Element, IndicatorTable, VariableId, VariableKind, VariableTable};
