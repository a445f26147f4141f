//! The solver-native linear constraint `Σ cᵢ·xᵢ ▷◁ k`.

use super::expression::{add_coefficient, Terms};
use super::variables::VariableId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance used when checking a constraint against a (relaxed) solution.
const FEASIBILITY_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    LessEqual,
    Equal,
    GreaterEqual,
}

impl Relation {
    pub fn symbol(&self) -> &'static str {
        match self {
            Relation::LessEqual => "<=",
            Relation::Equal => "=",
            Relation::GreaterEqual => ">=",
        }
    }
}

/// A linear inequality or equality over decision variables.
///
/// Can be assembled coefficient by coefficient:
///
/// ```
/// use tracklink_core::solver::{LinearConstraint, Relation, VariableId};
///
/// let mut c = LinearConstraint::new();
/// c.set_coefficient(VariableId(2), 2.0);
/// c.set_coefficient(VariableId(0), -1.0);
/// c.set_coefficient(VariableId(1), -1.0);
/// c.set_relation(Relation::LessEqual);
/// c.set_value(0.0);
/// assert_eq!(c.to_string(), "2 x2 - x0 - x1 <= 0");
/// ```
///
/// or by comparing a [`LinearExpression`](super::LinearExpression) with a constant.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    coefficients: Terms,
    relation: Relation,
    value: f64,
}

impl Default for LinearConstraint {
    fn default() -> Self {
        Self { coefficients: Terms::new(), relation: Relation::LessEqual, value: 0.0 }
    }
}

impl LinearConstraint {
    /// An empty `0 <= 0` constraint, ready for assembly.
    pub fn new() -> Self { Self::default() }

    pub(crate) fn from_parts(coefficients: Terms, relation: Relation, value: f64) -> Self {
        Self { coefficients, relation, value }
    }

    /// Sets (replaces) the coefficient of `var`.
    pub fn set_coefficient(&mut self, var: VariableId, coefficient: f64) {
        match self.coefficients.iter_mut().find(|(v, _)| *v == var) {
            Some((_, c)) => *c = coefficient,
            None => add_coefficient(&mut self.coefficients, var, coefficient),
        }
    }

    pub fn set_relation(&mut self, relation: Relation) { self.relation = relation; }
    pub fn set_value(&mut self, value: f64) { self.value = value; }

    pub fn coefficients(&self) -> &[(VariableId, f64)] { &self.coefficients }
    pub fn relation(&self) -> Relation { self.relation }
    pub fn value(&self) -> f64 { self.value }

    pub fn coefficient(&self, var: VariableId) -> f64 {
        self.coefficients.iter().find(|(v, _)| *v == var).map_or(0.0, |&(_, c)| c)
    }

    /// The left-hand side `Σ cᵢ·xᵢ` for the given variable values.
    pub fn lhs(&self, values: impl Fn(VariableId) -> f64) -> f64 {
        self.coefficients.iter().map(|&(v, c)| c * values(v)).sum()
    }

    pub fn is_satisfied_by(&self, values: impl Fn(VariableId) -> f64) -> bool {
        let lhs = self.lhs(values);
        match self.relation {
            Relation::LessEqual => lhs <= self.value + FEASIBILITY_TOLERANCE,
            Relation::Equal => (lhs - self.value).abs() <= FEASIBILITY_TOLERANCE,
            Relation::GreaterEqual => lhs >= self.value - FEASIBILITY_TOLERANCE,
        }
    }
}

/// Renders e.g. `2 x4 - x0 - x2 <= 0`; a constraint without terms renders its lhs as `0`.
impl fmt::Display for LinearConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for &(var, c) in self.coefficients.iter() {
            let magnitude = c.abs();
            match (first, c < 0.0) {
                (true, true) => write!(f, "-")?,
                (true, false) => {}
                (false, true) => write!(f, " - ")?,
                (false, false) => write!(f, " + ")?,
            }
            if magnitude != 1.0 {
                write!(f, "{} ", magnitude)?;
            }
            write!(f, "{}", var)?;
            first = false;
        }
        if first {
            write!(f, "0")?;
        }
        write!(f, " {} {}", self.relation.symbol(), self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Relation::LessEqual, 1.0, true)]
    #[case(Relation::LessEqual, 0.5, false)]
    #[case(Relation::Equal, 1.0, true)]
    #[case(Relation::Equal, 2.0, false)]
    #[case(Relation::GreaterEqual, 1.0, true)]
    #[case(Relation::GreaterEqual, 1.5, false)]
    fn test_relations(#[case] relation: Relation, #[case] value: f64, #[case] satisfied: bool) {
        // x0 + x1 with x0 = 1, x1 = 0
        let mut c = LinearConstraint::new();
        c.set_coefficient(VariableId(0), 1.0);
        c.set_coefficient(VariableId(1), 1.0);
        c.set_relation(relation);
        c.set_value(value);
        assert_eq!(c.is_satisfied_by(|v| if v == VariableId(0) { 1.0 } else { 0.0 }), satisfied);
    }

    #[test]
    fn test_set_coefficient_replaces() {
        let mut c = LinearConstraint::new();
        c.set_coefficient(VariableId(3), 1.0);
        c.set_coefficient(VariableId(3), -4.0);
        assert_eq!(c.coefficients(), &[(VariableId(3), -4.0)]);
    }

    #[test]
    fn test_display_vacuous_constraint() {
        let mut c = LinearConstraint::new();
        c.set_value(1.0);
        assert_eq!(c.to_string(), "0 <= 1");
    }

    #[test]
    fn test_display_mixed_signs() {
        let mut c = LinearConstraint::new();
        c.set_coefficient(VariableId(1), -1.0);
        c.set_coefficient(VariableId(0), 0.5);
        c.set_relation(Relation::GreaterEqual);
        c.set_value(-2.0);
        assert_eq!(c.to_string(), "-x1 + 0.5 x0 >= -2");
    }
}
