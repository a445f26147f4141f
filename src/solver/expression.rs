//! Linear expressions over indicator variables.

use super::constraint::{LinearConstraint, Relation};
use super::variables::VariableId;
use smallvec::SmallVec;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// Term storage. Most constraints in a track graph touch only a few variables.
pub(crate) type Terms = SmallVec<[(VariableId, f64); 4]>;

/// `Σ cᵢ·xᵢ + k`.
///
/// Terms on the same variable are merged, so an expression never lists a
/// variable twice. The empty sum is `zero()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpression {
    terms: Terms,
    constant: f64,
}

impl LinearExpression {
    pub fn zero() -> Self { Self::default() }

    pub fn constant(value: f64) -> Self {
        Self { terms: Terms::new(), constant: value }
    }

    pub fn variable(var: VariableId) -> Self {
        Self::term(var, 1.0)
    }

    pub fn term(var: VariableId, coefficient: f64) -> Self {
        let mut expr = Self::zero();
        expr.add_term(var, coefficient);
        expr
    }

    /// Adds `coefficient · var`, merging with an existing term on `var`.
    pub fn add_term(&mut self, var: VariableId, coefficient: f64) {
        add_coefficient(&mut self.terms, var, coefficient);
    }

    pub fn terms(&self) -> &[(VariableId, f64)] { &self.terms }
    pub fn constant_term(&self) -> f64 { self.constant }

    /// The coefficient of `var`, or 0 if it does not appear.
    pub fn coefficient(&self, var: VariableId) -> f64 {
        self.terms.iter().find(|(v, _)| *v == var).map_or(0.0, |&(_, c)| c)
    }

    pub fn is_constant(&self) -> bool { self.terms.is_empty() }

    /// Evaluates the expression for the given variable values.
    pub fn evaluate(&self, values: impl Fn(VariableId) -> f64) -> f64 {
        self.terms.iter().fold(self.constant, |acc, &(v, c)| acc + c * values(v))
    }

    /// `self ≤ rhs`
    pub fn leq(self, rhs: f64) -> LinearConstraint { self.compare(Relation::LessEqual, rhs) }

    /// `self ≥ rhs`
    pub fn geq(self, rhs: f64) -> LinearConstraint { self.compare(Relation::GreaterEqual, rhs) }

    /// `self = rhs`
    pub fn equals(self, rhs: f64) -> LinearConstraint { self.compare(Relation::Equal, rhs) }

    /// Moves the constant to the right-hand side: `Σ cᵢ·xᵢ ▷◁ rhs − k`.
    fn compare(self, relation: Relation, rhs: f64) -> LinearConstraint {
        LinearConstraint::from_parts(self.terms, relation, rhs - self.constant)
    }
}

pub(crate) fn add_coefficient(terms: &mut Terms, var: VariableId, coefficient: f64) {
    match terms.iter_mut().find(|(v, _)| *v == var) {
        Some((_, c)) => *c += coefficient,
        None => terms.push((var, coefficient)),
    }
}

impl From<VariableId> for LinearExpression {
    fn from(var: VariableId) -> Self { Self::variable(var) }
}

impl AddAssign for LinearExpression {
    fn add_assign(&mut self, rhs: Self) {
        for (var, c) in rhs.terms {
            self.add_term(var, c);
        }
        self.constant += rhs.constant;
    }
}

impl Add for LinearExpression {
    type Output = Self;
    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl Neg for LinearExpression {
    type Output = Self;
    fn neg(self) -> Self { self * -1.0 }
}

impl Sub for LinearExpression {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self { self + (-rhs) }
}

impl Mul<f64> for LinearExpression {
    type Output = Self;
    fn mul(mut self, rhs: f64) -> Self {
        for (_, c) in self.terms.iter_mut() {
            *c *= rhs;
        }
        self.constant *= rhs;
        self
    }
}

impl Sum for LinearExpression {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x(i: usize) -> LinearExpression { LinearExpression::variable(VariableId(i)) }

    #[test]
    fn test_empty_sum_is_zero() {
        let sum: LinearExpression = std::iter::empty().sum();
        assert_eq!(sum, LinearExpression::zero());
        assert!(sum.is_constant());
        assert_eq!(sum.constant_term(), 0.0);
    }

    #[test]
    fn test_terms_are_merged() {
        let expr = x(0) + x(1) + x(0) * 2.0 - x(1);
        assert_eq!(expr.coefficient(VariableId(0)), 3.0);
        assert_eq!(expr.coefficient(VariableId(1)), 0.0);
        assert_eq!(expr.terms().len(), 2);
    }

    #[test]
    fn test_evaluate() {
        let expr = x(0) * 2.0 - x(1) + LinearExpression::constant(0.5);
        let values = [1.0, 1.0];
        assert_eq!(expr.evaluate(|v| values[v.index()]), 1.5);
    }

    #[test]
    fn test_constant_moves_to_rhs() {
        let constraint = (x(0) + LinearExpression::constant(2.0)).leq(3.0);
        assert_eq!(constraint.relation(), Relation::LessEqual);
        assert_eq!(constraint.value(), 1.0);
        assert_eq!(constraint.coefficient(VariableId(0)), 1.0);
    }
}
