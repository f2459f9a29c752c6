//! Linear and quadratic constraints.
//!
//! Both constraint kinds use a range sense `lhs <= expression <= rhs`,
//! with one-sided constraints expressed through infinite bounds. This
//! mirrors how most solver interfaces take constraints and lets a single
//! representation cover `>=`, `<=`, equality, and two-sided ranges.

use super::variable::VarId;

/// A linear term `coef * var`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearTerm {
    pub var: VarId,
    pub coef: f64,
}

impl LinearTerm {
    pub fn new(var: VarId, coef: f64) -> Self {
        Self { var, coef }
    }
}

/// A quadratic term `coef * a * b`.
///
/// A squared variable is encoded as `a == b`. Solver interfaces that take
/// quadratic constraints as sums of pairwise products consume this
/// representation directly.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuadTerm {
    pub a: VarId,
    pub b: VarId,
    pub coef: f64,
}

impl QuadTerm {
    pub fn new(a: VarId, b: VarId, coef: f64) -> Self {
        Self { a, b, coef }
    }

    /// A squared term `coef * v^2`.
    pub fn square(v: VarId, coef: f64) -> Self {
        Self { a: v, b: v, coef }
    }

    /// Expands `(u - v)^2` into pairwise products: `u^2 + v^2 - 2uv`.
    ///
    /// Solver interfaces express quadratic constraints as sums of products
    /// of two variables, so squared differences must be expanded
    /// algebraically before they can be posted.
    pub fn squared_difference(u: VarId, v: VarId) -> [QuadTerm; 3] {
        [
            QuadTerm::square(u, 1.0),
            QuadTerm::square(v, 1.0),
            QuadTerm::new(u, v, -2.0),
        ]
    }
}

/// A linear constraint `lhs <= sum(coef_k * var_k) <= rhs`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearConstraint {
    /// Constraint name (unique identifier within a model).
    pub name: String,
    /// Linear terms; each variable appears at most once.
    pub terms: Vec<LinearTerm>,
    /// Lower side of the range (may be `f64::NEG_INFINITY`).
    pub lhs: f64,
    /// Upper side of the range (may be `f64::INFINITY`).
    pub rhs: f64,
}

impl LinearConstraint {
    /// A two-sided range constraint.
    pub fn range(name: impl Into<String>, terms: Vec<LinearTerm>, lhs: f64, rhs: f64) -> Self {
        Self {
            name: name.into(),
            terms,
            lhs,
            rhs,
        }
    }

    /// `sum(terms) >= bound`.
    pub fn geq(name: impl Into<String>, terms: Vec<LinearTerm>, bound: f64) -> Self {
        Self::range(name, terms, bound, f64::INFINITY)
    }

    /// `sum(terms) <= bound`.
    pub fn leq(name: impl Into<String>, terms: Vec<LinearTerm>, bound: f64) -> Self {
        Self::range(name, terms, f64::NEG_INFINITY, bound)
    }

    /// Evaluates the linear expression at the given assignment.
    ///
    /// `values` is indexed by [`VarId`] registration order.
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|t| t.coef * values[t.var.index()])
            .sum()
    }

    /// Whether the assignment satisfies the constraint within `tol`.
    pub fn is_satisfied(&self, values: &[f64], tol: f64) -> bool {
        let v = self.evaluate(values);
        v >= self.lhs - tol && v <= self.rhs + tol
    }
}

/// A quadratic constraint `lhs <= linear + quadratic <= rhs`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuadraticConstraint {
    /// Constraint name (unique identifier within a model).
    pub name: String,
    /// Linear part; each variable appears at most once.
    pub linear: Vec<LinearTerm>,
    /// Quadratic part; each unordered variable pair appears at most once.
    pub quadratic: Vec<QuadTerm>,
    /// Lower side of the range (may be `f64::NEG_INFINITY`).
    pub lhs: f64,
    /// Upper side of the range (may be `f64::INFINITY`).
    pub rhs: f64,
}

impl QuadraticConstraint {
    /// A two-sided range constraint.
    pub fn range(
        name: impl Into<String>,
        linear: Vec<LinearTerm>,
        quadratic: Vec<QuadTerm>,
        lhs: f64,
        rhs: f64,
    ) -> Self {
        Self {
            name: name.into(),
            linear,
            quadratic,
            lhs,
            rhs,
        }
    }

    /// `linear + quadratic >= bound`.
    pub fn geq(
        name: impl Into<String>,
        linear: Vec<LinearTerm>,
        quadratic: Vec<QuadTerm>,
        bound: f64,
    ) -> Self {
        Self::range(name, linear, quadratic, bound, f64::INFINITY)
    }

    /// `linear + quadratic <= bound`.
    pub fn leq(
        name: impl Into<String>,
        linear: Vec<LinearTerm>,
        quadratic: Vec<QuadTerm>,
        bound: f64,
    ) -> Self {
        Self::range(name, linear, quadratic, f64::NEG_INFINITY, bound)
    }

    /// Evaluates the full expression at the given assignment.
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        let linear: f64 = self
            .linear
            .iter()
            .map(|t| t.coef * values[t.var.index()])
            .sum();
        let quadratic: f64 = self
            .quadratic
            .iter()
            .map(|t| t.coef * values[t.a.index()] * values[t.b.index()])
            .sum();
        linear + quadratic
    }

    /// Whether the assignment satisfies the constraint within `tol`.
    pub fn is_satisfied(&self, values: &[f64], tol: f64) -> bool {
        let v = self.evaluate(values);
        v >= self.lhs - tol && v <= self.rhs + tol
    }
}
