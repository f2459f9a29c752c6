//! NLP model container.

use std::collections::{HashMap, HashSet};
use std::fmt;

use super::constraint::{LinearConstraint, QuadraticConstraint};
use super::error::ModelError;
use super::variable::{VarId, Variable};

/// Direction of the objective function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectiveSense {
    Minimize,
    Maximize,
}

/// A continuous nonlinear program: variables, linear and quadratic
/// constraints, and an objective sense.
///
/// The model owns everything it is given. Invariants are enforced when
/// variables and constraints are added, so a model that was built through
/// the public API is always internally consistent: names are unique and
/// every [`VarId`] referenced by a constraint or the warm start was issued
/// by this model. [`validate`](Model::validate) re-checks the same
/// invariants, which lets solver implementations reject a malformed model
/// instead of trusting the caller.
///
/// # Examples
///
/// ```
/// use u_circlepack::model::{LinearConstraint, LinearTerm, Model, Variable};
///
/// let mut model = Model::new("example");
/// let x = model.add_variable(Variable::new("x", 0.0, 10.0)).unwrap();
/// model
///     .add_linear(LinearConstraint::geq("x_lo", vec![LinearTerm::new(x, 1.0)], 2.0))
///     .unwrap();
/// assert_eq!(model.variable_count(), 1);
/// assert_eq!(model.constraint_count(), 1);
/// assert!(model.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Model {
    /// Model name.
    name: String,
    variables: Vec<Variable>,
    index: HashMap<String, VarId>,
    linear: Vec<LinearConstraint>,
    quadratic: Vec<QuadraticConstraint>,
    constraint_names: HashSet<String>,
    sense: ObjectiveSense,
    warm_start: Vec<(VarId, f64)>,
}

impl Model {
    /// Creates an empty minimization model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
            index: HashMap::new(),
            linear: Vec::new(),
            quadratic: Vec::new(),
            constraint_names: HashSet::new(),
            sense: ObjectiveSense::Minimize,
            warm_start: Vec::new(),
        }
    }

    /// Model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers a variable and returns its handle.
    ///
    /// Fails on a duplicate name or an inverted domain.
    pub fn add_variable(&mut self, variable: Variable) -> Result<VarId, ModelError> {
        if !(variable.lower <= variable.upper) {
            return Err(ModelError::InvertedBounds {
                name: variable.name.clone(),
                lower: variable.lower,
                upper: variable.upper,
            });
        }
        if self.index.contains_key(&variable.name) {
            return Err(ModelError::DuplicateVariable(variable.name.clone()));
        }
        let id = VarId::new(self.variables.len());
        self.index.insert(variable.name.clone(), id);
        self.variables.push(variable);
        Ok(id)
    }

    /// Adds a linear constraint.
    pub fn add_linear(&mut self, constraint: LinearConstraint) -> Result<(), ModelError> {
        self.check_constraint_header(&constraint.name, constraint.lhs, constraint.rhs)?;
        self.check_linear_terms(&constraint.name, &constraint.terms)?;
        self.constraint_names.insert(constraint.name.clone());
        self.linear.push(constraint);
        Ok(())
    }

    /// Adds a quadratic constraint.
    pub fn add_quadratic(&mut self, constraint: QuadraticConstraint) -> Result<(), ModelError> {
        self.check_constraint_header(&constraint.name, constraint.lhs, constraint.rhs)?;
        self.check_linear_terms(&constraint.name, &constraint.linear)?;
        self.check_quad_terms(&constraint.name, &constraint.quadratic)?;
        self.constraint_names.insert(constraint.name.clone());
        self.quadratic.push(constraint);
        Ok(())
    }

    /// Sets the objective sense.
    pub fn set_objective_sense(&mut self, sense: ObjectiveSense) {
        self.sense = sense;
    }

    /// Current objective sense.
    pub fn objective_sense(&self) -> ObjectiveSense {
        self.sense
    }

    /// Attaches an initial solution hint.
    ///
    /// Solvers are free to ignore it. Replaces any previous hint.
    pub fn set_warm_start(&mut self, hint: Vec<(VarId, f64)>) -> Result<(), ModelError> {
        for &(id, _) in &hint {
            if id.index() >= self.variables.len() {
                return Err(ModelError::UnknownVariable {
                    constraint: "warm_start".into(),
                    id: id.index(),
                });
            }
        }
        self.warm_start = hint;
        Ok(())
    }

    /// The initial solution hint, empty when none was attached.
    pub fn warm_start(&self) -> &[(VarId, f64)] {
        &self.warm_start
    }

    /// Looks up a variable handle by name.
    pub fn var(&self, name: &str) -> Option<VarId> {
        self.index.get(name).copied()
    }

    /// The variable behind a handle issued by this model.
    ///
    /// # Panics
    /// Panics if the handle was issued by a different model.
    pub fn variable(&self, id: VarId) -> &Variable {
        &self.variables[id.index()]
    }

    /// All variables in registration order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// All linear constraints in insertion order.
    pub fn linear_constraints(&self) -> &[LinearConstraint] {
        &self.linear
    }

    /// All quadratic constraints in insertion order.
    pub fn quadratic_constraints(&self) -> &[QuadraticConstraint] {
        &self.quadratic
    }

    /// Number of registered variables.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Total number of constraints (linear + quadratic).
    pub fn constraint_count(&self) -> usize {
        self.linear.len() + self.quadratic.len()
    }

    /// Objective value of an assignment (indexed by [`VarId`] order).
    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.variables
            .iter()
            .zip(values)
            .map(|(v, x)| v.objective * x)
            .sum()
    }

    /// Whether an assignment satisfies all domains and constraints within `tol`.
    pub fn is_feasible(&self, values: &[f64], tol: f64) -> bool {
        self.variables
            .iter()
            .zip(values)
            .all(|(v, &x)| v.contains(x, tol))
            && self.linear.iter().all(|c| c.is_satisfied(values, tol))
            && self.quadratic.iter().all(|c| c.is_satisfied(values, tol))
    }

    /// Total constraint and bound violation of an assignment.
    ///
    /// Zero exactly when the assignment is feasible without tolerance.
    pub fn violation(&self, values: &[f64]) -> f64 {
        let bounds: f64 = self
            .variables
            .iter()
            .zip(values)
            .map(|(v, &x)| (v.lower - x).max(0.0) + (x - v.upper).max(0.0))
            .sum();
        let linear: f64 = self
            .linear
            .iter()
            .map(|c| range_violation(c.evaluate(values), c.lhs, c.rhs))
            .sum();
        let quadratic: f64 = self
            .quadratic
            .iter()
            .map(|c| range_violation(c.evaluate(values), c.lhs, c.rhs))
            .sum();
        bounds + linear + quadratic
    }

    /// Re-checks every model invariant.
    ///
    /// Models built through `add_*` always pass; solver implementations
    /// call this to guard against handles from a foreign model.
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut names: HashSet<&str> = HashSet::new();
        for v in &self.variables {
            if !(v.lower <= v.upper) {
                return Err(ModelError::InvertedBounds {
                    name: v.name.clone(),
                    lower: v.lower,
                    upper: v.upper,
                });
            }
            if !names.insert(v.name.as_str()) {
                return Err(ModelError::DuplicateVariable(v.name.clone()));
            }
        }
        let mut cons_names: HashSet<&str> = HashSet::new();
        for c in &self.linear {
            if !cons_names.insert(c.name.as_str()) {
                return Err(ModelError::DuplicateConstraint(c.name.clone()));
            }
            self.check_linear_terms(&c.name, &c.terms)?;
        }
        for c in &self.quadratic {
            if !cons_names.insert(c.name.as_str()) {
                return Err(ModelError::DuplicateConstraint(c.name.clone()));
            }
            self.check_linear_terms(&c.name, &c.linear)?;
            self.check_quad_terms(&c.name, &c.quadratic)?;
        }
        for &(id, _) in &self.warm_start {
            if id.index() >= self.variables.len() {
                return Err(ModelError::UnknownVariable {
                    constraint: "warm_start".into(),
                    id: id.index(),
                });
            }
        }
        Ok(())
    }

    fn check_constraint_header(&self, name: &str, lhs: f64, rhs: f64) -> Result<(), ModelError> {
        if lhs > rhs {
            return Err(ModelError::EmptyRange {
                name: name.into(),
                lhs,
                rhs,
            });
        }
        if self.constraint_names.contains(name) {
            return Err(ModelError::DuplicateConstraint(name.into()));
        }
        Ok(())
    }

    fn check_linear_terms(
        &self,
        constraint: &str,
        terms: &[super::constraint::LinearTerm],
    ) -> Result<(), ModelError> {
        let mut seen: HashSet<usize> = HashSet::new();
        for t in terms {
            if t.var.index() >= self.variables.len() {
                return Err(ModelError::UnknownVariable {
                    constraint: constraint.into(),
                    id: t.var.index(),
                });
            }
            if !seen.insert(t.var.index()) {
                return Err(ModelError::RepeatedTerm {
                    constraint: constraint.into(),
                    name: self.variables[t.var.index()].name.clone(),
                });
            }
        }
        Ok(())
    }

    fn check_quad_terms(
        &self,
        constraint: &str,
        terms: &[super::constraint::QuadTerm],
    ) -> Result<(), ModelError> {
        let mut seen: HashSet<(usize, usize)> = HashSet::new();
        for t in terms {
            for id in [t.a, t.b] {
                if id.index() >= self.variables.len() {
                    return Err(ModelError::UnknownVariable {
                        constraint: constraint.into(),
                        id: id.index(),
                    });
                }
            }
            let pair = (
                t.a.index().min(t.b.index()),
                t.a.index().max(t.b.index()),
            );
            if !seen.insert(pair) {
                return Err(ModelError::RepeatedQuadPair {
                    constraint: constraint.into(),
                    a: self.variables[pair.0].name.clone(),
                    b: self.variables[pair.1].name.clone(),
                });
            }
        }
        Ok(())
    }
}

fn range_violation(value: f64, lhs: f64, rhs: f64) -> f64 {
    (lhs - value).max(0.0) + (value - rhs).max(0.0)
}

fn fmt_bound(b: f64) -> String {
    if b == f64::INFINITY {
        "+inf".into()
    } else if b == f64::NEG_INFINITY {
        "-inf".into()
    } else {
        format!("{b}")
    }
}

fn fmt_quad_factor(model: &Model, t: &super::constraint::QuadTerm) -> String {
    if t.a == t.b {
        format!("{}^2", model.variable(t.a).name)
    } else {
        format!("{}*{}", model.variable(t.a).name, model.variable(t.b).name)
    }
}

/// Human-readable model listing: objective sense, variables with domains,
/// then constraints with their terms and ranges. Deterministic for a given
/// model, which also makes it a convenient structural-identity witness.
impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "model {}", self.name)?;
        match self.sense {
            ObjectiveSense::Minimize => writeln!(f, "minimize")?,
            ObjectiveSense::Maximize => writeln!(f, "maximize")?,
        }
        writeln!(f, "variables:")?;
        for v in &self.variables {
            write!(
                f,
                "  {} in [{}, {}]",
                v.name,
                fmt_bound(v.lower),
                fmt_bound(v.upper)
            )?;
            if v.objective != 0.0 {
                write!(f, " obj {}", v.objective)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "constraints:")?;
        for c in &self.linear {
            write!(f, "  {}:", c.name)?;
            for t in &c.terms {
                write!(f, " {:+} {}", t.coef, self.variable(t.var).name)?;
            }
            writeln!(f, " in [{}, {}]", fmt_bound(c.lhs), fmt_bound(c.rhs))?;
        }
        for c in &self.quadratic {
            write!(f, "  {}:", c.name)?;
            for t in &c.linear {
                write!(f, " {:+} {}", t.coef, self.variable(t.var).name)?;
            }
            for t in &c.quadratic {
                write!(f, " {:+} {}", t.coef, fmt_quad_factor(self, t))?;
            }
            writeln!(f, " in [{}, {}]", fmt_bound(c.lhs), fmt_bound(c.rhs))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LinearTerm, QuadTerm};

    fn two_var_model() -> (Model, VarId, VarId) {
        let mut model = Model::new("test");
        let x = model.add_variable(Variable::new("x", 0.0, 10.0)).unwrap();
        let y = model.add_variable(Variable::new("y", 0.0, 10.0)).unwrap();
        (model, x, y)
    }

    #[test]
    fn test_add_and_lookup() {
        let (model, x, _) = two_var_model();
        assert_eq!(model.var("x"), Some(x));
        assert_eq!(model.variable(x).name, "x");
        assert_eq!(model.var("z"), None);
        assert_eq!(model.variable_count(), 2);
    }

    #[test]
    fn test_duplicate_variable() {
        let (mut model, _, _) = two_var_model();
        let err = model.add_variable(Variable::new("x", 0.0, 1.0)).unwrap_err();
        assert_eq!(err, ModelError::DuplicateVariable("x".into()));
    }

    #[test]
    fn test_inverted_bounds() {
        let mut model = Model::new("test");
        let err = model.add_variable(Variable::new("b", 5.0, 1.0)).unwrap_err();
        assert!(matches!(err, ModelError::InvertedBounds { .. }));
    }

    #[test]
    fn test_duplicate_constraint() {
        let (mut model, x, _) = two_var_model();
        model
            .add_linear(LinearConstraint::geq("c", vec![LinearTerm::new(x, 1.0)], 0.0))
            .unwrap();
        let err = model
            .add_linear(LinearConstraint::geq("c", vec![LinearTerm::new(x, 1.0)], 1.0))
            .unwrap_err();
        assert_eq!(err, ModelError::DuplicateConstraint("c".into()));
    }

    #[test]
    fn test_duplicate_name_across_kinds() {
        let (mut model, x, y) = two_var_model();
        model
            .add_linear(LinearConstraint::geq("c", vec![LinearTerm::new(x, 1.0)], 0.0))
            .unwrap();
        let err = model
            .add_quadratic(QuadraticConstraint::leq(
                "c",
                vec![],
                vec![QuadTerm::new(x, y, 1.0)],
                0.0,
            ))
            .unwrap_err();
        assert_eq!(err, ModelError::DuplicateConstraint("c".into()));
    }

    #[test]
    fn test_unknown_variable() {
        let (mut model, _, _) = two_var_model();
        let ghost = VarId::new(99);
        let err = model
            .add_linear(LinearConstraint::geq("c", vec![LinearTerm::new(ghost, 1.0)], 0.0))
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::UnknownVariable {
                constraint: "c".into(),
                id: 99
            }
        );
    }

    #[test]
    fn test_repeated_term() {
        let (mut model, x, _) = two_var_model();
        let err = model
            .add_linear(LinearConstraint::geq(
                "c",
                vec![LinearTerm::new(x, 1.0), LinearTerm::new(x, 2.0)],
                0.0,
            ))
            .unwrap_err();
        assert!(matches!(err, ModelError::RepeatedTerm { .. }));
    }

    #[test]
    fn test_repeated_quad_pair() {
        let (mut model, x, y) = two_var_model();
        // x*y and y*x are the same unordered pair
        let err = model
            .add_quadratic(QuadraticConstraint::leq(
                "c",
                vec![],
                vec![QuadTerm::new(x, y, 1.0), QuadTerm::new(y, x, 2.0)],
                0.0,
            ))
            .unwrap_err();
        assert!(matches!(err, ModelError::RepeatedQuadPair { .. }));
    }

    #[test]
    fn test_empty_range() {
        let (mut model, x, _) = two_var_model();
        let err = model
            .add_linear(LinearConstraint::range(
                "c",
                vec![LinearTerm::new(x, 1.0)],
                5.0,
                1.0,
            ))
            .unwrap_err();
        assert!(matches!(err, ModelError::EmptyRange { .. }));
    }

    #[test]
    fn test_objective_value() {
        let mut model = Model::new("test");
        model.add_variable(Variable::new("w", 0.0, 10.0)).unwrap();
        model
            .add_variable(Variable::new("area", 0.0, f64::INFINITY).with_objective(1.0))
            .unwrap();
        assert_eq!(model.objective_value(&[3.0, 42.0]), 42.0);
    }

    #[test]
    fn test_feasibility_and_violation() {
        let (mut model, x, y) = two_var_model();
        model
            .add_linear(LinearConstraint::geq("lo", vec![LinearTerm::new(x, 1.0)], 2.0))
            .unwrap();
        model
            .add_quadratic(QuadraticConstraint::leq(
                "prod",
                vec![],
                vec![QuadTerm::new(x, y, 1.0)],
                20.0,
            ))
            .unwrap();

        assert!(model.is_feasible(&[3.0, 4.0], 1e-9));
        assert_eq!(model.violation(&[3.0, 4.0]), 0.0);

        // x below its constraint bound and product above its cap
        assert!(!model.is_feasible(&[1.0, 10.0], 1e-9));
        assert!(model.violation(&[1.0, 30.0]) > 0.0);
    }

    #[test]
    fn test_warm_start_checked() {
        let (mut model, x, y) = two_var_model();
        model.set_warm_start(vec![(x, 1.0), (y, 2.0)]).unwrap();
        assert_eq!(model.warm_start().len(), 2);

        let err = model.set_warm_start(vec![(VarId::new(5), 0.0)]).unwrap_err();
        assert!(matches!(err, ModelError::UnknownVariable { .. }));
    }

    #[test]
    fn test_default_sense_minimize() {
        let model = Model::new("test");
        assert_eq!(model.objective_sense(), ObjectiveSense::Minimize);
    }

    #[test]
    fn test_validate_ok() {
        let (mut model, x, y) = two_var_model();
        model
            .add_quadratic(QuadraticConstraint::geq(
                "sep",
                vec![],
                vec![QuadTerm::square(x, 1.0), QuadTerm::square(y, 1.0)],
                1.0,
            ))
            .unwrap();
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_listing_renders_terms() {
        let (mut model, x, y) = two_var_model();
        model
            .add_linear(LinearConstraint::leq(
                "cap",
                vec![LinearTerm::new(x, 1.0), LinearTerm::new(y, -1.0)],
                -2.0,
            ))
            .unwrap();
        model
            .add_quadratic(QuadraticConstraint::geq(
                "sep",
                vec![],
                QuadTerm::squared_difference(x, y).to_vec(),
                4.0,
            ))
            .unwrap();

        let listing = model.to_string();
        assert!(listing.contains("minimize"));
        assert!(listing.contains("x in [0, 10]"));
        assert!(listing.contains("cap: +1 x -1 y in [-inf, -2]"));
        assert!(listing.contains("sep: +1 x^2 +1 y^2 -2 x*y in [4, +inf]"));
    }
}
