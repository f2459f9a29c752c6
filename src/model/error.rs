//! Model construction errors.

use thiserror::Error;

/// Errors detected while building a model.
///
/// All of these are construction-time failures: a model that produced one
/// is rejected before it can be handed to a solver.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("duplicate variable name: {0}")]
    DuplicateVariable(String),

    #[error("duplicate constraint name: {0}")]
    DuplicateConstraint(String),

    #[error("constraint {constraint} references unregistered variable id {id}")]
    UnknownVariable { constraint: String, id: usize },

    #[error("constraint {constraint} lists variable {name} more than once")]
    RepeatedTerm { constraint: String, name: String },

    #[error("constraint {constraint} repeats quadratic pair ({a}, {b})")]
    RepeatedQuadPair {
        constraint: String,
        a: String,
        b: String,
    },

    #[error("variable {name}: lower bound {lower} exceeds upper bound {upper}")]
    InvertedBounds {
        name: String,
        lower: f64,
        upper: f64,
    },

    #[error("constraint {name}: empty range [{lhs}, {rhs}]")]
    EmptyRange { name: String, lhs: f64, rhs: f64 },
}
