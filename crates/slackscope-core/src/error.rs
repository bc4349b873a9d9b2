//! Error types for model access.

use thiserror::Error;

use crate::model::VarId;

/// Failure raised while evaluating an expression against a variable lookup.
///
/// `Unassigned` is not a failure from the diagnostics point of view: it is the
/// "undefined value" outcome and evaluates to NaN. Every other variant is a
/// model access failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// A referenced variable has no current value.
    #[error("variable {variable} has no assigned value")]
    Unassigned { variable: VarId },

    /// A referenced variable does not exist in the model.
    #[error("unknown variable {variable}")]
    UnknownVariable { variable: VarId },

    /// The expression could not be evaluated for structural reasons.
    #[error("malformed expression: {0}")]
    Malformed(String),
}

impl EvalError {
    /// Returns true if this is the unassigned-variable outcome.
    pub fn is_unassigned(&self) -> bool {
        matches!(self, EvalError::Unassigned { .. })
    }
}

/// Failure raised by an optimization model collaborator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// The constraint handle does not belong to this model.
    #[error("unknown constraint `{0}`")]
    UnknownConstraint(String),

    /// Expression evaluation failed.
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Result type alias for model access.
pub type Result<T> = std::result::Result<T, ModelError>;
