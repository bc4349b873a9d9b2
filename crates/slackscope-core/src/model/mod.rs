//! Read-only view of an optimization model.
//!
//! Diagnostics only ever read from a model through these traits:
//! - [`OptimizationModel`] enumerates active constraints and exposes their
//!   bodies, bounds and dual values
//! - [`VariableLookup`] resolves the current value of a variable
//! - [`Evaluable`] is anything that can compute a number from a lookup
//!
//! [`LinearModel`] is an in-memory implementation used by tests and demos.

mod linear;


use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constraint::{ConstraintBounds, ConstraintRef};
use crate::error::{EvalError, ModelError};

pub use linear::LinearModel;

/// Identifier of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VarId(pub usize);

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// Resolves variable values at evaluation time.
pub trait VariableLookup {
    /// Returns the current value of `variable`.
    ///
    /// `Ok(None)` means the variable exists but is unassigned.
    fn value(&self, variable: VarId) -> Result<Option<f64>, EvalError>;
}

/// An expression that can be evaluated against the current assignment.
pub trait Evaluable {
    /// Evaluates the expression.
    ///
    /// Returns [`EvalError::Unassigned`] when a referenced variable has no
    /// value. Implementations must not panic.
    fn evaluate(&self, lookup: &dyn VariableLookup) -> Result<f64, EvalError>;
}

/// Read-only access to a solved (or partially solved) optimization model.
///
/// Implementations must return constraints in a stable declaration order and
/// keep "no dual stored" distinguishable from a stored zero.
pub trait OptimizationModel: VariableLookup {
    /// Active constraints in declaration order.
    fn active_constraints(&self) -> Vec<ConstraintRef>;

    /// The body expression of `constraint`.
    fn constraint_body(&self, constraint: &ConstraintRef) -> Result<&dyn Evaluable, ModelError>;

    /// The bounds of `constraint`.
    fn constraint_bounds(&self, constraint: &ConstraintRef) -> Result<ConstraintBounds, ModelError>;

    /// The dual value of `constraint`, if the model stores one.
    fn dual(&self, _constraint: &ConstraintRef) -> Option<f64> {
        None
    }
}

impl<F> VariableLookup for F
where
    F: Fn(VarId) -> Option<f64>,
{
    fn value(&self, variable: VarId) -> Result<Option<f64>, EvalError> {
        Ok(self(variable))
    }
}
