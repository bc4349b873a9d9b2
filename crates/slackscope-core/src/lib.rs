//! SlackScope Core - model-facing types for constraint diagnostics
//!
//! This crate provides the narrow, read-only interface the diagnostics engine
//! consumes from an optimization model:
//! - Constraint handles and bound descriptors
//! - Expression trees evaluated against the current variable assignment
//! - The `OptimizationModel` trait and an in-memory `LinearModel`
//! - Error types separating unassigned variables from model access failures

pub mod constraint;
pub mod error;
pub mod expr;
pub mod model;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;


pub use constraint::{Bound, ConstraintBounds, ConstraintId, ConstraintRef};
pub use error::{EvalError, ModelError};
pub use expr::Expr;
pub use model::{Evaluable, LinearModel, OptimizationModel, VarId, VariableLookup};
