//! Results of operations that run over every active constraint.

use slackscope_core::{ConstraintRef, ModelError};
use thiserror::Error;

/// A constraint whose evaluation failed inside the model collaborator.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("constraint `{constraint}` could not be evaluated: {error}")]
pub struct ConstraintFailure {
    pub constraint: ConstraintRef,
    #[source]
    pub error: ModelError,
}

impl ConstraintFailure {
    pub fn new(constraint: ConstraintRef, error: ModelError) -> Self {
        Self { constraint, error }
    }
}

/// Items produced for the constraints that evaluated, plus the failures of
/// the ones that did not. Both keep model declaration order.
///
/// A failing constraint never aborts the batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch<T> {
    pub items: Vec<T>,
    pub failures: Vec<ConstraintFailure>,
}

impl<T> Batch<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Number of items (failures excluded).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Converts to a plain result, failing with the first failure if any.
    ///
    /// For callers that prefer all-or-nothing semantics.
    pub fn into_result(self) -> Result<Vec<T>, ConstraintFailure> {
        match self.failures.into_iter().next() {
            Some(failure) => Err(failure),
            None => Ok(self.items),
        }
    }

    pub(crate) fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub(crate) fn fail(&mut self, constraint: ConstraintRef, error: ModelError) {
        self.failures.push(ConstraintFailure::new(constraint, error));
    }
}

impl<T> Default for Batch<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntoIterator for Batch<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Batch<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
