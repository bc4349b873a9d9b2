//! Per-constraint evaluation against the current variable assignment.

use std::fmt::{self, Debug};

use slackscope_core::{ConstraintBounds, ConstraintRef, ModelError, OptimizationModel};

/// Signed slack of `body` against `bounds`.
///
/// - `body >= lower`: `body - lower`
/// - `body <= upper`: `upper - body`
/// - `body == value`: `-|body - value|`
/// - both sides: the smaller of the two one-sided slacks
/// - neither side: `+inf`
///
/// NaN bodies yield NaN. A free constraint is the one case where a defined
/// body gives a non-finite slack; it is never binding and never violated.
///
/// # Example
///
/// ```
/// use slackscope::slack;
/// use slackscope_core::ConstraintBounds;
///
/// assert_eq!(slack(7.0, &ConstraintBounds::at_least(5.0)), 2.0);
/// assert_eq!(slack(7.0, &ConstraintBounds::at_most(5.0)), -2.0);
/// assert_eq!(slack(9.0, &ConstraintBounds::equal_to(10.0)), -1.0);
/// assert_eq!(slack(4.0, &ConstraintBounds::between(1.0, 5.0)), 1.0);
/// assert!(slack(f64::NAN, &ConstraintBounds::at_least(0.0)).is_nan());
/// assert_eq!(slack(3.0, &ConstraintBounds::free()), f64::INFINITY);
/// ```
pub fn slack(body: f64, bounds: &ConstraintBounds) -> f64 {
    if body.is_nan() {
        return f64::NAN;
    }
    if let (true, Some(target)) = (bounds.is_equality(), bounds.lower.value()) {
        return -(body - target).abs();
    }

    let above_lower = bounds.lower.value().map(|lower| body - lower);
    let below_upper = bounds.upper.value().map(|upper| upper - body);
    match (above_lower, below_upper) {
        (Some(a), Some(b)) => a.min(b),
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => f64::INFINITY,
    }
}

/// Body, bounds and slack of one constraint, read in a single pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub body: f64,
    pub bounds: ConstraintBounds,
    pub slack: f64,
}

/// Evaluates single constraints of a model.
///
/// Holds only a shared reference; every call re-reads the model.
pub struct ConstraintIntrospector<'m, M: OptimizationModel> {
    model: &'m M,
}

impl<'m, M: OptimizationModel> ConstraintIntrospector<'m, M> {
    pub fn new(model: &'m M) -> Self {
        Self { model }
    }

    /// The model being inspected.
    pub fn model(&self) -> &'m M {
        self.model
    }

    /// Evaluates the body of `constraint` with current variable values.
    ///
    /// Unassigned variables and undefined arithmetic yield NaN.
    ///
    /// # Errors
    ///
    /// Returns the model's error unchanged when the constraint is unknown or
    /// its expression cannot be evaluated for any other reason.
    pub fn constraint_body_value(&self, constraint: &ConstraintRef) -> Result<f64, ModelError> {
        let body = self.model.constraint_body(constraint)?;
        match body.evaluate(self.model) {
            Ok(value) => Ok(value),
            Err(err) if err.is_unassigned() => Ok(f64::NAN),
            Err(err) => Err(err.into()),
        }
    }

    /// Returns `(lower, upper)` bounds of `constraint`.
    pub fn constraint_bounds(
        &self,
        constraint: &ConstraintRef,
    ) -> Result<ConstraintBounds, ModelError> {
        self.model.constraint_bounds(constraint)
    }

    /// Computes the signed slack of `constraint`. See [`slack`].
    pub fn compute_slack(&self, constraint: &ConstraintRef) -> Result<f64, ModelError> {
        Ok(self.evaluate(constraint)?.slack)
    }

    /// Reads body, bounds and slack together.
    pub fn evaluate(&self, constraint: &ConstraintRef) -> Result<Evaluation, ModelError> {
        let body = self.constraint_body_value(constraint)?;
        let bounds = self.constraint_bounds(constraint)?;
        Ok(Evaluation {
            body,
            bounds,
            slack: slack(body, &bounds),
        })
    }
}

impl<M: OptimizationModel> Clone for ConstraintIntrospector<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: OptimizationModel> Copy for ConstraintIntrospector<'_, M> {}

impl<M: OptimizationModel> Debug for ConstraintIntrospector<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstraintIntrospector").finish()
    }
}
