//! Feasibility checking and severity ranking.

use std::fmt::{self, Debug};

use slackscope_config::{
    validate_tolerance, AnalyzerConfig, ConfigError, SeverityLevels, DEFAULT_FEASIBILITY_TOLERANCE,
};
use slackscope_core::{ConstraintRef, ModelError, OptimizationModel};
use tracing::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::batch::Batch;
use crate::introspection::ConstraintIntrospector;

/// A constraint violated beyond the feasibility tolerance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Violation {
    /// Constraint reference.
    pub constraint: ConstraintRef,
    /// `-slack`; always positive.
    pub violation_amount: f64,
    /// Label from the severity table.
    pub severity: String,
}

impl Violation {
    /// Returns the constraint name.
    pub fn name(&self) -> &str {
        &self.constraint.name
    }
}

/// Detects violated constraints and labels them by severity.
pub struct UnfeasibilityDetector<'m, M: OptimizationModel> {
    introspector: ConstraintIntrospector<'m, M>,
    tolerance: f64,
    severity_levels: SeverityLevels,
}

impl<'m, M: OptimizationModel> UnfeasibilityDetector<'m, M> {
    /// Creates a detector.
    ///
    /// `severity_levels` replaces the default table entirely when given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the tolerance is negative or not
    /// finite.
    pub fn new(
        model: &'m M,
        tolerance: f64,
        severity_levels: Option<SeverityLevels>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            introspector: ConstraintIntrospector::new(model),
            tolerance: validate_tolerance("feasibility_tolerance", tolerance)?,
            severity_levels: severity_levels.unwrap_or_default(),
        })
    }

    /// Creates a detector with tolerance `1e-6` and the default table.
    pub fn with_defaults(model: &'m M) -> Self {
        Self {
            introspector: ConstraintIntrospector::new(model),
            tolerance: DEFAULT_FEASIBILITY_TOLERANCE,
            severity_levels: SeverityLevels::default(),
        }
    }

    /// Creates a detector from a configuration.
    pub fn from_config(model: &'m M, config: &AnalyzerConfig) -> Result<Self, ConfigError> {
        Self::new(
            model,
            config.feasibility_tolerance,
            Some(config.severity_levels.clone()),
        )
    }

    pub(crate) fn from_validated(model: &'m M, config: &AnalyzerConfig) -> Self {
        Self {
            introspector: ConstraintIntrospector::new(model),
            tolerance: config.feasibility_tolerance,
            severity_levels: config.severity_levels.clone(),
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn severity_levels(&self) -> &SeverityLevels {
        &self.severity_levels
    }

    /// Checks one constraint.
    ///
    /// Returns `Ok(None)` when the constraint is satisfied, violated by no
    /// more than the tolerance, or undefined.
    ///
    /// # Errors
    ///
    /// Propagates the model's error when the constraint cannot be evaluated.
    pub fn check_constraint_feasibility(
        &self,
        constraint: &ConstraintRef,
    ) -> Result<Option<Violation>, ModelError> {
        let slack = self.introspector.compute_slack(constraint)?;
        if slack.is_nan() || slack >= -self.tolerance {
            return Ok(None);
        }

        let violation_amount = -slack;
        let severity = self.severity_levels.classify(violation_amount).to_string();
        debug!(
            event = "constraint_violated",
            constraint = %constraint,
            amount = violation_amount,
            severity = %severity,
        );
        Ok(Some(Violation {
            constraint: constraint.clone(),
            violation_amount,
            severity,
        }))
    }

    /// Checks every active constraint, in declaration order.
    ///
    /// The result is not sorted by severity.
    pub fn find_infeasible_constraints(&self) -> Batch<Violation> {
        let mut batch = Batch::new();
        for constraint in self.introspector.model().active_constraints() {
            match self.check_constraint_feasibility(&constraint) {
                Ok(Some(violation)) => batch.push(violation),
                Ok(None) => {}
                Err(error) => {
                    warn!(
                        event = "constraint_failed",
                        constraint = %constraint,
                        error = %error,
                    );
                    batch.fail(constraint, error);
                }
            }
        }
        batch
    }

    /// Violations grouped by severity label, highest level first.
    ///
    /// Every level of the table is present, possibly with no violations.
    pub fn violations_by_severity(&self) -> Vec<(String, Vec<Violation>)> {
        let mut groups: Vec<(String, Vec<Violation>)> = self
            .severity_levels
            .labels()
            .map(|label| (label.to_string(), Vec::new()))
            .collect();
        for violation in self.find_infeasible_constraints() {
            if let Some((_, group)) = groups
                .iter_mut()
                .find(|(label, _)| *label == violation.severity)
            {
                group.push(violation);
            }
        }
        groups
    }
}

impl<M: OptimizationModel> Debug for UnfeasibilityDetector<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnfeasibilityDetector")
            .field("tolerance", &self.tolerance)
            .field("severity_levels", &self.severity_levels)
            .finish()
    }
}
