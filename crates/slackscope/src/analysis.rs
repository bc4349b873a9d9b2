//! Per-constraint tightness analysis.
//!
//! A [`ConstraintAnalysis`] is the structured record for one constraint:
//! body value, bounds, slack, binding flag and dual value. The
//! [`ConstraintAnalyzer`] produces them one at a time or for the whole model.

use std::fmt::{self, Debug};

use slackscope_config::{validate_tolerance, AnalyzerConfig, ConfigError, DEFAULT_BINDING_TOLERANCE};
use slackscope_core::{ConstraintBounds, ConstraintRef, ModelError, OptimizationModel};
use tracing::{trace, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::batch::Batch;
use crate::introspection::ConstraintIntrospector;

/// Classification of a constraint at the current assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConstraintStatus {
    /// Slack is within the binding tolerance of zero.
    Binding,
    /// Satisfied with room to spare.
    Slack,
    /// Slack is negative beyond the binding tolerance.
    Violated,
    /// The body could not be evaluated (unassigned variables).
    Undefined,
}

/// Analysis of a single constraint.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConstraintAnalysis {
    /// Constraint reference.
    pub constraint: ConstraintRef,
    /// Body value; NaN when undefined.
    pub body: f64,
    /// Lower and upper bounds.
    pub bounds: ConstraintBounds,
    /// Signed slack; NaN when undefined.
    pub slack: f64,
    /// Whether `|slack| <= binding_tolerance`.
    pub binding: bool,
    /// Dual value, if the model stores one for this constraint.
    pub dual: Option<f64>,
}

impl ConstraintAnalysis {
    /// Returns the constraint name.
    pub fn name(&self) -> &str {
        &self.constraint.name
    }

    /// Returns true if the body evaluated to NaN.
    pub fn is_undefined(&self) -> bool {
        self.slack.is_nan()
    }

    /// `Some(slack >= 0)`, or `None` when undefined.
    pub fn is_satisfied(&self) -> Option<bool> {
        if self.is_undefined() {
            None
        } else {
            Some(self.slack >= 0.0)
        }
    }

    pub fn status(&self) -> ConstraintStatus {
        if self.is_undefined() {
            ConstraintStatus::Undefined
        } else if self.binding {
            ConstraintStatus::Binding
        } else if self.slack < 0.0 {
            ConstraintStatus::Violated
        } else {
            ConstraintStatus::Slack
        }
    }
}

/// Produces [`ConstraintAnalysis`] records for a model.
pub struct ConstraintAnalyzer<'m, M: OptimizationModel> {
    introspector: ConstraintIntrospector<'m, M>,
    binding_tolerance: f64,
}

impl<'m, M: OptimizationModel> ConstraintAnalyzer<'m, M> {
    /// Creates an analyzer with the given binding tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the tolerance is negative or not
    /// finite.
    pub fn new(model: &'m M, binding_tolerance: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            introspector: ConstraintIntrospector::new(model),
            binding_tolerance: validate_tolerance("binding_tolerance", binding_tolerance)?,
        })
    }

    /// Creates an analyzer with the default binding tolerance (`1e-6`).
    pub fn with_defaults(model: &'m M) -> Self {
        Self {
            introspector: ConstraintIntrospector::new(model),
            binding_tolerance: DEFAULT_BINDING_TOLERANCE,
        }
    }

    /// Creates an analyzer from a configuration.
    pub fn from_config(model: &'m M, config: &AnalyzerConfig) -> Result<Self, ConfigError> {
        Self::new(model, config.binding_tolerance)
    }

    pub(crate) fn from_validated(model: &'m M, config: &AnalyzerConfig) -> Self {
        Self {
            introspector: ConstraintIntrospector::new(model),
            binding_tolerance: config.binding_tolerance,
        }
    }

    pub fn binding_tolerance(&self) -> f64 {
        self.binding_tolerance
    }

    pub fn introspector(&self) -> &ConstraintIntrospector<'m, M> {
        &self.introspector
    }

    /// Analyzes one constraint.
    ///
    /// # Errors
    ///
    /// Propagates the model's error when the constraint cannot be evaluated.
    pub fn analyze_constraint(
        &self,
        constraint: &ConstraintRef,
    ) -> Result<ConstraintAnalysis, ModelError> {
        let eval = self.introspector.evaluate(constraint)?;
        let analysis = ConstraintAnalysis {
            constraint: constraint.clone(),
            body: eval.body,
            bounds: eval.bounds,
            slack: eval.slack,
            binding: eval.slack.abs() <= self.binding_tolerance,
            dual: self.introspector.model().dual(constraint),
        };
        trace!(
            constraint = %constraint,
            body = analysis.body,
            slack = analysis.slack,
            binding = analysis.binding,
            "analyzed constraint"
        );
        Ok(analysis)
    }

    /// Analyzes every active constraint in declaration order.
    ///
    /// Constraints that fail to evaluate are collected in
    /// [`Batch::failures`]; the rest are still analyzed.
    pub fn analyze_all_constraints(&self) -> Batch<ConstraintAnalysis> {
        let mut batch = Batch::new();
        for constraint in self.introspector.model().active_constraints() {
            match self.analyze_constraint(&constraint) {
                Ok(analysis) => batch.push(analysis),
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

    /// Analyses of the binding (limiting) constraints, in declaration order.
    pub fn binding_constraints(&self) -> Vec<ConstraintAnalysis> {
        self.analyze_all_constraints()
            .into_iter()
            .filter(|a| a.binding)
            .collect()
    }

    /// The `n` defined analyses with the smallest slack, ascending.
    ///
    /// Ties keep declaration order.
    pub fn tightest_constraints(&self, n: usize) -> Vec<ConstraintAnalysis> {
        let mut analyses: Vec<_> = self
            .analyze_all_constraints()
            .into_iter()
            .filter(|a| !a.is_undefined())
            .collect();
        analyses.sort_by(|a, b| a.slack.total_cmp(&b.slack));
        analyses.truncate(n);
        analyses
    }

    /// Analyses whose dual magnitude exceeds the binding tolerance, ordered
    /// by decreasing `|dual|`.
    pub fn sensitive_constraints(&self) -> Vec<ConstraintAnalysis> {
        let mut analyses: Vec<_> = self
            .analyze_all_constraints()
            .into_iter()
            .filter(|a| a.dual.is_some_and(|d| d.abs() > self.binding_tolerance))
            .collect();
        analyses.sort_by(|a, b| {
            let da = a.dual.map_or(0.0, f64::abs);
            let db = b.dual.map_or(0.0, f64::abs);
            db.total_cmp(&da)
        });
        analyses
    }
}

impl<M: OptimizationModel> Debug for ConstraintAnalyzer<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstraintAnalyzer")
            .field("binding_tolerance", &self.binding_tolerance)
            .finish()
    }
}
