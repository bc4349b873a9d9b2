//! Whole-model diagnostics.

use std::time::Instant;

use slackscope_config::{AnalyzerConfig, ConfigError};
use slackscope_core::OptimizationModel;
use tracing::info;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::analysis::{ConstraintAnalysis, ConstraintAnalyzer};
use crate::batch::ConstraintFailure;
use crate::unfeasibility::{UnfeasibilityDetector, Violation};

/// Summary counts of a diagnostics run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Summary {
    /// Active constraints, including those that failed to evaluate.
    pub total_constraints: usize,
    pub binding_count: usize,
    pub violation_count: usize,
    /// Constraints whose body is undefined (unassigned variables).
    pub undefined_count: usize,
    /// Constraints the model failed to evaluate.
    pub failure_count: usize,
}

/// Combined result of [`SolverDiagnostics::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticsReport {
    /// One analysis per evaluable active constraint, in declaration order.
    pub analyses: Vec<ConstraintAnalysis>,
    /// Violations in declaration order.
    pub violations: Vec<Violation>,
    /// Constraints the model failed to evaluate.
    pub failures: Vec<ConstraintFailure>,
    pub summary: Summary,
}

impl DiagnosticsReport {
    /// True when nothing is violated, undefined or failed.
    pub fn is_feasible(&self) -> bool {
        self.summary.violation_count == 0
            && self.summary.undefined_count == 0
            && self.summary.failure_count == 0
    }

    /// The `n` largest violations, by amount descending.
    pub fn worst_violations(&self, n: usize) -> Vec<&Violation> {
        let mut violations: Vec<_> = self.violations.iter().collect();
        violations.sort_by(|a, b| b.violation_amount.total_cmp(&a.violation_amount));
        violations.truncate(n);
        violations
    }

    pub fn binding_constraints(&self) -> Vec<&ConstraintAnalysis> {
        self.analyses.iter().filter(|a| a.binding).collect()
    }

    pub fn undefined_constraints(&self) -> Vec<&ConstraintAnalysis> {
        self.analyses.iter().filter(|a| a.is_undefined()).collect()
    }

    pub fn violations_with_severity(&self, label: &str) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity == label)
            .collect()
    }
}

/// Runs the analyzer and the detector over a model.
///
/// # Example
///
/// ```
/// use slackscope::SolverDiagnostics;
/// use slackscope_core::{ConstraintBounds, Expr, LinearModel};
///
/// let mut model = LinearModel::new();
/// let x = model.add_variable("x");
/// model.add_constraint("min_x", Expr::var(x), ConstraintBounds::at_least(10.0));
/// model.set_value(x, 0.0).unwrap();
///
/// let report = SolverDiagnostics::default().run(&model);
/// assert_eq!(report.summary.total_constraints, 1);
/// assert_eq!(report.summary.violation_count, 1);
/// assert_eq!(report.violations[0].severity, "critical");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SolverDiagnostics {
    config: AnalyzerConfig,
}

impl SolverDiagnostics {
    /// Creates diagnostics with a validated configuration.
    pub fn new(config: AnalyzerConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            config: config.validate()?,
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyzes every active constraint and collects violations.
    ///
    /// Failures from both passes are merged, one entry per constraint, with
    /// the analysis pass first.
    pub fn run<M: OptimizationModel>(&self, model: &M) -> DiagnosticsReport {
        let start = Instant::now();
        let constraint_count = model.active_constraints().len();
        info!(
            event = "diagnostics_start",
            constraint_count = constraint_count as u64,
        );

        let analyzer = ConstraintAnalyzer::from_validated(model, &self.config);
        let detector = UnfeasibilityDetector::from_validated(model, &self.config);

        let analyses = analyzer.analyze_all_constraints();
        let violations = detector.find_infeasible_constraints();

        let mut failures = analyses.failures;
        for failure in violations.failures {
            if !failures.iter().any(|f| f.constraint == failure.constraint) {
                failures.push(failure);
            }
        }
        let analyses = analyses.items;

        let summary = Summary {
            total_constraints: constraint_count,
            binding_count: analyses.iter().filter(|a| a.binding).count(),
            violation_count: violations.items.len(),
            undefined_count: analyses.iter().filter(|a| a.is_undefined()).count(),
            failure_count: failures.len(),
        };

        info!(
            event = "diagnostics_end",
            constraint_count = summary.total_constraints as u64,
            binding_count = summary.binding_count as u64,
            violation_count = summary.violation_count as u64,
            undefined_count = summary.undefined_count as u64,
            failure_count = summary.failure_count as u64,
            duration_ms = start.elapsed().as_millis() as u64,
        );

        DiagnosticsReport {
            analyses,
            violations: violations.items,
            failures,
            summary,
        }
    }
}
