//! Constraint diagnostics for solved optimization models.
//!
//! This crate evaluates every constraint of a model at its current variable
//! assignment and reports:
//! - Slack and binding status per constraint (`ConstraintAnalyzer`)
//! - Violations beyond a tolerance, labeled by severity (`UnfeasibilityDetector`)
//! - A combined report with summary counts (`SolverDiagnostics`)
//!
//! # Architecture
//!
//! Data flows one way: model → `ConstraintIntrospector` → analyzer/detector →
//! diagnostics. Nothing here mutates the model or caches its state; every
//! call re-reads it. Unassigned variables surface as NaN, never as errors.

pub mod analysis;
pub mod batch;
pub mod diagnostics;
pub mod introspection;
pub mod unfeasibility;

#[cfg(test)]
mod analysis_tests;

pub use analysis::{ConstraintAnalysis, ConstraintAnalyzer, ConstraintStatus};
pub use batch::{Batch, ConstraintFailure};
pub use diagnostics::{DiagnosticsReport, SolverDiagnostics, Summary};
pub use introspection::{slack, ConstraintIntrospector, Evaluation};
pub use unfeasibility::{UnfeasibilityDetector, Violation};

pub use slackscope_config::{AnalyzerConfig, ConfigError, SeverityLevels};
