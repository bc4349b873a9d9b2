//! Tests for constraint analysis.

use slackscope_config::{AnalyzerConfig, ConfigError};
use slackscope_core::test_utils::{PlanningFixture, SingleVarModel};
use slackscope_core::{ConstraintBounds, Expr, LinearModel};

use crate::analysis::*;

#[test]
fn test_empty_model() {
    let mut model = LinearModel::new();
    model.add_variable("x");

    let analyses = ConstraintAnalyzer::with_defaults(&model).analyze_all_constraints();
    assert_eq!(analyses.len(), 0);
    assert!(analyses.is_empty());
    assert!(!analyses.has_failures());
}

#[test]
fn test_single_constraint() {
    let fixture = SingleVarModel::assigned(ConstraintBounds::at_least(5.0), 7.0);
    let analyses = ConstraintAnalyzer::with_defaults(&fixture.model).analyze_all_constraints();

    assert_eq!(analyses.len(), 1);
    let analysis = &analyses.items[0];
    assert_eq!(analysis.constraint, fixture.c);
    assert_eq!(analysis.body, 7.0);
    assert_eq!(analysis.slack, 2.0);
    assert!(!analysis.binding);
    assert_eq!(analysis.status(), ConstraintStatus::Slack);
}

#[test]
fn test_missing_dual_is_absent() {
    let fixture = SingleVarModel::assigned(ConstraintBounds::at_least(5.0), 7.0);
    let analysis = ConstraintAnalyzer::with_defaults(&fixture.model)
        .analyze_constraint(&fixture.c)
        .unwrap();
    assert_eq!(analysis.dual, None);
}

#[test]
fn test_no_dual_suffix_means_no_duals_anywhere() {
    let fixture = PlanningFixture::new();
    let analyses = ConstraintAnalyzer::with_defaults(&fixture.model).analyze_all_constraints();

    assert_eq!(analyses.len(), 5);
    assert!(analyses.iter().all(|a| a.dual.is_none()));
}

#[test]
fn test_zero_dual_is_kept() {
    let mut fixture = SingleVarModel::assigned(ConstraintBounds::at_least(5.0), 5.0);
    fixture.model.set_dual(&fixture.c, 0.0).unwrap();

    let analysis = ConstraintAnalyzer::with_defaults(&fixture.model)
        .analyze_constraint(&fixture.c)
        .unwrap();
    assert_eq!(analysis.dual, Some(0.0));
}

#[test]
fn test_binding_at_bound() {
    let fixture = SingleVarModel::assigned(ConstraintBounds::at_least(5.0), 5.0);
    let analysis = ConstraintAnalyzer::with_defaults(&fixture.model)
        .analyze_constraint(&fixture.c)
        .unwrap();

    assert_eq!(analysis.slack, 0.0);
    assert!(analysis.binding);
    assert_eq!(analysis.status(), ConstraintStatus::Binding);
    assert_eq!(analysis.is_satisfied(), Some(true));
}

#[test]
fn test_large_slack_not_binding() {
    let fixture = SingleVarModel::assigned(ConstraintBounds::at_least(1.0), 1e10);
    let analysis = ConstraintAnalyzer::with_defaults(&fixture.model)
        .analyze_constraint(&fixture.c)
        .unwrap();
    assert!(!analysis.binding);
}

#[test]
fn test_binding_tolerance_is_configurable() {
    let fixture = SingleVarModel::assigned(ConstraintBounds::at_least(5.0), 5.01);

    let strict = ConstraintAnalyzer::with_defaults(&fixture.model);
    let loose = ConstraintAnalyzer::new(&fixture.model, 0.1).unwrap();

    assert!(!strict.analyze_constraint(&fixture.c).unwrap().binding);
    assert!(loose.analyze_constraint(&fixture.c).unwrap().binding);
}

#[test]
fn test_invalid_binding_tolerance() {
    let model = LinearModel::new();
    assert!(matches!(
        ConstraintAnalyzer::new(&model, -1e-6),
        Err(ConfigError::Invalid(_))
    ));
    assert!(ConstraintAnalyzer::new(&model, f64::NAN).is_err());
    assert!(ConstraintAnalyzer::new(&model, f64::INFINITY).is_err());

    let config = AnalyzerConfig::new().with_binding_tolerance(-0.5);
    assert!(ConstraintAnalyzer::from_config(&model, &config).is_err());
}

#[test]
fn test_undefined_constraint_is_never_binding() {
    let fixture = SingleVarModel::unassigned(ConstraintBounds::at_least(0.0));
    let analysis = ConstraintAnalyzer::with_defaults(&fixture.model)
        .analyze_constraint(&fixture.c)
        .unwrap();

    assert!(analysis.body.is_nan());
    assert!(analysis.slack.is_nan());
    assert!(!analysis.binding);
    assert!(analysis.is_undefined());
    assert_eq!(analysis.is_satisfied(), None);
    assert_eq!(analysis.status(), ConstraintStatus::Undefined);
}

#[test]
fn test_statuses_across_fixture() {
    let fixture = PlanningFixture::new();
    let analyses = ConstraintAnalyzer::with_defaults(&fixture.model).analyze_all_constraints();

    let statuses: Vec<_> = analyses.iter().map(|a| (a.name().to_string(), a.status())).collect();
    assert_eq!(
        statuses,
        vec![
            ("capacity".to_string(), ConstraintStatus::Slack),
            ("balance".to_string(), ConstraintStatus::Binding),
            ("minimum".to_string(), ConstraintStatus::Violated),
            ("window".to_string(), ConstraintStatus::Binding),
            ("pending".to_string(), ConstraintStatus::Undefined),
        ]
    );
}

#[test]
fn test_failure_does_not_abort_batch() {
    let mut model = LinearModel::new();
    let x = model.add_variable("x");
    model.add_constraint("before", Expr::var(x), ConstraintBounds::at_least(0.0));
    let broken = model.add_constraint(
        "broken",
        Expr::malformed("bad node"),
        ConstraintBounds::at_least(0.0),
    );
    model.add_constraint("after", Expr::var(x), ConstraintBounds::at_most(1.0));
    model.set_value(x, 0.5).unwrap();

    let analyses = ConstraintAnalyzer::with_defaults(&model).analyze_all_constraints();
    let names: Vec<_> = analyses.iter().map(|a| a.name()).collect();
    assert_eq!(names, vec!["before", "after"]);
    assert_eq!(analyses.failures.len(), 1);
    assert_eq!(analyses.failures[0].constraint, broken);

    let failure = analyses.clone().into_result().unwrap_err();
    assert!(failure.to_string().contains("broken"));
}

#[test]
fn test_deactivated_constraints_are_skipped() {
    let mut fixture = PlanningFixture::new();
    fixture.model.deactivate(&fixture.pending).unwrap();

    let analyses = ConstraintAnalyzer::with_defaults(&fixture.model).analyze_all_constraints();
    assert_eq!(analyses.len(), 4);
    assert!(analyses.iter().all(|a| !a.is_undefined()));
}

#[test]
fn test_binding_constraints() {
    let fixture = PlanningFixture::new();
    let binding = ConstraintAnalyzer::with_defaults(&fixture.model).binding_constraints();

    let names: Vec<_> = binding.iter().map(|a| a.name()).collect();
    assert_eq!(names, vec!["balance", "window"]);
}

#[test]
fn test_tightest_constraints() {
    let fixture = PlanningFixture::new();
    let tightest = ConstraintAnalyzer::with_defaults(&fixture.model).tightest_constraints(3);

    let names: Vec<_> = tightest.iter().map(|a| a.name()).collect();
    // minimum (-2), then the two binding ones in declaration order.
    assert_eq!(names, vec!["minimum", "balance", "window"]);
}

#[test]
fn test_sensitive_constraints() {
    let mut fixture = PlanningFixture::new();
    fixture.model.set_dual(&fixture.capacity, 0.0).unwrap();
    fixture.model.set_dual(&fixture.balance, -1.5).unwrap();
    fixture.model.set_dual(&fixture.window, 4.0).unwrap();

    let sensitive = ConstraintAnalyzer::with_defaults(&fixture.model).sensitive_constraints();
    let names: Vec<_> = sensitive.iter().map(|a| a.name()).collect();
    assert_eq!(names, vec!["window", "balance"]);
}

#[test]
fn test_analyze_is_idempotent() {
    let fixture = PlanningFixture::new();
    let analyzer = ConstraintAnalyzer::with_defaults(&fixture.model);

    let first = analyzer.analyze_constraint(&fixture.minimum).unwrap();
    let second = analyzer.analyze_constraint(&fixture.minimum).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_reads_current_state_each_call() {
    let mut fixture = SingleVarModel::assigned(ConstraintBounds::at_least(5.0), 7.0);
    let before = ConstraintAnalyzer::with_defaults(&fixture.model)
        .analyze_constraint(&fixture.c)
        .unwrap();

    fixture.model.set_value(fixture.x, 3.0).unwrap();
    let after = ConstraintAnalyzer::with_defaults(&fixture.model)
        .analyze_constraint(&fixture.c)
        .unwrap();

    assert_eq!(before.slack, 2.0);
    assert_eq!(after.slack, -2.0);
}
