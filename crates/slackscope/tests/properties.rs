//! Property tests for slack, binding and violation classification.

use proptest::prelude::*;
use slackscope::{ConstraintAnalyzer, ConstraintIntrospector, UnfeasibilityDetector};
use slackscope_core::{Bound, ConstraintBounds, ConstraintRef, Expr, LinearModel, VarId};

fn bound_strategy() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![Just(None), (-1e6..1e6f64).prop_map(Some)]
}

fn model_with(bounds: ConstraintBounds, coefs: &[f64], values: &[Option<f64>]) -> (LinearModel, ConstraintRef) {
    let mut model = LinearModel::new();
    let vars: Vec<VarId> = (0..coefs.len())
        .map(|i| model.add_variable(format!("x{i}")))
        .collect();
    let body = Expr::linear(coefs.iter().copied().zip(vars.iter().copied()), 0.0);
    let c = model.add_constraint("c", body, bounds);
    for (var, value) in vars.iter().zip(values) {
        if let Some(v) = value {
            model.set_value(*var, *v).unwrap();
        }
    }
    (model, c)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn slack_sign_matches_feasibility(
        lower in bound_strategy(),
        upper in bound_strategy(),
        x in -1e6..1e6f64,
    ) {
        prop_assume!(lower.is_some() || upper.is_some());
        let bounds = ConstraintBounds::new(Bound::from(lower), Bound::from(upper));
        let (model, c) = model_with(bounds, &[1.0], &[Some(x)]);

        let slack = ConstraintIntrospector::new(&model).compute_slack(&c).unwrap();
        let satisfied = lower.map_or(true, |l| x >= l) && upper.map_or(true, |u| x <= u);

        prop_assert!(slack.is_finite());
        prop_assert_eq!(slack >= 0.0, satisfied);
    }

    #[test]
    fn unassigned_variable_yields_nan(
        coefs in prop::collection::vec(-10.0..10.0f64, 1..6),
        missing in 0usize..6,
        rhs in -100.0..100.0f64,
    ) {
        let missing = missing % coefs.len();
        let values: Vec<Option<f64>> = (0..coefs.len())
            .map(|i| if i == missing { None } else { Some(1.0) })
            .collect();
        let (model, c) = model_with(ConstraintBounds::at_most(rhs), &coefs, &values);
        let introspector = ConstraintIntrospector::new(&model);

        prop_assert!(introspector.constraint_body_value(&c).unwrap().is_nan());
        prop_assert!(introspector.compute_slack(&c).unwrap().is_nan());
    }

    #[test]
    fn violation_iff_slack_below_tolerance(
        lower in -100.0..100.0f64,
        x in -100.0..100.0f64,
        tolerance in 0.0..1.0f64,
    ) {
        let (model, c) = model_with(ConstraintBounds::at_least(lower), &[1.0], &[Some(x)]);
        let slack = ConstraintIntrospector::new(&model).compute_slack(&c).unwrap();
        let detector = UnfeasibilityDetector::new(&model, tolerance, None).unwrap();

        match detector.check_constraint_feasibility(&c).unwrap() {
            Some(violation) => {
                prop_assert!(slack < -tolerance);
                prop_assert_eq!(violation.violation_amount, -slack);
                prop_assert!(violation.violation_amount > 0.0);
            }
            None => prop_assert!(slack >= -tolerance),
        }
    }

    #[test]
    fn analysis_is_idempotent(
        lower in -50.0..50.0f64,
        width in 0.0..50.0f64,
        x in -100.0..100.0f64,
        y in -100.0..100.0f64,
    ) {
        let bounds = ConstraintBounds::between(lower, lower + width);
        let (model, c) = model_with(bounds, &[1.0, -2.0], &[Some(x), Some(y)]);
        let analyzer = ConstraintAnalyzer::with_defaults(&model);
        let detector = UnfeasibilityDetector::with_defaults(&model);

        prop_assert_eq!(
            analyzer.analyze_constraint(&c).unwrap(),
            analyzer.analyze_constraint(&c).unwrap()
        );
        prop_assert_eq!(
            detector.check_constraint_feasibility(&c).unwrap(),
            detector.check_constraint_feasibility(&c).unwrap()
        );
    }
}
