//! Tests for diagnostics configuration.

use super::*;

#[test]
fn test_defaults() {
    let config = AnalyzerConfig::default();
    assert_eq!(config.binding_tolerance, 1e-6);
    assert_eq!(config.feasibility_tolerance, 1e-6);

    let labels: Vec<_> = config.severity_levels.labels().collect();
    assert_eq!(labels, vec!["critical", "high", "medium", "low"]);
}

#[test]
fn test_toml_parsing() {
    let toml = r#"
        binding_tolerance = 1e-9
        feasibility_tolerance = 0.001

        [severity_levels]
        low = 0.0
        critical = 1.0
        high = 0.1
        medium = 0.01
    "#;

    let config = AnalyzerConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.binding_tolerance, 1e-9);
    assert_eq!(config.feasibility_tolerance, 0.001);
    assert_eq!(config.severity_levels, SeverityLevels::default());
}

#[test]
fn test_toml_partial_uses_defaults() {
    let config = AnalyzerConfig::from_toml_str("feasibility_tolerance = 0.5").unwrap();
    assert_eq!(config.binding_tolerance, DEFAULT_BINDING_TOLERANCE);
    assert_eq!(config.feasibility_tolerance, 0.5);
    assert_eq!(config.severity_levels, SeverityLevels::default());
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        binding_tolerance: 0.0001
        severity_levels:
          severe: 5.0
          minor: 0.0
    "#;

    let config = AnalyzerConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.binding_tolerance, 0.0001);
    assert_eq!(config.severity_levels.classify(7.0), "severe");
    assert_eq!(config.severity_levels.classify(4.0), "minor");
}

#[test]
fn test_negative_tolerance_rejected() {
    let err = AnalyzerConfig::from_toml_str("binding_tolerance = -1.0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(err.to_string().contains("binding_tolerance"));

    let err = AnalyzerConfig::new()
        .with_feasibility_tolerance(-1e-6)
        .validate()
        .unwrap_err();
    assert!(err.to_string().contains("feasibility_tolerance"));
}

#[test]
fn test_non_finite_tolerance_rejected() {
    assert!(validate_tolerance("tolerance", f64::NAN).is_err());
    assert!(validate_tolerance("tolerance", f64::INFINITY).is_err());
    assert_eq!(validate_tolerance("tolerance", 0.0).unwrap(), 0.0);
}

#[test]
fn test_non_numeric_threshold_rejected() {
    let toml = r#"
        [severity_levels]
        critical = "very"
        low = 0.0
    "#;
    let err = AnalyzerConfig::from_toml_str(toml).unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn test_empty_severity_table_rejected() {
    let err = AnalyzerConfig::from_toml_str("[severity_levels]").unwrap_err();
    assert!(err.to_string().contains("at least one level"));

    let empty: Vec<(&str, f64)> = Vec::new();
    assert!(SeverityLevels::new(empty).is_err());
}

#[test]
fn test_amount_below_every_threshold_falls_to_lowest() {
    let levels = SeverityLevels::new([("critical", 1.0), ("minor", 0.001)]).unwrap();

    assert_eq!(levels.lowest_label(), "minor");
    assert_eq!(levels.classify(0.0005), "minor");
    assert_eq!(levels.classify(0.001), "minor");
    assert_eq!(levels.classify(2.0), "critical");
}

#[test]
fn test_invalid_thresholds_rejected() {
    assert!(SeverityLevels::new([("bad", f64::NAN), ("low", 0.0)]).is_err());
    assert!(SeverityLevels::new([("bad", -0.5), ("low", 0.0)]).is_err());
    assert!(SeverityLevels::new([("bad", f64::INFINITY), ("low", 0.0)]).is_err());
}

#[test]
fn test_duplicate_labels_and_thresholds_rejected() {
    assert!(SeverityLevels::new([("a", 1.0), ("b", 1.0), ("c", 0.0)]).is_err());
    assert!(SeverityLevels::new([("a", 1.0), ("a", 0.5), ("c", 0.0)]).is_err());
    assert!(SeverityLevels::new([("", 1.0), ("c", 0.0)]).is_err());
}

#[test]
fn test_classification_boundaries() {
    let levels = SeverityLevels::new([
        ("critical", 1.0),
        ("high", 0.1),
        ("medium", 0.01),
        ("low", 0.0),
    ])
    .unwrap();

    assert_eq!(levels.classify(10.0), "critical");
    assert_eq!(levels.classify(1.0), "critical");
    assert_eq!(levels.classify(0.5), "high");
    assert_eq!(levels.classify(0.05), "medium");
    assert_eq!(levels.classify(0.01), "medium");
    assert_eq!(levels.classify(1e-5), "low");
    assert_eq!(levels.threshold("high"), Some(0.1));
    assert_eq!(levels.threshold("unknown"), None);
}

#[test]
fn test_single_level_table() {
    let levels = SeverityLevels::new([("violation", 0.0)]).unwrap();
    assert_eq!(levels.len(), 1);
    assert_eq!(levels.classify(1e6), "violation");
    assert_eq!(levels.lowest_label(), "violation");
}

#[test]
fn test_builder() {
    let levels = SeverityLevels::new([("hard", 1.0), ("soft", 0.0)]).unwrap();
    let config = AnalyzerConfig::new()
        .with_binding_tolerance(1e-4)
        .with_feasibility_tolerance(1e-3)
        .with_severity_levels(levels.clone())
        .validate()
        .unwrap();

    assert_eq!(config.binding_tolerance, 1e-4);
    assert_eq!(config.feasibility_tolerance, 1e-3);
    assert_eq!(config.severity_levels, levels);
}

#[test]
fn test_unknown_field_rejected() {
    assert!(AnalyzerConfig::from_toml_str("tolerance = 1.0").is_err());
}

#[test]
fn test_round_trip_toml() {
    let config = AnalyzerConfig::new().with_binding_tolerance(0.25);
    let text = toml::to_string(&config).unwrap();
    assert_eq!(AnalyzerConfig::from_toml_str(&text).unwrap(), config);
}
