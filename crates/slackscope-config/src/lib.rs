//! Configuration system for SlackScope.
//!
//! Tolerances and the severity table are immutable values handed to the
//! analyzers at construction time. They can be built in code or loaded from
//! TOML/YAML; every loader validates before returning.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use slackscope_config::AnalyzerConfig;
//!
//! let config = AnalyzerConfig::from_toml_str(r#"
//!     binding_tolerance = 1e-8
//!     feasibility_tolerance = 1e-5
//!
//!     [severity_levels]
//!     fatal = 10.0
//!     warn = 0.0
//! "#).unwrap();
//!
//! assert_eq!(config.binding_tolerance, 1e-8);
//! assert_eq!(config.severity_levels.classify(25.0), "fatal");
//! assert_eq!(config.severity_levels.classify(0.5), "warn");
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use slackscope_config::AnalyzerConfig;
//!
//! let config = AnalyzerConfig::load("slackscope.toml").unwrap_or_default();
//! assert_eq!(config.feasibility_tolerance, 1e-6);
//! ```

mod severity;

#[cfg(test)]
mod tests;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use severity::{SeverityLevel, SeverityLevels};

/// Default tolerance for the binding flag.
pub const DEFAULT_BINDING_TOLERANCE: f64 = 1e-6;

/// Default tolerance below zero slack that is treated as numerical noise.
pub const DEFAULT_FEASIBILITY_TOLERANCE: f64 = 1e-6;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Checks that a tolerance is finite and non-negative.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] naming `field` otherwise.
pub fn validate_tolerance(field: &str, value: f64) -> Result<f64, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::Invalid(format!(
            "{field} must be finite, got {value}"
        )));
    }
    if value < 0.0 {
        return Err(ConfigError::Invalid(format!(
            "{field} must be non-negative, got {value}"
        )));
    }
    Ok(value)
}

/// Diagnostics configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "snake_case")]
pub struct AnalyzerConfig {
    /// A constraint is binding when `|slack| <= binding_tolerance`.
    pub binding_tolerance: f64,

    /// A constraint is violated when `slack < -feasibility_tolerance`.
    pub feasibility_tolerance: f64,

    /// Labels assigned to violation amounts.
    pub severity_levels: SeverityLevels,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            binding_tolerance: DEFAULT_BINDING_TOLERANCE,
            feasibility_tolerance: DEFAULT_FEASIBILITY_TOLERANCE,
            severity_levels: SeverityLevels::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or fails
    /// validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()
    }

    /// Sets the binding tolerance.
    pub fn with_binding_tolerance(mut self, tolerance: f64) -> Self {
        self.binding_tolerance = tolerance;
        self
    }

    /// Sets the feasibility tolerance.
    pub fn with_feasibility_tolerance(mut self, tolerance: f64) -> Self {
        self.feasibility_tolerance = tolerance;
        self
    }

    /// Replaces the severity table.
    pub fn with_severity_levels(mut self, levels: SeverityLevels) -> Self {
        self.severity_levels = levels;
        self
    }

    /// Validates the tolerances.
    ///
    /// The severity table is validated when it is built, so a
    /// `SeverityLevels` value is always well formed.
    pub fn validate(self) -> Result<Self, ConfigError> {
        validate_tolerance("binding_tolerance", self.binding_tolerance)?;
        validate_tolerance("feasibility_tolerance", self.feasibility_tolerance)?;
        Ok(self)
    }
}
