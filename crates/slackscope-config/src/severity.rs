//! Severity thresholds for violation amounts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A label and the minimum violation amount it applies to.
#[derive(Debug, Clone, PartialEq)]
pub struct SeverityLevel {
    pub label: String,
    pub threshold: f64,
}

/// Ordered severity table.
///
/// Levels are kept sorted by threshold, highest first. A violation amount is
/// labeled by the first level whose threshold it meets or exceeds; amounts
/// below every threshold fall to the lowest level.
///
/// # Example
///
/// ```
/// use slackscope_config::SeverityLevels;
///
/// let levels = SeverityLevels::default();
/// assert_eq!(levels.classify(10.0), "critical");
/// assert_eq!(levels.classify(0.05), "medium");
/// assert_eq!(levels.lowest_label(), "low");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct SeverityLevels {
    levels: Vec<SeverityLevel>,
}

impl SeverityLevels {
    /// Builds a validated table from `(label, threshold)` pairs in any order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the table is empty, a label is
    /// blank or repeated, a threshold is negative or non-finite, or two labels
    /// share a threshold.
    pub fn new<L, I>(levels: I) -> Result<Self, ConfigError>
    where
        L: Into<String>,
        I: IntoIterator<Item = (L, f64)>,
    {
        let mut levels: Vec<SeverityLevel> = levels
            .into_iter()
            .map(|(label, threshold)| SeverityLevel {
                label: label.into(),
                threshold,
            })
            .collect();

        if levels.is_empty() {
            return Err(ConfigError::Invalid(
                "severity_levels must define at least one level".to_string(),
            ));
        }

        for level in &levels {
            if level.label.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "severity_levels labels must not be empty".to_string(),
                ));
            }
            if !level.threshold.is_finite() || level.threshold < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "severity level `{}` has invalid threshold {}",
                    level.label, level.threshold
                )));
            }
        }

        levels.sort_by(|a, b| b.threshold.total_cmp(&a.threshold));

        for pair in levels.windows(2) {
            if pair[0].threshold == pair[1].threshold {
                return Err(ConfigError::Invalid(format!(
                    "severity levels `{}` and `{}` share threshold {}",
                    pair[0].label, pair[1].label, pair[0].threshold
                )));
            }
        }
        for (idx, level) in levels.iter().enumerate() {
            if levels[..idx].iter().any(|l| l.label == level.label) {
                return Err(ConfigError::Invalid(format!(
                    "severity level `{}` is defined twice",
                    level.label
                )));
            }
        }

        Ok(Self { levels })
    }

    /// Returns the label for a violation amount.
    pub fn classify(&self, amount: f64) -> &str {
        self.levels
            .iter()
            .find(|level| amount >= level.threshold)
            .map_or_else(|| self.lowest_label(), |level| level.label.as_str())
    }

    /// Levels ordered from highest threshold to lowest.
    pub fn levels(&self) -> &[SeverityLevel] {
        &self.levels
    }

    /// Labels ordered from highest threshold to lowest.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.levels.iter().map(|level| level.label.as_str())
    }

    /// The fallback label.
    pub fn lowest_label(&self) -> &str {
        self.levels
            .last()
            .map(|level| level.label.as_str())
            .unwrap_or_default()
    }

    /// Returns the threshold for `label`, if defined.
    pub fn threshold(&self, label: &str) -> Option<f64> {
        self.levels
            .iter()
            .find(|level| level.label == label)
            .map(|level| level.threshold)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl Default for SeverityLevels {
    fn default() -> Self {
        Self {
            levels: vec![
                SeverityLevel {
                    label: "critical".to_string(),
                    threshold: 1.0,
                },
                SeverityLevel {
                    label: "high".to_string(),
                    threshold: 0.1,
                },
                SeverityLevel {
                    label: "medium".to_string(),
                    threshold: 0.01,
                },
                SeverityLevel {
                    label: "low".to_string(),
                    threshold: 0.0,
                },
            ],
        }
    }
}

impl TryFrom<BTreeMap<String, f64>> for SeverityLevels {
    type Error = ConfigError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        Self::new(map)
    }
}

impl From<SeverityLevels> for BTreeMap<String, f64> {
    fn from(levels: SeverityLevels) -> Self {
        levels
            .levels
            .into_iter()
            .map(|level| (level.label, level.threshold))
            .collect()
    }
}
