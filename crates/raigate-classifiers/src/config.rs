//! Configuration for the prompt shield and the content-safety gate

use crate::content_safety::HarmCategory;
use raigate_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Highest severity the content-safety service reports at the
/// `FourSeverityLevels` granularity (0, 2, 4, 6)
pub const MAX_SEVERITY: u8 = 6;

/// Phrases the prompt shield blocks when no list is configured
pub const DEFAULT_JAILBREAK_PATTERNS: &[&str] = &[
    "ignore previous instructions",
    "ignore your previous instructions",
    "disregard all rules",
    "forget what you were told",
    "ignore your guidelines",
    "you are now",
    "new instructions:",
    "system:",
    "admin mode",
];

/// Prompt shield configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShieldConfig {
    /// Ordered, case-insensitive phrases that mark a prompt injection
    #[serde(default = "default_patterns")]
    pub patterns: Vec<String>,
}

impl ShieldConfig {
    /// Reject patterns that would match every query
    pub fn validate(&self) -> Result<()> {
        if let Some(idx) = self.patterns.iter().position(|p| p.trim().is_empty()) {
            return Err(Error::config(format!(
                "shield.patterns[{}] is empty; an empty pattern would block every query",
                idx
            )));
        }
        Ok(())
    }
}

impl Default for ShieldConfig {
    fn default() -> Self {
        Self {
            patterns: default_patterns(),
        }
    }
}

/// What a gate does when its collaborator cannot be reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Treat the text as safe (demo default; not a security property)
    #[default]
    Open,
    /// Block the request
    Closed,
}

/// Content-safety gate configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSafetyConfig {
    /// Severity at or above which a category blocks
    #[serde(default = "default_threshold")]
    pub threshold: u8,

    /// Watched categories, checked in this order
    #[serde(default = "default_categories")]
    pub categories: Vec<HarmCategory>,

    /// Behavior on transport or service errors
    #[serde(default)]
    pub on_error: FailurePolicy,
}

impl ContentSafetyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.threshold == 0 || self.threshold > MAX_SEVERITY {
            return Err(Error::config(format!(
                "content_safety.threshold must be between 1 and {}, got {}",
                MAX_SEVERITY, self.threshold
            )));
        }
        Ok(())
    }
}

impl Default for ContentSafetyConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            categories: default_categories(),
            on_error: FailurePolicy::default(),
        }
    }
}

fn default_patterns() -> Vec<String> {
    DEFAULT_JAILBREAK_PATTERNS
        .iter()
        .map(|p| p.to_string())
        .collect()
}

/// "Medium" on the service's severity scale
fn default_threshold() -> u8 {
    2
}

fn default_categories() -> Vec<HarmCategory> {
    HarmCategory::ALL.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ContentSafetyConfig::default();
        assert_eq!(config.threshold, 2);
        assert_eq!(config.categories.len(), 4);
        assert_eq!(config.on_error, FailurePolicy::Open);
        assert!(config.validate().is_ok());

        let shield = ShieldConfig::default();
        assert_eq!(shield.patterns.len(), DEFAULT_JAILBREAK_PATTERNS.len());
        assert!(shield.validate().is_ok());
    }

    #[test]
    fn test_parse_yaml_partial() {
        let yaml = r#"
threshold: 4
on_error: closed
"#;
        let config: ContentSafetyConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.threshold, 4);
        assert_eq!(config.on_error, FailurePolicy::Closed);
        assert_eq!(config.categories, HarmCategory::ALL.to_vec());
    }

    #[test]
    fn test_parse_categories() {
        let yaml = "categories: [violence, self_harm]\n";
        let config: ContentSafetyConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            config.categories,
            vec![HarmCategory::Violence, HarmCategory::SelfHarm]
        );
    }

    #[test]
    fn test_threshold_out_of_range() {
        let config = ContentSafetyConfig {
            threshold: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        // 7 is unreachable at four severity levels
        let config = ContentSafetyConfig {
            threshold: 7,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("between 1 and 6"));

        let config = ContentSafetyConfig {
            threshold: MAX_SEVERITY,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_pattern_rejected() {
        let shield = ShieldConfig {
            patterns: vec!["admin mode".to_string(), "  ".to_string()],
        };
        let err = shield.validate().unwrap_err();
        assert!(err.to_string().contains("shield.patterns[1]"));
    }
}
