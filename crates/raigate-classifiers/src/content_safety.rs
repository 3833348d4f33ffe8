//! Content Safety classifier
//!
//! Delegates multi-category severity scoring to a hosted content-safety
//! service (see [`crate::azure::AzureContentSafetyClient`]) and turns the
//! scores into a verdict by comparing each watched category against a
//! threshold. The same instance gates both the user query and the generated
//! answer.
//!
//! Service failures follow the configured [`FailurePolicy`]. The default is
//! fail-open, which is a demo posture: an unreachable service lets every
//! request through.

use crate::classifier::Classifier;
use crate::config::{ContentSafetyConfig, FailurePolicy};
use async_trait::async_trait;
use raigate_core::{Result, SafetyVerdict};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Reason used when the service is unreachable and the policy is fail-closed
pub const SERVICE_UNAVAILABLE_REASON: &str = "Content Safety unavailable";

/// Harm categories scored by the content-safety service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmCategory {
    Hate,
    Sexual,
    Violence,
    SelfHarm,
}

impl HarmCategory {
    /// All categories, in the order they are checked by default
    pub const ALL: [HarmCategory; 4] = [
        HarmCategory::Hate,
        HarmCategory::Sexual,
        HarmCategory::Violence,
        HarmCategory::SelfHarm,
    ];

    /// Label used in block reasons and config files
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hate => "hate",
            Self::Sexual => "sexual",
            Self::Violence => "violence",
            Self::SelfHarm => "self_harm",
        }
    }

    /// Name used on the wire by the hosted service
    pub fn service_name(&self) -> &'static str {
        match self {
            Self::Hate => "Hate",
            Self::Sexual => "Sexual",
            Self::Violence => "Violence",
            Self::SelfHarm => "SelfHarm",
        }
    }

    pub fn from_service_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.service_name() == name)
    }
}

/// Per-category severities returned by the service
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryScores {
    scores: Vec<(HarmCategory, u8)>,
}

impl CategoryScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, replacing any earlier score for the category
    pub fn with(mut self, category: HarmCategory, severity: u8) -> Self {
        self.set(category, severity);
        self
    }

    pub fn set(&mut self, category: HarmCategory, severity: u8) {
        match self.scores.iter_mut().find(|(c, _)| *c == category) {
            Some(entry) => entry.1 = severity,
            None => self.scores.push((category, severity)),
        }
    }

    /// Severity for a category; categories the service omitted score 0
    pub fn severity(&self, category: HarmCategory) -> u8 {
        self.scores
            .iter()
            .find(|(c, _)| *c == category)
            .map_or(0, |(_, s)| *s)
    }
}

/// A hosted text-moderation service
#[async_trait]
pub trait ModerationBackend: Send + Sync {
    /// Score the text on every supported category
    async fn analyze(&self, text: &str) -> Result<CategoryScores>;

    /// Backend name for logs
    fn name(&self) -> &str;
}

/// Threshold-based content-safety gate
pub struct ContentSafetyClassifier {
    name: String,
    backend: Arc<dyn ModerationBackend>,
    config: ContentSafetyConfig,
}

impl ContentSafetyClassifier {
    /// Create a classifier backed by a moderation service
    pub fn new(backend: Arc<dyn ModerationBackend>, config: ContentSafetyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            name: "content-safety".to_string(),
            backend,
            config,
        })
    }

    pub fn config(&self) -> &ContentSafetyConfig {
        &self.config
    }

    /// Apply the threshold to a set of scores
    pub fn evaluate(&self, scores: &CategoryScores) -> SafetyVerdict {
        for category in &self.config.categories {
            let severity = scores.severity(*category);
            if severity >= self.config.threshold {
                debug!(
                    category = category.label(),
                    severity,
                    threshold = self.config.threshold,
                    "content safety threshold reached"
                );
                return SafetyVerdict::unsafe_because(format!(
                    "Content blocked: {} detected",
                    category.label()
                ));
            }
        }
        SafetyVerdict::safe()
    }
}

#[async_trait]
impl Classifier for ContentSafetyClassifier {
    async fn classify(&self, text: &str) -> SafetyVerdict {
        match self.backend.analyze(text).await {
            Ok(scores) => self.evaluate(&scores),
            Err(e) => match self.config.on_error {
                FailurePolicy::Open => {
                    warn!(
                        backend = self.backend.name(),
                        error = %e,
                        "Content Safety error, failing open"
                    );
                    SafetyVerdict::safe()
                }
                FailurePolicy::Closed => {
                    warn!(
                        backend = self.backend.name(),
                        error = %e,
                        "Content Safety error, failing closed"
                    );
                    SafetyVerdict::unsafe_because(SERVICE_UNAVAILABLE_REASON)
                }
            },
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
