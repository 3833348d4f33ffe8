//! Classifier trait and the no-op implementation

use async_trait::async_trait;
use raigate_core::SafetyVerdict;

/// Trait for every safety gate in the pipeline.
///
/// `classify` is total: collaborator failures are resolved inside the
/// implementation according to its failure policy, so callers only ever see
/// a verdict.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify the given text
    async fn classify(&self, text: &str) -> SafetyVerdict;

    /// Get the classifier name
    fn name(&self) -> &str;

    /// Whether a real capability backs this classifier.
    ///
    /// Gates that are not engaged are skipped in the `layers_used` provenance.
    fn is_engaged(&self) -> bool {
        true
    }
}

/// Classifier used when no collaborator is configured; passes everything.
#[derive(Debug, Clone)]
pub struct NoopClassifier {
    name: String,
}

impl NoopClassifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Classifier for NoopClassifier {
    async fn classify(&self, _text: &str) -> SafetyVerdict {
        SafetyVerdict::safe()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_engaged(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_always_safe() {
        let classifier = NoopClassifier::new("content-safety");
        let verdict = classifier.classify("anything at all").await;
        assert!(verdict.is_safe);
        assert!(verdict.reason.is_none());
        assert!(!classifier.is_engaged());
        assert_eq!(classifier.name(), "content-safety");
    }
}
