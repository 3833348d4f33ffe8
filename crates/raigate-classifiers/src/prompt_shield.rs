//! Prompt Shield
//!
//! First gate of the pipeline. Scans the raw query for known jailbreak and
//! instruction-override phrases with a single Aho-Corasick automaton. The
//! check is pure and deterministic: no collaborator is involved.

use crate::classifier::Classifier;
use crate::config::ShieldConfig;
use aho_corasick::AhoCorasick;
use raigate_core::{Error, Result, SafetyVerdict};
use std::borrow::Cow;
use tracing::debug;

/// Reason attached to every prompt-shield block
pub const PROMPT_INJECTION_REASON: &str = "Prompt injection detected";

/// Pattern-based prompt injection gate
pub struct PromptShield {
    name: String,
    matcher: AhoCorasick,
    patterns: Vec<String>,
}

impl PromptShield {
    /// Create a shield with the built-in phrase list
    pub fn new() -> Result<Self> {
        Self::from_config(&ShieldConfig::default())
    }

    /// Create a shield from configuration
    pub fn from_config(config: &ShieldConfig) -> Result<Self> {
        config.validate()?;

        let patterns: Vec<String> = config.patterns.iter().map(|p| p.to_lowercase()).collect();
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&patterns)
            .map_err(|e| {
                Error::classifier(format!("Failed to build prompt shield matcher: {}", e))
            })?;

        Ok(Self {
            name: "prompt-shield".to_string(),
            matcher,
            patterns,
        })
    }

    /// Return the first configured phrase found in `text`, if any
    pub fn first_match(&self, text: &str) -> Option<&str> {
        // Non-ASCII input is folded up front; ASCII folding is done by the automaton.
        let haystack: Cow<'_, str> = if text.is_ascii() {
            Cow::Borrowed(text)
        } else {
            Cow::Owned(text.to_lowercase())
        };

        self.matcher
            .find(haystack.as_ref())
            .map(|m| self.patterns[m.pattern().as_usize()].as_str())
    }

    /// Number of configured phrases
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}

#[async_trait::async_trait]
impl Classifier for PromptShield {
    async fn classify(&self, text: &str) -> SafetyVerdict {
        match self.first_match(text) {
            Some(pattern) => {
                debug!(pattern = %pattern, "prompt injection pattern matched");
                SafetyVerdict::unsafe_because(PROMPT_INJECTION_REASON)
            }
            None => SafetyVerdict::safe(),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
