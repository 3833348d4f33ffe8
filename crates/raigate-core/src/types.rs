//! Core types for raigate

use serde::{Deserialize, Serialize};

/// A chat message in the conversation sent to the generation service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender (system or user)
    pub role: String,

    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a new chat message
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }
}

/// A chat-completion request handed to the generation collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model or deployment identifier
    pub model: String,

    /// Ordered, role-tagged messages
    pub messages: Vec<ChatMessage>,

    /// Sampling temperature
    pub temperature: f32,

    /// Upper bound on generated tokens
    pub max_tokens: u32,
}

/// Outcome of a single safety gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyVerdict {
    pub is_safe: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl SafetyVerdict {
    /// A passing verdict
    pub fn safe() -> Self {
        Self {
            is_safe: true,
            reason: None,
        }
    }

    /// A failing verdict with a human-readable reason
    pub fn unsafe_because(reason: impl Into<String>) -> Self {
        Self {
            is_safe: false,
            reason: Some(reason.into()),
        }
    }
}

/// A document returned by the search collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDocument {
    /// Display name of the policy
    pub policy_name: String,

    /// Body text of the policy
    pub content: String,
}

impl PolicyDocument {
    pub fn new(policy_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            policy_name: policy_name.into(),
            content: content.into(),
        }
    }
}

/// Retrieved reference material, in the order the search service returned it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroundingContext {
    documents: Vec<PolicyDocument>,
}

impl GroundingContext {
    /// An empty context (no retriever, no matches, or a failed search)
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_documents(documents: Vec<PolicyDocument>) -> Self {
        Self { documents }
    }

    pub fn documents(&self) -> &[PolicyDocument] {
        &self.documents
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Render each document as a labeled block, separated by blank lines
    pub fn render(&self) -> String {
        self.documents
            .iter()
            .map(|doc| format!("Policy: {}\n{}", doc.policy_name, doc.content))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// The sole output of a pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineResult {
    /// Generated answer, refusal message, or diagnostic
    pub answer: String,

    /// Whether a gate stopped the request
    pub blocked: bool,

    /// Why the request was blocked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Name of the gate that blocked the request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocking_layer: Option<String>,

    /// Whether the answer was generated from retrieved policy text
    pub grounded: bool,

    /// Gates that ran with their capability engaged, in order
    pub layers_used: Vec<String>,
}

impl PipelineResult {
    /// A result for a request stopped at `layer`
    pub fn blocked(
        answer: impl Into<String>,
        reason: impl Into<String>,
        layer: impl Into<String>,
        layers_used: Vec<String>,
    ) -> Self {
        Self {
            answer: answer.into(),
            blocked: true,
            reason: Some(reason.into()),
            blocking_layer: Some(layer.into()),
            grounded: false,
            layers_used,
        }
    }

    /// A result carrying a generated answer that passed every gate
    pub fn answered(answer: impl Into<String>, grounded: bool, layers_used: Vec<String>) -> Self {
        Self {
            answer: answer.into(),
            blocked: false,
            reason: None,
            blocking_layer: None,
            grounded,
            layers_used,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_document() {
        let ctx = GroundingContext::from_documents(vec![PolicyDocument::new(
            "Parental Leave Policy",
            "Employees receive 12 weeks.",
        )]);
        assert_eq!(
            ctx.render(),
            "Policy: Parental Leave Policy\nEmployees receive 12 weeks."
        );
        assert!(!ctx.is_empty());
    }

    #[test]
    fn test_render_preserves_order_with_blank_lines() {
        let ctx = GroundingContext::from_documents(vec![
            PolicyDocument::new("B", "second"),
            PolicyDocument::new("A", "first"),
        ]);
        assert_eq!(ctx.render(), "Policy: B\nsecond\n\nPolicy: A\nfirst");
    }

    #[test]
    fn test_empty_context() {
        assert!(GroundingContext::empty().is_empty());
        assert_eq!(GroundingContext::empty().render(), "");
    }

    #[test]
    fn test_blocked_result_serialization() {
        let result = PipelineResult::blocked(
            "refused",
            "Prompt injection detected",
            "Prompt Shield",
            Vec::new(),
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["blocked"], true);
        assert_eq!(json["blocking_layer"], "Prompt Shield");
        assert_eq!(json["grounded"], false);
    }

    #[test]
    fn test_answered_result_omits_reason() {
        let result = PipelineResult::answered("ok", true, vec!["Prompt Shield".to_string()]);
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("reason").is_none());
        assert!(json.get("blocking_layer").is_none());
        assert_eq!(json["layers_used"][0], "Prompt Shield");
    }

    #[test]
    fn test_verdict_constructors() {
        assert!(SafetyVerdict::safe().is_safe);
        let v = SafetyVerdict::unsafe_because("nope");
        assert!(!v.is_safe);
        assert_eq!(v.reason.as_deref(), Some("nope"));
    }
}
