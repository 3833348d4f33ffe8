//! Answer generation under the RAI system prompt

use crate::config::GenerationConfig;
use async_trait::async_trait;
use raigate_core::{ChatMessage, ChatRequest, GroundingContext, Result};
use std::sync::Arc;
use tracing::debug;

/// System prompt carrying the fairness, accuracy, transparency, privacy and
/// safety guidelines
pub const RAI_SYSTEM_PROMPT: &str = r#"You are an HR Knowledge Assistant helping employees understand company policies.

RESPONSIBLE AI GUIDELINES:
1. FAIRNESS: Treat all employees equitably regardless of gender, family status, or personal circumstances
2. ACCURACY: Only answer based on official company policies provided
3. TRANSPARENCY: Clearly state when information is not available in policies
4. PRIVACY: Never ask for or discuss personal employee information
5. SAFETY: Decline inappropriate requests politely

If a question cannot be answered from the policy documents, say "I don't have information about that in our current company policies."
If a question is inappropriate or outside your scope, politely decline and redirect to HR.
"#;

/// A hosted chat-completion service
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Return the generated text for the request
    async fn complete(&self, request: &ChatRequest) -> Result<String>;

    fn name(&self) -> &str;
}

/// Builds the chat request and invokes the generation backend
pub struct AnswerGenerator {
    backend: Arc<dyn ChatBackend>,
    deployment: String,
    config: GenerationConfig,
}

impl AnswerGenerator {
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        deployment: impl Into<String>,
        config: GenerationConfig,
    ) -> Self {
        Self {
            backend,
            deployment: deployment.into(),
            config,
        }
    }

    /// Model deployment the requests target
    pub fn deployment(&self) -> &str {
        &self.deployment
    }

    pub fn system_prompt(&self) -> &str {
        self.config
            .system_prompt
            .as_deref()
            .unwrap_or(RAI_SYSTEM_PROMPT)
    }

    /// The user turn: the raw query, or the query framed by retrieved policies
    pub fn user_message(query: &str, context: &GroundingContext) -> String {
        if context.is_empty() {
            return query.to_string();
        }

        format!(
            "Based on the following company policies, please answer the question.\n\
             \n\
             COMPANY POLICIES:\n\
             {}\n\
             \n\
             QUESTION: {}\n\
             \n\
             Remember to only use information from the policies provided above.",
            context.render(),
            query
        )
    }

    pub fn build_request(&self, query: &str, context: &GroundingContext) -> ChatRequest {
        ChatRequest {
            model: self.deployment.clone(),
            messages: vec![
                ChatMessage::system(self.system_prompt()),
                ChatMessage::user(Self::user_message(query, context)),
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }

    /// Generate an answer; errors are returned to the caller unchanged
    pub async fn generate(&self, query: &str, context: &GroundingContext) -> Result<String> {
        let request = self.build_request(query, context);
        debug!(
            backend = self.backend.name(),
            model = %request.model,
            grounded = !context.is_empty(),
            "requesting completion"
        );
        self.backend.complete(&request).await
    }
}
