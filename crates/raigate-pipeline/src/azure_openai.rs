//! Azure OpenAI chat completions backend
//!
//! ```text
//! POST {endpoint}/openai/deployments/{deployment}/chat/completions?api-version={version}
//! {"messages": [...], "temperature": 0.3, "max_tokens": 500}
//! ```
//! The deployment is taken from [`ChatRequest::model`].

use crate::generator::ChatBackend;
use async_trait::async_trait;
use raigate_classifiers::transport::map_transport_error;
use raigate_core::{ChatMessage, ChatRequest, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// API version used when none is configured
pub const DEFAULT_OPENAI_API_VERSION: &str = "2024-08-01-preview";

/// Generation backend for an Azure OpenAI resource
#[derive(Debug, Clone)]
pub struct AzureOpenAiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    api_version: String,
}

impl AzureOpenAiClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(
            reqwest::Client::new(),
            endpoint,
            api_key,
            DEFAULT_OPENAI_API_VERSION,
        )
    }

    pub fn with_client(
        http: reqwest::Client,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            api_version: api_version.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn completions_url(&self, deployment: &str) -> String {
        let base = self.endpoint.trim_end_matches('/');
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            base, deployment, self.api_version
        )
    }
}

#[async_trait]
impl ChatBackend for AzureOpenAiClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        let body = CompletionBody {
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .http
            .post(self.completions_url(&request.model))
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::status("azure-openai", status.as_u16(), body));
        }

        let parsed: CompletionResponse = response.json().await.map_err(|e| {
            Error::invalid_response(format!("failed to parse completion response: {}", e))
        })?;

        debug!(
            choices = parsed.choices.len(),
            finish_reason = ?parsed.choices.first().and_then(|c| c.finish_reason.as_deref()),
            "chat completion response received"
        );

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::generation("response contained no message content"))
    }

    fn name(&self) -> &str {
        "azure-openai"
    }
}

#[derive(Debug, Serialize)]
struct CompletionBody<'a> {
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}
