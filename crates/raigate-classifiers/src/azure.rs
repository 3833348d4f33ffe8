//! Azure AI Content Safety client
//!
//! Calls the `text:analyze` operation:
//! ```text
//! POST {endpoint}/contentsafety/text:analyze?api-version=2023-10-01
//! {"text": "...", "categories": ["Hate", "Sexual", "Violence", "SelfHarm"], "outputType": "FourSeverityLevels"}
//!
//! {"blocklistsMatch": [], "categoriesAnalysis": [{"category": "Hate", "severity": 0}, ...]}
//! ```

use crate::content_safety::{CategoryScores, HarmCategory, ModerationBackend};
use crate::transport::map_transport_error;
use async_trait::async_trait;
use raigate_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// API version of the text analysis operation
pub const CONTENT_SAFETY_API_VERSION: &str = "2023-10-01";

/// Moderation backend for Azure AI Content Safety
#[derive(Debug, Clone)]
pub struct AzureContentSafetyClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl AzureContentSafetyClient {
    /// Create a client with its own HTTP connection pool
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint, api_key)
    }

    /// Create a client sharing an existing HTTP client (and its timeout)
    pub fn with_client(
        http: reqwest::Client,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    fn analyze_url(&self) -> String {
        let base = self.endpoint.trim_end_matches('/');
        format!(
            "{}/contentsafety/text:analyze?api-version={}",
            base, CONTENT_SAFETY_API_VERSION
        )
    }
}

#[async_trait]
impl ModerationBackend for AzureContentSafetyClient {
    async fn analyze(&self, text: &str) -> Result<CategoryScores> {
        let body = AnalyzeTextRequest {
            text,
            categories: HarmCategory::ALL.iter().map(|c| c.service_name()).collect(),
            output_type: "FourSeverityLevels",
        };

        let response = self
            .http
            .post(self.analyze_url())
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::status("content-safety", status.as_u16(), body));
        }

        let parsed: AnalyzeTextResponse = response.json().await.map_err(|e| {
            Error::invalid_response(format!("failed to parse content safety response: {}", e))
        })?;

        let mut scores = CategoryScores::new();
        for item in parsed.categories_analysis {
            match HarmCategory::from_service_name(&item.category) {
                Some(category) => scores.set(category, item.severity),
                None => debug!(category = %item.category, "ignoring unknown category"),
            }
        }
        Ok(scores)
    }

    fn name(&self) -> &str {
        "azure-content-safety"
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeTextRequest<'a> {
    text: &'a str,
    categories: Vec<&'static str>,
    output_type: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeTextResponse {
    #[serde(default)]
    categories_analysis: Vec<CategoryAnalysis>,
}

#[derive(Debug, Deserialize)]
struct CategoryAnalysis {
    category: String,
    #[serde(default)]
    severity: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_url_trims_trailing_slash() {
        let client = AzureContentSafetyClient::new("https://cs.example.com/", "key");
        assert_eq!(
            client.analyze_url(),
            "https://cs.example.com/contentsafety/text:analyze?api-version=2023-10-01"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = AnalyzeTextRequest {
            text: "hello",
            categories: vec!["Hate"],
            output_type: "FourSeverityLevels",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["text"], "hello");
        assert_eq!(json["outputType"], "FourSeverityLevels");
        assert_eq!(json["categories"][0], "Hate");
    }
}
