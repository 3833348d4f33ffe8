//! Azure AI Search backend
//!
//! ```text
//! POST {endpoint}/indexes/{index}/docs/search?api-version=2023-11-01
//! {"search": "parental leave", "top": 3, "select": "policy_name,content"}
//!
//! {"value": [{"@search.score": 1.7, "policy_name": "...", "content": "..."}]}
//! ```

use crate::config::GroundingConfig;
use crate::grounding::SearchBackend;
use async_trait::async_trait;
use raigate_classifiers::transport::map_transport_error;
use raigate_core::{Error, PolicyDocument, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// API version of the documents search operation
pub const SEARCH_API_VERSION: &str = "2023-11-01";

/// Search backend for an Azure AI Search index
#[derive(Debug, Clone)]
pub struct AzureSearchClient {
    http: reqwest::Client,
    endpoint: String,
    index: String,
    api_key: String,
    name_field: String,
    content_field: String,
}

impl AzureSearchClient {
    /// Create a client projecting the default `policy_name`/`content` fields
    pub fn new(
        endpoint: impl Into<String>,
        index: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self::with_client(
            reqwest::Client::new(),
            endpoint,
            index,
            api_key,
            &GroundingConfig::default(),
        )
    }

    /// Create a client sharing an HTTP client, with field names from config
    pub fn with_client(
        http: reqwest::Client,
        endpoint: impl Into<String>,
        index: impl Into<String>,
        api_key: impl Into<String>,
        grounding: &GroundingConfig,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            index: index.into(),
            api_key: api_key.into(),
            name_field: grounding.name_field.clone(),
            content_field: grounding.content_field.clone(),
        }
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    fn search_url(&self) -> String {
        let base = self.endpoint.trim_end_matches('/');
        format!(
            "{}/indexes/{}/docs/search?api-version={}",
            base, self.index, SEARCH_API_VERSION
        )
    }

    fn to_document(&self, mut doc: Map<String, Value>) -> Result<PolicyDocument> {
        let name = take_text(&mut doc, &self.name_field)?;
        let content = take_text(&mut doc, &self.content_field)?;
        Ok(PolicyDocument::new(name, content))
    }
}

/// Pull a projected field out of a search hit
fn take_text(doc: &mut Map<String, Value>, field: &str) -> Result<String> {
    match doc.remove(field) {
        Some(Value::String(s)) => Ok(s),
        Some(Value::Null) | None => Err(Error::search(format!(
            "search result is missing field '{}'",
            field
        ))),
        Some(other) => Ok(other.to_string()),
    }
}

#[async_trait]
impl SearchBackend for AzureSearchClient {
    async fn search(&self, query: &str, top: usize) -> Result<Vec<PolicyDocument>> {
        let body = SearchRequest {
            search: query,
            top,
            select: format!("{},{}", self.content_field, self.name_field),
        };

        let response = self
            .http
            .post(self.search_url())
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::status("azure-search", status.as_u16(), body));
        }

        let parsed: SearchResponse = response.json().await.map_err(|e| {
            Error::invalid_response(format!("failed to parse search response: {}", e))
        })?;

        parsed
            .value
            .into_iter()
            .map(|doc| self.to_document(doc))
            .collect()
    }

    fn name(&self) -> &str {
        "azure-search"
    }
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    search: &'a str,
    top: usize,
    select: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    value: Vec<Map<String, Value>>,
}
