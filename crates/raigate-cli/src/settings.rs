//! Validated service settings
//!
//! The generation service is required. Search and content safety are each
//! enabled only when both their endpoint and key are present; a half
//! configured pair is reported and treated as absent.

use crate::cli::AzureArgs;
use raigate_core::{Error, Result};
use tracing::warn;

/// Chat completions connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiSettings {
    pub endpoint: String,
    pub key: String,
    pub deployment: String,
    pub api_version: String,
}

/// Policy search connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    pub endpoint: String,
    pub key: String,
    pub index: String,
}

/// Content moderation connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSafetySettings {
    pub endpoint: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub openai: OpenAiSettings,
    pub search: Option<SearchSettings>,
    pub content_safety: Option<ContentSafetySettings>,
}

impl Settings {
    /// Names of the required variables that are unset or blank
    pub fn missing_required(args: &AzureArgs) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if present(&args.openai_endpoint).is_none() {
            missing.push("AZURE_OPENAI_ENDPOINT");
        }
        if present(&args.openai_key).is_none() {
            missing.push("AZURE_OPENAI_KEY");
        }
        missing
    }

    pub fn from_args(args: &AzureArgs) -> Result<Self> {
        let (endpoint, key) = match (present(&args.openai_endpoint), present(&args.openai_key)) {
            (Some(endpoint), Some(key)) => (endpoint, key),
            _ => {
                return Err(Error::config(format!(
                    "missing required environment variables: {}",
                    Self::missing_required(args).join(", ")
                )))
            }
        };

        let openai = OpenAiSettings {
            endpoint: endpoint.to_string(),
            key: key.to_string(),
            deployment: args.openai_deployment.clone(),
            api_version: args.openai_api_version.clone(),
        };

        let search = pair(
            "AZURE_SEARCH_ENDPOINT",
            &args.search_endpoint,
            "AZURE_SEARCH_KEY",
            &args.search_key,
        )
        .map(|(endpoint, key)| SearchSettings {
            endpoint,
            key,
            index: args.search_index.clone(),
        });

        let content_safety = pair(
            "CONTENT_SAFETY_ENDPOINT",
            &args.content_safety_endpoint,
            "CONTENT_SAFETY_KEY",
            &args.content_safety_key,
        )
        .map(|(endpoint, key)| ContentSafetySettings { endpoint, key });

        Ok(Self {
            openai,
            search,
            content_safety,
        })
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn pair(
    endpoint_var: &str,
    endpoint: &Option<String>,
    key_var: &str,
    key: &Option<String>,
) -> Option<(String, String)> {
    match (present(endpoint), present(key)) {
        (Some(endpoint), Some(key)) => Some((endpoint.to_string(), key.to_string())),
        (Some(_), None) => {
            warn!("{} is set but {} is not; collaborator disabled", endpoint_var, key_var);
            None
        }
        (None, Some(_)) => {
            warn!("{} is set but {} is not; collaborator disabled", key_var, endpoint_var);
            None
        }
        (None, None) => None,
    }
}
