//! Pipeline configuration
//!
//! Tunable knobs for every gate, read from an optional YAML file. Endpoints
//! and credentials are not part of this file; they come from the environment.

use raigate_classifiers::{ContentSafetyConfig, ShieldConfig};
use raigate_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Complete pipeline configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub shield: ShieldConfig,

    #[serde(default)]
    pub content_safety: ContentSafetyConfig,

    #[serde(default)]
    pub grounding: GroundingConfig,

    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub refusals: RefusalMessages,

    #[serde(default)]
    pub http: HttpConfig,
}

impl PipelineConfig {
    /// Load configuration from a YAML file, or use defaults if it does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_yaml(&content)?
        } else {
            info!(
                "Pipeline config {} not found, using defaults",
                path.display()
            );
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| Error::config(format!("invalid pipeline config: {}", e)))
    }

    pub fn validate(&self) -> Result<()> {
        self.shield.validate()?;
        self.content_safety.validate()?;
        self.grounding.validate()?;
        self.generation.validate()?;
        Ok(())
    }
}

/// RAG grounding configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingConfig {
    /// Number of documents requested from the search service
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Index field holding the policy display name
    #[serde(default = "default_name_field")]
    pub name_field: String,

    /// Index field holding the policy body
    #[serde(default = "default_content_field")]
    pub content_field: String,
}

impl GroundingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(Error::config("grounding.top_k must be at least 1"));
        }
        Ok(())
    }
}

impl Default for GroundingConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            name_field: default_name_field(),
            content_field: default_content_field(),
        }
    }
}

/// Generation request configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Sampling temperature; kept low to favor accuracy
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Upper bound on generated tokens
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Replaces the built-in RAI system prompt when set
    #[serde(default)]
    pub system_prompt: Option<String>,
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(Error::config(format!(
                "generation.temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }
        if self.max_tokens == 0 {
            return Err(Error::config("generation.max_tokens must be at least 1"));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            system_prompt: None,
        }
    }
}

/// Fixed refusal messages returned by each blocking gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefusalMessages {
    #[serde(default = "default_prompt_shield_refusal")]
    pub prompt_shield: String,

    #[serde(default = "default_input_safety_refusal")]
    pub input_safety: String,

    #[serde(default = "default_output_safety_refusal")]
    pub output_safety: String,
}

impl Default for RefusalMessages {
    fn default() -> Self {
        Self {
            prompt_shield: default_prompt_shield_refusal(),
            input_safety: default_input_safety_refusal(),
            output_safety: default_output_safety_refusal(),
        }
    }
}

/// HTTP client configuration shared by all collaborators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build the HTTP client shared by every hosted-service backend
    pub fn build_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout())
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {}", e)))
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_top_k() -> usize {
    3
}

fn default_name_field() -> String {
    "policy_name".to_string()
}

fn default_content_field() -> String {
    "content".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    500
}

fn default_prompt_shield_refusal() -> String {
    "I'm sorry, but I can't process that request. Please ask a question about our company policies."
        .to_string()
}

fn default_input_safety_refusal() -> String {
    "I'm unable to process that request. Please ask appropriate questions about HR policies."
        .to_string()
}

fn default_output_safety_refusal() -> String {
    "I apologize, but I need to revise my response. Please try rephrasing your question."
        .to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;
    use raigate_classifiers::FailurePolicy;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.grounding.top_k, 3);
        assert_eq!(config.generation.max_tokens, 500);
        assert_eq!(config.content_safety.threshold, 2);
        assert_eq!(config.http.timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::load(dir.path().join("absent.yaml")).unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
shield:
  patterns:
    - "reveal the payroll"
content_safety:
  threshold: 4
  on_error: closed
grounding:
  top_k: 5
  name_field: title
generation:
  temperature: 0.1
refusals:
  prompt_shield: "Nope."
http:
  timeout_secs: 5
"#
        )
        .unwrap();

        let config = PipelineConfig::load(file.path()).unwrap();
        assert_eq!(config.shield.patterns, vec!["reveal the payroll".to_string()]);
        assert_eq!(config.content_safety.threshold, 4);
        assert_eq!(config.content_safety.on_error, FailurePolicy::Closed);
        assert_eq!(config.grounding.top_k, 5);
        assert_eq!(config.grounding.name_field, "title");
        assert_eq!(config.grounding.content_field, "content");
        assert_eq!(config.generation.max_tokens, 500);
        assert_eq!(config.refusals.prompt_shield, "Nope.");
        assert_eq!(
            config.refusals.input_safety,
            RefusalMessages::default().input_safety
        );
        assert_eq!(config.http.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let config = PipelineConfig::from_yaml("grounding:\n  top_k: 0\n").unwrap();
        assert!(config.validate().is_err());

        let config = PipelineConfig::from_yaml("generation:\n  temperature: 3.5\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_yaml_is_config_error() {
        let err = PipelineConfig::from_yaml("grounding: [not, a, map]").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
