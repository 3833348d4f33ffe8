//! Pipeline assembly and shared application state

use crate::settings::Settings;
use metrics_exporter_prometheus::PrometheusHandle;
use raigate_classifiers::{AzureContentSafetyClient, ContentSafetyClassifier};
use raigate_core::Result;
use raigate_pipeline::{
    AnswerGenerator, AzureOpenAiClient, AzureSearchClient, GuardrailPipeline, PipelineConfig,
    SearchRetriever,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Wire the hosted services into a guardrail pipeline.
///
/// One HTTP client is shared by every backend. Collaborators missing from
/// `settings` fall back to the pipeline's no-op defaults.
pub fn build_pipeline(settings: &Settings, config: &PipelineConfig) -> Result<GuardrailPipeline> {
    let http = config.http.build_client()?;

    let chat = AzureOpenAiClient::with_client(
        http.clone(),
        &settings.openai.endpoint,
        &settings.openai.key,
        &settings.openai.api_version,
    );
    let generator = AnswerGenerator::new(
        Arc::new(chat),
        &settings.openai.deployment,
        config.generation.clone(),
    );

    let mut builder = GuardrailPipeline::builder(generator).with_config(config)?;

    match &settings.content_safety {
        Some(cs) => {
            let backend =
                AzureContentSafetyClient::with_client(http.clone(), &cs.endpoint, &cs.key);
            let classifier =
                ContentSafetyClassifier::new(Arc::new(backend), config.content_safety.clone())?;
            info!(
                threshold = config.content_safety.threshold,
                on_error = ?config.content_safety.on_error,
                "Content Safety enabled"
            );
            builder = builder.content_safety(Arc::new(classifier));
        }
        None => warn!("Content Safety not configured; input and output moderation disabled"),
    }

    match &settings.search {
        Some(search) => {
            let backend = AzureSearchClient::with_client(
                http,
                &search.endpoint,
                &search.index,
                &search.key,
                &config.grounding,
            );
            info!(
                index = %search.index,
                top_k = config.grounding.top_k,
                "RAG grounding enabled"
            );
            builder = builder.retriever(Arc::new(SearchRetriever::new(
                Arc::new(backend),
                config.grounding.top_k,
            )));
        }
        None => warn!("Azure AI Search not configured; answers will not be grounded"),
    }

    builder.build()
}

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<GuardrailPipeline>,

    /// Prometheus metrics handle for rendering
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    pub fn new(pipeline: GuardrailPipeline, metrics_handle: PrometheusHandle) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            metrics_handle,
        }
    }
}
