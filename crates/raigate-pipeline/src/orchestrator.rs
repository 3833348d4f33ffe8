//! Guardrail orchestrator
//!
//! Runs the gates in a fixed order and stops at the first one that blocks.
//! Nothing here returns an error: policy blocks, fail-open recoveries and
//! generation failures all end in a [`PipelineResult`].

use crate::config::{PipelineConfig, RefusalMessages};
use crate::generator::AnswerGenerator;
use crate::grounding::{NoopRetriever, Retriever};
use raigate_classifiers::{Classifier, NoopClassifier, PromptShield};
use raigate_core::{PipelineResult, Result};
use raigate_telemetry::{BlockStage, MetricsCollector};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

pub const LAYER_PROMPT_SHIELD: &str = "Prompt Shield";
pub const LAYER_CONTENT_SAFETY: &str = "Content Safety";
pub const LAYER_CONTENT_SAFETY_INPUT: &str = "Content Safety (Input)";
pub const LAYER_CONTENT_SAFETY_OUTPUT: &str = "Content Safety (Output)";
pub const LAYER_RAG_GROUNDING: &str = "RAG Grounding";
pub const LAYER_RAI_SYSTEM_PROMPT: &str = "RAI System Prompt";
pub const LAYER_SYSTEM_ERROR: &str = "System error";

/// Reason attached to generation failures
pub const SYSTEM_ERROR_REASON: &str = "System error";

/// The guardrail pipeline. Immutable after construction; share it behind an
/// `Arc` to serve concurrent requests.
pub struct GuardrailPipeline {
    shield: Arc<dyn Classifier>,
    content_safety: Arc<dyn Classifier>,
    retriever: Arc<dyn Retriever>,
    generator: AnswerGenerator,
    refusals: RefusalMessages,
    metrics: MetricsCollector,
}

impl GuardrailPipeline {
    pub fn builder(generator: AnswerGenerator) -> PipelineBuilder {
        PipelineBuilder::new(generator)
    }

    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }

    pub fn content_safety_enabled(&self) -> bool {
        self.content_safety.is_engaged()
    }

    pub fn grounding_enabled(&self) -> bool {
        self.retriever.is_engaged()
    }

    pub fn deployment(&self) -> &str {
        self.generator.deployment()
    }

    /// Answer a question with every gate applied
    pub async fn ask(&self, query: &str) -> PipelineResult {
        let start = Instant::now();
        self.metrics.record_request();

        let result = self.run(query).await;

        self.metrics
            .record_latency(start.elapsed().as_micros() as u64);
        result
    }

    async fn run(&self, query: &str) -> PipelineResult {
        let mut layers_used: Vec<String> = Vec::new();

        // Gate 1: prompt shield
        let verdict = self.shield.classify(query).await;
        if !verdict.is_safe {
            info!(layer = LAYER_PROMPT_SHIELD, "request blocked");
            return self.block(
                BlockStage::PromptShield,
                &self.refusals.prompt_shield,
                verdict.reason,
                LAYER_PROMPT_SHIELD,
                layers_used,
            );
        }
        layers_used.push(LAYER_PROMPT_SHIELD.to_string());

        // Gate 2: content safety on the query
        let verdict = self.content_safety.classify(query).await;
        if !verdict.is_safe {
            info!(layer = LAYER_CONTENT_SAFETY_INPUT, "request blocked");
            return self.block(
                BlockStage::InputSafety,
                &self.refusals.input_safety,
                verdict.reason,
                LAYER_CONTENT_SAFETY_INPUT,
                layers_used,
            );
        }
        if self.content_safety.is_engaged() {
            layers_used.push(LAYER_CONTENT_SAFETY.to_string());
        }

        // Stage 3: grounding, never blocks
        let context = self.retriever.retrieve(query).await;
        let grounded = !context.is_empty();
        if grounded && self.retriever.is_engaged() {
            layers_used.push(LAYER_RAG_GROUNDING.to_string());
        }
        debug!(grounded, documents = context.documents().len(), "grounding complete");

        // Gate 4: generation under the RAI system prompt
        layers_used.push(LAYER_RAI_SYSTEM_PROMPT.to_string());
        let answer = match self.generator.generate(query, &context).await {
            Ok(answer) => answer,
            Err(e) => {
                error!(error = %e, deployment = self.generator.deployment(), "generation failed");
                let diagnostic = format!(
                    "ERROR: {}\n\nTip: Verify your model deployment name matches AZURE_OPENAI_DEPLOYMENT (currently: {})",
                    e,
                    self.generator.deployment()
                );
                return self.block(
                    BlockStage::System,
                    &diagnostic,
                    Some(SYSTEM_ERROR_REASON.to_string()),
                    LAYER_SYSTEM_ERROR,
                    layers_used,
                );
            }
        };

        // Gate 5: content safety on the answer
        let verdict = self.content_safety.classify(&answer).await;
        if !verdict.is_safe {
            info!(layer = LAYER_CONTENT_SAFETY_OUTPUT, "response blocked");
            return self.block(
                BlockStage::OutputSafety,
                &self.refusals.output_safety,
                verdict.reason,
                LAYER_CONTENT_SAFETY_OUTPUT,
                layers_used,
            );
        }

        self.metrics.record_answered(grounded);
        PipelineResult::answered(answer, grounded, layers_used)
    }

    fn block(
        &self,
        stage: BlockStage,
        answer: &str,
        reason: Option<String>,
        layer: &str,
        layers_used: Vec<String>,
    ) -> PipelineResult {
        self.metrics.record_blocked(stage);
        let reason = reason.unwrap_or_else(|| "Blocked by policy".to_string());
        PipelineResult::blocked(answer, reason, layer, layers_used)
    }
}

/// Builder for [`GuardrailPipeline`]; collaborators left unset are no-ops
pub struct PipelineBuilder {
    generator: AnswerGenerator,
    shield: Option<Arc<dyn Classifier>>,
    content_safety: Arc<dyn Classifier>,
    retriever: Arc<dyn Retriever>,
    refusals: RefusalMessages,
    metrics: MetricsCollector,
}

impl PipelineBuilder {
    pub fn new(generator: AnswerGenerator) -> Self {
        Self {
            generator,
            shield: None,
            content_safety: Arc::new(NoopClassifier::new("content-safety")),
            retriever: Arc::new(NoopRetriever),
            refusals: RefusalMessages::default(),
            metrics: MetricsCollector::new(),
        }
    }

    pub fn shield(mut self, shield: Arc<dyn Classifier>) -> Self {
        self.shield = Some(shield);
        self
    }

    pub fn content_safety(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.content_safety = classifier;
        self
    }

    pub fn retriever(mut self, retriever: Arc<dyn Retriever>) -> Self {
        self.retriever = retriever;
        self
    }

    pub fn refusals(mut self, refusals: RefusalMessages) -> Self {
        self.refusals = refusals;
        self
    }

    pub fn metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = metrics;
        self
    }

    /// Apply the shield patterns and refusal messages from configuration
    pub fn with_config(mut self, config: &PipelineConfig) -> Result<Self> {
        self.shield = Some(Arc::new(PromptShield::from_config(&config.shield)?));
        self.refusals = config.refusals.clone();
        Ok(self)
    }

    /// Build the pipeline, using the built-in shield patterns if none were set
    pub fn build(self) -> Result<GuardrailPipeline> {
        let shield = match self.shield {
            Some(shield) => shield,
            None => Arc::new(PromptShield::new()?),
        };

        Ok(GuardrailPipeline {
            shield,
            content_safety: self.content_safety,
            retriever: self.retriever,
            generator: self.generator,
            refusals: self.refusals,
            metrics: self.metrics,
        })
    }
}
