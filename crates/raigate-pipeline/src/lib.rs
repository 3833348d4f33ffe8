//! raigate Pipeline
//!
//! Sequences the responsible-AI gates around a hosted language model:
//!
//! 1. Prompt Shield (pattern match on the raw query)
//! 2. Content Safety on the query
//! 3. RAG grounding against a search index (never blocks)
//! 4. Generation under the RAI system prompt
//! 5. Content Safety on the answer
//!
//! The first failing gate ends the request. [`GuardrailPipeline::ask`] always
//! returns a well-formed [`raigate_core::PipelineResult`].

pub mod azure_openai;
pub mod azure_search;
pub mod config;
pub mod generator;
pub mod grounding;
pub mod orchestrator;

pub use azure_openai::AzureOpenAiClient;
pub use azure_search::AzureSearchClient;
pub use config::{GenerationConfig, GroundingConfig, HttpConfig, PipelineConfig, RefusalMessages};
pub use generator::{AnswerGenerator, ChatBackend, RAI_SYSTEM_PROMPT};
pub use grounding::{NoopRetriever, Retriever, SearchBackend, SearchRetriever};
pub use orchestrator::{GuardrailPipeline, PipelineBuilder};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::generator::{AnswerGenerator, ChatBackend};
    pub use crate::grounding::{Retriever, SearchBackend};
    pub use crate::orchestrator::{GuardrailPipeline, PipelineBuilder};
}
