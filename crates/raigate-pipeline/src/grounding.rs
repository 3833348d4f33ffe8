//! RAG grounding
//!
//! Looks the query up in a policy search index and hands the matches to the
//! generator as reference text. Grounding is best-effort: no configured
//! backend, zero matches, and search failures all yield an empty context.

use async_trait::async_trait;
use raigate_core::{GroundingContext, PolicyDocument, Result};
use std::sync::Arc;
use tracing::{debug, warn};

/// A hosted search service over policy documents
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Return up to `top` documents, most relevant first
    async fn search(&self, query: &str, top: usize) -> Result<Vec<PolicyDocument>>;

    fn name(&self) -> &str;
}

/// Grounding capability used by the pipeline
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Retrieve reference material for the query; never fails
    async fn retrieve(&self, query: &str) -> GroundingContext;

    /// Whether a real search backend is behind this retriever
    fn is_engaged(&self) -> bool {
        true
    }
}

/// Retriever used when no search service is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRetriever;

#[async_trait]
impl Retriever for NoopRetriever {
    async fn retrieve(&self, _query: &str) -> GroundingContext {
        GroundingContext::empty()
    }

    fn is_engaged(&self) -> bool {
        false
    }
}

/// Retriever backed by a search service
pub struct SearchRetriever {
    backend: Arc<dyn SearchBackend>,
    top_k: usize,
}

impl SearchRetriever {
    pub fn new(backend: Arc<dyn SearchBackend>, top_k: usize) -> Self {
        Self { backend, top_k }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }
}

#[async_trait]
impl Retriever for SearchRetriever {
    async fn retrieve(&self, query: &str) -> GroundingContext {
        match self.backend.search(query, self.top_k).await {
            Ok(documents) => {
                debug!(
                    backend = self.backend.name(),
                    matches = documents.len(),
                    "policy search completed"
                );
                GroundingContext::from_documents(documents)
            }
            Err(e) => {
                warn!(backend = self.backend.name(), error = %e, "Search error, continuing ungrounded");
                GroundingContext::empty()
            }
        }
    }
}
