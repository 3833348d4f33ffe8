//! Mock collaborators for pipeline tests
//!
//! Each mock counts its calls so tests can assert that short-circuited
//! requests never reach downstream services.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use raigate_classifiers::{
    CategoryScores, ContentSafetyClassifier, ContentSafetyConfig, HarmCategory, ModerationBackend,
};
use raigate_core::{ChatRequest, Error, PolicyDocument, Result};
use raigate_pipeline::{
    AnswerGenerator, ChatBackend, GenerationConfig, SearchBackend, SearchRetriever,
};

/// Moderation backend returning scripted scores, keyed by exact text
pub struct MockModeration {
    default: CategoryScores,
    per_text: Vec<(String, CategoryScores)>,
    fail: bool,
    calls: AtomicU32,
}

impl MockModeration {
    pub fn clean() -> Self {
        Self {
            default: CategoryScores::new(),
            per_text: Vec::new(),
            fail: false,
            calls: AtomicU32::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::clean()
        }
    }

    /// Score every text with one severity in one category
    pub fn with_default(mut self, category: HarmCategory, severity: u8) -> Self {
        self.default = CategoryScores::new().with(category, severity);
        self
    }

    /// Score a specific text
    pub fn with_text(mut self, text: &str, category: HarmCategory, severity: u8) -> Self {
        self.per_text
            .push((text.to_string(), CategoryScores::new().with(category, severity)));
        self
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ModerationBackend for MockModeration {
    async fn analyze(&self, text: &str) -> Result<CategoryScores> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if self.fail {
            return Err(Error::transport("connection refused"));
        }
        Ok(self
            .per_text
            .iter()
            .find(|(t, _)| t == text)
            .map(|(_, s)| s.clone())
            .unwrap_or_else(|| self.default.clone()))
    }

    fn name(&self) -> &str {
        "mock-moderation"
    }
}

/// Search backend returning a fixed document list
pub struct MockSearch {
    documents: Vec<PolicyDocument>,
    fail: bool,
    calls: AtomicU32,
}

impl MockSearch {
    pub fn with_documents(documents: Vec<PolicyDocument>) -> Self {
        Self {
            documents,
            fail: false,
            calls: AtomicU32::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            documents: Vec::new(),
            fail: true,
            calls: AtomicU32::new(0),
        }
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl SearchBackend for MockSearch {
    async fn search(&self, _query: &str, top: usize) -> Result<Vec<PolicyDocument>> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if self.fail {
            return Err(Error::Timeout);
        }
        Ok(self.documents.iter().take(top).cloned().collect())
    }

    fn name(&self) -> &str {
        "mock-search"
    }
}

/// Chat backend returning a fixed answer and recording every request
pub struct MockChat {
    answer: Option<String>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockChat {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<ChatRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ChatBackend for MockChat {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.answer {
            Some(answer) => Ok(answer.clone()),
            None => Err(Error::status("azure-openai", 404, "DeploymentNotFound")),
        }
    }

    fn name(&self) -> &str {
        "mock-chat"
    }
}

pub fn generator(chat: &Arc<MockChat>) -> AnswerGenerator {
    AnswerGenerator::new(chat.clone(), "gpt-4o", GenerationConfig::default())
}

pub fn content_safety(moderation: &Arc<MockModeration>) -> Arc<ContentSafetyClassifier> {
    Arc::new(
        ContentSafetyClassifier::new(moderation.clone(), ContentSafetyConfig::default())
            .expect("default config is valid"),
    )
}

pub fn retriever(search: &Arc<MockSearch>) -> Arc<SearchRetriever> {
    Arc::new(SearchRetriever::new(search.clone(), 3))
}

pub fn parental_leave_doc() -> PolicyDocument {
    PolicyDocument::new(
        "Parental Leave Policy",
        "All employees receive 12 weeks of paid parental leave regardless of gender.",
    )
}
