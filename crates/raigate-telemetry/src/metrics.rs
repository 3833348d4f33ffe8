//! Metrics collection and reporting

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::trace;

/// Gate that stopped a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStage {
    PromptShield,
    InputSafety,
    OutputSafety,
    /// The generation service failed
    System,
}

impl BlockStage {
    /// Label used for the `outcome` metric dimension
    pub fn label(&self) -> &'static str {
        match self {
            Self::PromptShield => "blocked_prompt_shield",
            Self::InputSafety => "blocked_input_safety",
            Self::OutputSafety => "blocked_output_safety",
            Self::System => "system_error",
        }
    }
}

/// Metrics collector for pipeline outcomes
#[derive(Clone)]
pub struct MetricsCollector {
    inner: Arc<MetricsInner>,
}

#[derive(Default)]
struct MetricsInner {
    total_requests: AtomicU64,
    answered: AtomicU64,
    grounded_answers: AtomicU64,
    blocked_prompt_shield: AtomicU64,
    blocked_input_safety: AtomicU64,
    blocked_output_safety: AtomicU64,
    system_errors: AtomicU64,
    total_latency_us: AtomicU64,
}

impl MetricsCollector {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner::default()),
        }
    }

    /// Record an incoming request
    pub fn record_request(&self) {
        self.inner.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a request that produced an answer
    pub fn record_answered(&self, grounded: bool) {
        self.inner.answered.fetch_add(1, Ordering::Relaxed);
        if grounded {
            self.inner.grounded_answers.fetch_add(1, Ordering::Relaxed);
        }
        let outcome = if grounded { "answered_grounded" } else { "answered" };
        ::metrics::counter!("raigate_requests_total", "outcome" => outcome).increment(1);
    }

    /// Record a request stopped by a gate
    pub fn record_blocked(&self, stage: BlockStage) {
        let counter = match stage {
            BlockStage::PromptShield => &self.inner.blocked_prompt_shield,
            BlockStage::InputSafety => &self.inner.blocked_input_safety,
            BlockStage::OutputSafety => &self.inner.blocked_output_safety,
            BlockStage::System => &self.inner.system_errors,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        ::metrics::counter!("raigate_requests_total", "outcome" => stage.label()).increment(1);
    }

    /// Record end-to-end pipeline latency
    pub fn record_latency(&self, latency_us: u64) {
        self.inner
            .total_latency_us
            .fetch_add(latency_us, Ordering::Relaxed);
        ::metrics::histogram!("raigate_pipeline_latency_us").record(latency_us as f64);
        trace!(latency_us, "pipeline latency recorded");
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_requests: self.inner.total_requests.load(Ordering::Relaxed),
            answered: self.inner.answered.load(Ordering::Relaxed),
            grounded_answers: self.inner.grounded_answers.load(Ordering::Relaxed),
            blocked_prompt_shield: self.inner.blocked_prompt_shield.load(Ordering::Relaxed),
            blocked_input_safety: self.inner.blocked_input_safety.load(Ordering::Relaxed),
            blocked_output_safety: self.inner.blocked_output_safety.load(Ordering::Relaxed),
            system_errors: self.inner.system_errors.load(Ordering::Relaxed),
            total_latency_us: self.inner.total_latency_us.load(Ordering::Relaxed),
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of current metrics
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub answered: u64,
    pub grounded_answers: u64,
    pub blocked_prompt_shield: u64,
    pub blocked_input_safety: u64,
    pub blocked_output_safety: u64,
    pub system_errors: u64,
    pub total_latency_us: u64,
}

impl MetricsSnapshot {
    /// Requests stopped by any policy gate (generation failures excluded)
    pub fn total_blocked(&self) -> u64 {
        self.blocked_prompt_shield + self.blocked_input_safety + self.blocked_output_safety
    }

    /// Calculate average latency per request
    pub fn avg_latency_us(&self) -> u64 {
        if self.total_requests == 0 {
            0
        } else {
            self.total_latency_us / self.total_requests
        }
    }

    /// Fraction of requests stopped by a policy gate
    pub fn block_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.total_blocked() as f64 / self.total_requests as f64
        }
    }
}
