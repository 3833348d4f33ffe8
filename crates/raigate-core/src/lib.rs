//! raigate Core
//!
//! Core types and utilities shared across raigate components.
//!
//! This crate provides:
//! - Chat message types exchanged with the generation service
//! - Safety verdicts produced by every gate
//! - Grounding context assembled from retrieved policy documents
//! - The pipeline result returned to callers
//! - Error types and result handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    ChatMessage, ChatRequest, GroundingContext, PipelineResult, PolicyDocument, SafetyVerdict,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{
        ChatMessage, ChatRequest, GroundingContext, PipelineResult, PolicyDocument, SafetyVerdict,
    };
}
