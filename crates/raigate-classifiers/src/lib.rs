//! raigate Classifiers
//!
//! The safety gates that run before and after generation:
//! - [`PromptShield`]: static, case-insensitive matching of known jailbreak phrases
//! - [`ContentSafetyClassifier`]: multi-category severity scoring delegated to a
//!   hosted content-safety service
//! - [`NoopClassifier`]: the stand-in used when a classifier is not configured
//!
//! Every gate implements [`Classifier`], so the pipeline treats configured and
//! absent collaborators the same way.

pub mod azure;
pub mod classifier;
pub mod config;
pub mod content_safety;
pub mod prompt_shield;
pub mod transport;

pub use azure::AzureContentSafetyClient;
pub use classifier::{Classifier, NoopClassifier};
pub use config::{ContentSafetyConfig, FailurePolicy, ShieldConfig};
pub use content_safety::{CategoryScores, ContentSafetyClassifier, HarmCategory, ModerationBackend};
pub use prompt_shield::PromptShield;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{Classifier, NoopClassifier};
    pub use crate::content_safety::{ContentSafetyClassifier, HarmCategory, ModerationBackend};
    pub use crate::prompt_shield::PromptShield;
}
