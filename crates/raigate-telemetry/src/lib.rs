//! raigate Telemetry
//!
//! Counts pipeline outcomes per request: answers, grounded answers, blocks
//! by gate, and generation failures. Counters are kept in-process for the
//! console report and mirrored to the `metrics` facade for Prometheus.

pub mod metrics;

pub use crate::metrics::{BlockStage, MetricsCollector, MetricsSnapshot};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::metrics::{BlockStage, MetricsCollector, MetricsSnapshot};
}
