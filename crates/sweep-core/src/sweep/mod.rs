//! Sweep orchestration: list leftover resources, delete them, classify the failures.

pub mod classifier;
pub mod collector;
pub mod errors;
pub mod handler;
pub mod orchestrator;
pub mod pagination;
pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

// Public API exports
pub use classifier::{Classification, DEFAULT_BENIGN_SIGNATURES, SkipClassifier};
pub use collector::{Collector, ResourceHandle, collect};
pub use errors::{AggregateError, SweepError};
pub use handler::{ResourceSweeper, SweepSettings};
pub use orchestrator::{OrchestrationResult, OrchestratorOptions};
pub use pagination::{PaginationEnd, paginate};
pub use traits::{ClientProvider, ResourceKind, Sweepable, Sweeper};
pub use types::{
    IdentityFormat, Page, Region, ResourceConfig, ResourceIdentifier, SweepOutcome, SweepReport,
};
