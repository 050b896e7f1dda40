//! sweep-core: discover and delete resources left behind by acceptance tests.
//!
//! A sweeper lists every resource of one type in a region, deletes them with
//! bounded parallelism, and decides whether the failures it collected mean
//! "cleanup failed" or "this region does not support the resource". The
//! registry orders sweepers by dependency and the runner drives them across
//! regions.

pub mod config;
pub mod errors;
pub mod events;
pub mod fixture;
pub mod logging;
pub mod registry;
pub mod resources;
pub mod runner;
pub mod sweep;

// Re-export commonly used types at crate root for convenience
pub use config::SweepConfig;
pub use errors::{BoxError, SweeperError};
pub use fixture::FixtureCloud;
pub use logging::init_logging;
pub use registry::{RegistryError, SweeperRegistry};
pub use runner::{RunOptions, RunStatus, RunSummary, RunnerError, SweeperRun, run_sweepers};
pub use sweep::{
    AggregateError, Region, ResourceSweeper, SweepError, SweepOutcome, SweepReport, Sweeper,
};
