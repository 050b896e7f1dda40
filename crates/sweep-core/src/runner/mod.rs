//! Runs registered sweepers over a set of regions.
//!
//! Regions are swept concurrently. Within a region, sweepers run one after
//! another in dependency order, so a sweeper only starts once everything it
//! depends on has finished in that region.

pub mod errors;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::errors::SweeperError;
use crate::registry::SweeperRegistry;
use crate::sweep::traits::Sweeper;
use crate::sweep::types::{Region, SweepOutcome, SweepReport};

pub use errors::RunnerError;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub regions: Vec<Region>,
    /// Only these sweepers and their dependencies. `None` runs all of them.
    pub sweepers: Option<Vec<String>>,
    /// Keep going in a region after a sweeper fails there.
    pub allow_failures: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunStatus {
    Completed(SweepReport),
    Skipped {
        report: SweepReport,
        reason: String,
    },
    Failed {
        code: &'static str,
        error: String,
    },
    NotRun {
        reason: String,
    },
}

impl RunStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, RunStatus::Failed { .. })
    }

    pub fn report(&self) -> Option<&SweepReport> {
        match self {
            RunStatus::Completed(report) | RunStatus::Skipped { report, .. } => Some(report),
            RunStatus::Failed { .. } | RunStatus::NotRun { .. } => None,
        }
    }
}

/// Result of one sweeper in one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SweeperRun {
    pub sweeper: String,
    pub region: String,
    pub outcome: RunStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub cancelled: bool,
    pub runs: Vec<SweeperRun>,
}

impl RunSummary {
    pub fn failed(&self) -> impl Iterator<Item = &SweeperRun> {
        self.runs.iter().filter(|run| run.outcome.is_failed())
    }

    pub fn failed_count(&self) -> usize {
        self.failed().count()
    }

    pub fn skipped_count(&self) -> usize {
        self.runs
            .iter()
            .filter(|run| matches!(run.outcome, RunStatus::Skipped { .. }))
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.failed().next().is_some()
    }

    pub fn deleted_count(&self) -> usize {
        self.runs
            .iter()
            .filter_map(|run| run.outcome.report())
            .map(|report| report.deleted)
            .sum()
    }
}

/// Run the selected sweepers in every region.
///
/// Sweeper failures are reported in the summary rather than returned; only
/// an unusable configuration (no regions, unknown or cyclic sweepers) is an
/// error here.
pub async fn run_sweepers(
    registry: &SweeperRegistry,
    options: &RunOptions,
    cancel: &CancellationToken,
) -> Result<RunSummary, RunnerError> {
    if options.regions.is_empty() {
        return Err(RunnerError::NoRegions);
    }

    let order = registry.run_order(options.sweepers.as_deref())?;
    let started_at = Utc::now();

    info!(
        event = "core.runner.run_started",
        regions = ?options.regions.iter().map(Region::as_str).collect::<Vec<_>>(),
        sweepers = ?order.iter().map(|s| s.name()).collect::<Vec<_>>(),
        allow_failures = options.allow_failures
    );

    let per_region = join_all(
        options
            .regions
            .iter()
            .map(|region| run_region(region, &order, options.allow_failures, cancel)),
    )
    .await;

    let summary = RunSummary {
        started_at,
        finished_at: Utc::now(),
        cancelled: cancel.is_cancelled(),
        runs: per_region.into_iter().flatten().collect(),
    };

    info!(
        event = "core.runner.run_completed",
        runs = summary.runs.len(),
        failed = summary.failed_count(),
        skipped = summary.skipped_count(),
        deleted = summary.deleted_count(),
        cancelled = summary.cancelled
    );

    Ok(summary)
}

async fn run_region(
    region: &Region,
    order: &[Arc<dyn Sweeper>],
    allow_failures: bool,
    cancel: &CancellationToken,
) -> Vec<SweeperRun> {
    let mut runs = Vec::with_capacity(order.len());
    let mut halted_by: Option<String> = None;

    for sweeper in order {
        let name = sweeper.name().to_string();

        let not_run = match &halted_by {
            Some(failed) => Some(format!("sweeper '{}' failed in this region", failed)),
            None if cancel.is_cancelled() => Some("cancelled".to_string()),
            None => None,
        };

        let outcome = match not_run {
            Some(reason) => {
                warn!(
                    event = "core.runner.sweeper_not_run",
                    sweeper = name,
                    region = %region,
                    reason = reason
                );
                RunStatus::NotRun { reason }
            }
            None => match sweeper.sweep(region, cancel.clone()).await {
                Ok(SweepOutcome::Completed(report)) => RunStatus::Completed(report),
                Ok(SweepOutcome::Skipped { report, reason }) => {
                    RunStatus::Skipped { report, reason }
                }
                Err(e) => {
                    error!(
                        event = "core.runner.sweeper_failed",
                        sweeper = name,
                        region = %region,
                        error_code = e.error_code(),
                        error = %e
                    );
                    if !allow_failures {
                        halted_by = Some(name.clone());
                    }
                    RunStatus::Failed {
                        code: e.error_code(),
                        error: e.to_string(),
                    }
                }
            },
        };

        runs.push(SweeperRun {
            sweeper: name,
            region: region.to_string(),
            outcome,
        });
    }

    runs
}
