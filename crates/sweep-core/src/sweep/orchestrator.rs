use std::pin::pin;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::sweep::errors::{AggregateError, SweepError};
use crate::sweep::traits::Sweepable;

pub const DEFAULT_CONCURRENCY: usize = 10;
pub const DEFAULT_DELETE_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorOptions {
    /// Maximum number of deletions in flight at once.
    pub concurrency: usize,
    /// Upper bound for a single deletion call.
    pub delete_timeout: Duration,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            delete_timeout: DEFAULT_DELETE_TIMEOUT,
        }
    }
}

#[derive(Debug, Default)]
pub struct OrchestrationResult {
    pub deleted: usize,
    pub errors: AggregateError,
    /// Handles that were never dispatched or were interrupted by cancellation.
    pub abandoned: usize,
}

impl OrchestrationResult {
    pub fn failed(&self) -> usize {
        self.errors.len()
    }
}

enum DeleteOutcome {
    Deleted,
    AlreadyGone,
    Failed(SweepError),
    Interrupted,
}

/// Delete every handle, at most `options.concurrency` at a time.
///
/// A failing deletion never stops its siblings; each failure becomes one
/// cause of `errors`. Cancelling `cancel` stops dispatch and interrupts
/// deletions still in flight; those count as abandoned, not as failures.
pub async fn run<S: Sweepable>(
    handles: Vec<S>,
    options: &OrchestratorOptions,
    cancel: &CancellationToken,
) -> OrchestrationResult {
    let total = handles.len();
    let mut result = OrchestrationResult::default();

    if total == 0 {
        info!(event = "core.sweep.orchestrate_empty");
        return result;
    }

    info!(
        event = "core.sweep.orchestrate_started",
        handles = total,
        concurrency = options.concurrency
    );

    let timeout = options.delete_timeout;
    let mut outcomes = pin!(
        stream::iter(handles)
            .take_until(cancel.cancelled())
            .map(|handle| delete_one(handle, timeout, cancel))
            .buffer_unordered(options.concurrency.max(1))
    );

    let mut dispatched = 0usize;
    while let Some(outcome) = outcomes.next().await {
        dispatched += 1;
        match outcome {
            DeleteOutcome::Deleted | DeleteOutcome::AlreadyGone => result.deleted += 1,
            DeleteOutcome::Failed(e) => result.errors.push(e),
            DeleteOutcome::Interrupted => result.abandoned += 1,
        }
    }
    result.abandoned += total - dispatched;

    if result.abandoned > 0 {
        warn!(
            event = "core.sweep.orchestrate_cancelled",
            abandoned = result.abandoned
        );
    }

    info!(
        event = "core.sweep.orchestrate_completed",
        deleted = result.deleted,
        failed = result.failed(),
        abandoned = result.abandoned
    );

    result
}

async fn delete_one<S: Sweepable>(
    handle: S,
    timeout: Duration,
    cancel: &CancellationToken,
) -> DeleteOutcome {
    let identifier = handle.identifier().to_string();
    info!(event = "core.sweep.delete_started", identifier = identifier);

    let attempt = tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        attempt = tokio::time::timeout(timeout, handle.delete()) => Some(attempt),
    };

    match attempt {
        None => {
            warn!(event = "core.sweep.delete_interrupted", identifier = identifier);
            DeleteOutcome::Interrupted
        }
        Some(Ok(Ok(()))) => {
            info!(event = "core.sweep.delete_completed", identifier = identifier);
            DeleteOutcome::Deleted
        }
        Some(Ok(Err(e))) if handle.is_already_gone(&e) => {
            // Another sweeper or a test teardown got there first
            info!(
                event = "core.sweep.delete_race_condition",
                identifier = identifier,
                error = %e
            );
            DeleteOutcome::AlreadyGone
        }
        Some(Ok(Err(e))) => {
            error!(
                event = "core.sweep.delete_failed",
                identifier = identifier,
                error = %e
            );
            DeleteOutcome::Failed(SweepError::Deletion {
                identifier,
                source: e,
            })
        }
        Some(Err(_)) => {
            error!(
                event = "core.sweep.delete_failed",
                identifier = identifier,
                error_type = "timeout",
                timeout_secs = timeout.as_secs()
            );
            DeleteOutcome::Failed(SweepError::DeletionTimedOut {
                identifier,
                timeout_secs: timeout.as_secs(),
            })
        }
    }
}
