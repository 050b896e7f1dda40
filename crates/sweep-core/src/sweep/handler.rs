use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::sweep::classifier::{Classification, SkipClassifier};
use crate::sweep::collector::Collector;
use crate::sweep::errors::{AggregateError, SweepError};
use crate::sweep::orchestrator::{self, OrchestrationResult, OrchestratorOptions};
use crate::sweep::pagination::{PaginationEnd, paginate};
use crate::sweep::traits::{ClientProvider, ResourceKind, Sweepable, Sweeper};
use crate::sweep::types::{Region, SweepOutcome, SweepReport};

/// Knobs shared by every resource sweeper built from one configuration.
#[derive(Debug, Clone, Default)]
pub struct SweepSettings {
    pub orchestrator: OrchestratorOptions,
    pub classifier: SkipClassifier,
    /// List and report, but delete nothing.
    pub dry_run: bool,
}

/// Sweeper for one resource kind: acquire client, list, delete, classify.
pub struct ResourceSweeper<K, P>
where
    K: ResourceKind,
    P: ClientProvider<Client = K::Client>,
{
    kind: Arc<K>,
    provider: Arc<P>,
    settings: SweepSettings,
    dependencies: Vec<String>,
}

impl<K, P> ResourceSweeper<K, P>
where
    K: ResourceKind,
    P: ClientProvider<Client = K::Client>,
{
    pub fn new(kind: K, provider: Arc<P>, settings: SweepSettings) -> Self {
        Self {
            kind: Arc::new(kind),
            provider,
            settings,
            dependencies: Vec::new(),
        }
    }

    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    pub fn kind(&self) -> &K {
        &self.kind
    }

    /// Run one full pass over `region`.
    ///
    /// Only a failure to acquire the regional client returns early; listing
    /// and deletion failures are collected, merged and classified at the end.
    pub async fn sweep_region(
        &self,
        region: &Region,
        cancel: &CancellationToken,
    ) -> Result<SweepOutcome, SweepError> {
        let name = self.kind.name();
        let description = self.kind.description();

        info!(
            event = "core.sweep.sweep_started",
            sweeper = name,
            region = %region,
            dry_run = self.settings.dry_run
        );

        let client = self.provider.regional_client(region).await.map_err(|source| {
            error!(
                event = "core.sweep.client_acquisition_failed",
                sweeper = name,
                region = %region,
                error = %source
            );
            SweepError::ClientAcquisition {
                region: region.to_string(),
                source,
            }
        })?;

        let mut errors = AggregateError::new();
        let mut collector = Collector::new(Arc::clone(&self.kind), Arc::clone(&client));

        info!(event = "core.sweep.list_started", sweeper = name, region = %region);
        let pagination = paginate(self.kind.as_ref(), client.as_ref(), cancel, |page, _| {
            collector.accept_page(page);
            true
        })
        .await;

        match pagination {
            Ok(end) => {
                info!(
                    event = "core.sweep.list_completed",
                    sweeper = name,
                    region = %region,
                    count = collector.len(),
                    skipped_entries = collector.skipped(),
                    cancelled = end == PaginationEnd::Cancelled
                );
            }
            Err(source) => {
                warn!(
                    event = "core.sweep.list_failed",
                    sweeper = name,
                    region = %region,
                    collected = collector.len(),
                    error = %source
                );
                errors.push(SweepError::Listing {
                    description: description.to_string(),
                    region: region.to_string(),
                    source,
                });
            }
        }

        let handles = collector.into_handles();
        let listed = handles.len();

        let orchestration = if self.settings.dry_run {
            for handle in &handles {
                info!(
                    event = "core.sweep.dry_run_candidate",
                    sweeper = name,
                    region = %region,
                    identifier = %handle.identifier(),
                    id = handle.config().id
                );
            }
            OrchestrationResult::default()
        } else {
            orchestrator::run(handles, &self.settings.orchestrator, cancel).await
        };

        let report = SweepReport {
            sweeper: name.to_string(),
            region: region.to_string(),
            listed,
            deleted: orchestration.deleted,
            failed: orchestration.failed(),
            abandoned: orchestration.abandoned,
            dry_run: self.settings.dry_run,
            cancelled: cancel.is_cancelled(),
        };

        if !orchestration.errors.is_empty() {
            errors.push(SweepError::Sweeping {
                description: description.to_string(),
                region: region.to_string(),
                source: orchestration.errors,
            });
        }

        if errors.is_empty() {
            info!(
                event = "core.sweep.sweep_completed",
                sweeper = name,
                region = %region,
                listed = report.listed,
                deleted = report.deleted,
                abandoned = report.abandoned,
                cancelled = report.cancelled
            );
            return Ok(SweepOutcome::Completed(report));
        }

        match self.settings.classifier.classify(&errors) {
            Classification::Skip => {
                warn!(
                    event = "core.sweep.skipped",
                    sweeper = name,
                    region = %region,
                    error = %errors
                );
                Ok(SweepOutcome::Skipped {
                    report,
                    reason: errors.to_string(),
                })
            }
            Classification::Fail => {
                error!(
                    event = "core.sweep.sweep_failed",
                    sweeper = name,
                    region = %region,
                    failed = report.failed,
                    error = %errors
                );
                Err(SweepError::Failed(errors))
            }
        }
    }
}

#[async_trait]
impl<K, P> Sweeper for ResourceSweeper<K, P>
where
    K: ResourceKind,
    P: ClientProvider<Client = K::Client>,
{
    fn name(&self) -> &str {
        self.kind.name()
    }

    fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    async fn sweep(
        &self,
        region: &Region,
        cancel: CancellationToken,
    ) -> Result<SweepOutcome, SweepError> {
        self.sweep_region(region, &cancel).await
    }
}
