//! Seams between the sweep core and the outside world.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::errors::BoxError;
use crate::sweep::errors::SweepError;
use crate::sweep::types::{
    IdentityFormat, Page, Region, ResourceConfig, ResourceIdentifier, SweepOutcome,
};

/// Hands out region-scoped API clients.
#[async_trait]
pub trait ClientProvider: Send + Sync + 'static {
    type Client: Send + Sync + 'static;

    async fn regional_client(&self, region: &Region) -> Result<Arc<Self::Client>, BoxError>;
}

/// A kind of remote resource the sweeper knows how to list and delete.
///
/// Each supported resource type implements this trait to describe its
/// listing call, its deletion call and how its identity is composed.
#[async_trait]
pub trait ResourceKind: Send + Sync + 'static {
    type Client: Send + Sync + 'static;

    /// Registry key for this type (e.g., "cloud_app").
    fn name(&self) -> &str;

    /// Plural human description used in error messages (e.g., "deployment applications").
    fn description(&self) -> &str;

    fn identity_format(&self) -> &IdentityFormat;

    /// Fetch one page of identifiers, continuing from `next_token`.
    async fn list_page(
        &self,
        client: &Self::Client,
        next_token: Option<String>,
    ) -> Result<Page, BoxError>;

    async fn delete(&self, client: &Self::Client, config: &ResourceConfig) -> Result<(), BoxError>;

    /// Whether a deletion error means the resource was already gone.
    ///
    /// Such deletions count as done. Only this type's own not-found error
    /// should match; anything else stays a failure.
    fn is_not_found(&self, _error: &BoxError) -> bool {
        false
    }
}

/// One deletable unit handed to the orchestrator.
#[async_trait]
pub trait Sweepable: Send + Sync {
    fn identifier(&self) -> &ResourceIdentifier;

    async fn delete(&self) -> Result<(), BoxError>;

    /// Whether `error` from [`Sweepable::delete`] means someone else deleted it first.
    fn is_already_gone(&self, _error: &BoxError) -> bool {
        false
    }
}

/// Entry point registered under a name and invoked once per region.
#[async_trait]
pub trait Sweeper: Send + Sync {
    fn name(&self) -> &str;

    /// Sweepers that must run before this one in the same region.
    fn dependencies(&self) -> &[String] {
        &[]
    }

    async fn sweep(
        &self,
        region: &Region,
        cancel: CancellationToken,
    ) -> Result<SweepOutcome, SweepError>;
}
