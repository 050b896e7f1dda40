use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::BoxError;
use crate::sweep::traits::{ResourceKind, Sweepable};
use crate::sweep::types::{Page, ResourceConfig, ResourceIdentifier};

/// A listed resource bound to the kind and client that can delete it.
pub struct ResourceHandle<K: ResourceKind> {
    identifier: ResourceIdentifier,
    config: ResourceConfig,
    kind: Arc<K>,
    client: Arc<K::Client>,
}

impl<K: ResourceKind> ResourceHandle<K> {
    pub fn new(identifier: ResourceIdentifier, kind: Arc<K>, client: Arc<K::Client>) -> Self {
        let config = ResourceConfig::for_listed(kind.identity_format(), &identifier);
        Self {
            identifier,
            config,
            kind,
            client,
        }
    }

    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }
}

#[async_trait]
impl<K: ResourceKind> Sweepable for ResourceHandle<K> {
    fn identifier(&self) -> &ResourceIdentifier {
        &self.identifier
    }

    async fn delete(&self) -> Result<(), BoxError> {
        self.kind.delete(&self.client, &self.config).await
    }

    fn is_already_gone(&self, error: &BoxError) -> bool {
        self.kind.is_not_found(error)
    }
}

/// Accumulates handles from listing pages as they arrive.
pub struct Collector<K: ResourceKind> {
    kind: Arc<K>,
    client: Arc<K::Client>,
    handles: Vec<ResourceHandle<K>>,
    skipped: usize,
}

impl<K: ResourceKind> Collector<K> {
    pub fn new(kind: Arc<K>, client: Arc<K::Client>) -> Self {
        Self {
            kind,
            client,
            handles: Vec::new(),
            skipped: 0,
        }
    }

    pub fn accept_page(&mut self, page: &Page) {
        for entry in &page.items {
            let Some(identifier) = ResourceIdentifier::from_listed(entry.as_deref()) else {
                self.skipped += 1;
                debug!(
                    event = "core.sweep.collect_entry_skipped",
                    kind = self.kind.name()
                );
                continue;
            };
            self.handles.push(ResourceHandle::new(
                identifier,
                Arc::clone(&self.kind),
                Arc::clone(&self.client),
            ));
        }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Number of absent or blank entries dropped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn into_handles(self) -> Vec<ResourceHandle<K>> {
        self.handles
    }
}

/// Build handles for every usable entry of `pages`, in discovery order.
pub fn collect<'a, K: ResourceKind>(
    kind: Arc<K>,
    client: Arc<K::Client>,
    pages: impl IntoIterator<Item = &'a Page>,
) -> Vec<ResourceHandle<K>> {
    let mut collector = Collector::new(kind, client);
    for page in pages {
        collector.accept_page(page);
    }
    collector.into_handles()
}
