//! Scripted collaborators shared by the sweep unit tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::errors::BoxError;
use crate::sweep::traits::{ClientProvider, ResourceKind};
use crate::sweep::types::{IdentityFormat, Page, Region, ResourceConfig};

pub(crate) struct NoClient;

/// Resource kind that serves pre-baked pages and records deletions.
///
/// Page `i` carries continuation token `i + 1` unless it is the last one.
pub(crate) struct ScriptedKind {
    pub format: IdentityFormat,
    pub pages: Vec<Page>,
    pub fail_listing_at: Option<usize>,
    pub listing_error: String,
    pub fail_deletes: HashSet<String>,
    pub list_calls: AtomicUsize,
    pub deleted: Mutex<Vec<String>>,
}

impl ScriptedKind {
    pub fn with_pages(pages: Vec<Vec<Option<&str>>>) -> Self {
        let count = pages.len();
        let pages = pages
            .into_iter()
            .enumerate()
            .map(|(index, entries)| {
                let next_token = (index + 1 < count).then(|| (index + 1).to_string());
                Page::new(items(&entries), next_token)
            })
            .collect();

        Self {
            format: IdentityFormat::new("xxxx"),
            pages,
            fail_listing_at: None,
            listing_error: "ThrottlingException: Rate exceeded".to_string(),
            fail_deletes: HashSet::new(),
            list_calls: AtomicUsize::new(0),
            deleted: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_listing_at(mut self, page: usize, message: &str) -> Self {
        self.fail_listing_at = Some(page);
        self.listing_error = message.to_string();
        self
    }

    pub fn failing_deletes(mut self, names: &[&str]) -> Self {
        self.fail_deletes = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResourceKind for ScriptedKind {
    type Client = NoClient;

    fn name(&self) -> &str {
        "scripted"
    }

    fn description(&self) -> &str {
        "scripted resources"
    }

    fn identity_format(&self) -> &IdentityFormat {
        &self.format
    }

    async fn list_page(
        &self,
        _client: &NoClient,
        next_token: Option<String>,
    ) -> Result<Page, BoxError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let index = match next_token {
            Some(token) => token.parse::<usize>()?,
            None => 0,
        };
        if self.fail_listing_at == Some(index) {
            return Err(self.listing_error.clone().into());
        }
        Ok(self.pages.get(index).cloned().unwrap_or_default())
    }

    async fn delete(&self, _client: &NoClient, config: &ResourceConfig) -> Result<(), BoxError> {
        if self.fail_deletes.contains(&config.name) {
            return Err(format!("InternalFailure: cannot delete {}", config.name).into());
        }
        self.deleted.lock().unwrap().push(config.name.clone());
        Ok(())
    }
}

pub(crate) struct StaticProvider {
    pub fail_with: Option<String>,
    pub calls: AtomicUsize,
}

impl StaticProvider {
    pub fn ok() -> Self {
        Self {
            fail_with: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ClientProvider for StaticProvider {
    type Client = NoClient;

    async fn regional_client(&self, _region: &Region) -> Result<Arc<NoClient>, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.fail_with {
            Some(message) => Err(message.clone().into()),
            None => Ok(Arc::new(NoClient)),
        }
    }
}

pub(crate) fn items(entries: &[Option<&str>]) -> Vec<Option<String>> {
    entries.iter().map(|e| e.map(|s| s.to_string())).collect()
}
