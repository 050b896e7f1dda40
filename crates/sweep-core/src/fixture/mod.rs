//! File-backed fake cloud.
//!
//! A fixture is a JSON document describing the applications left behind in
//! each region. Sweeping against it exercises the whole pipeline without
//! credentials; successful deletions are written back to the file so a
//! second run sees what the first one left.
//!
//! ```json
//! {
//!   "page_size": 2,
//!   "regions": {
//!     "us-west-2": { "apps": ["tf-acc-test-1", null], "fail_delete": [], "deny": false }
//!   }
//! }
//! ```

pub mod errors;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::BoxError;
use crate::resources::app::{ApplicationPage, AppsApi};
use crate::sweep::traits::ClientProvider;
use crate::sweep::types::Region;

pub use errors::FixtureError;

/// Environment variable naming the fixture file used by the CLI.
pub const ENV_FIXTURE: &str = "SWEEP_FIXTURE";

const DEFAULT_PAGE_SIZE: usize = 100;

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureState {
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    #[serde(default)]
    pub regions: BTreeMap<String, RegionState>,
}

impl Default for FixtureState {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            regions: BTreeMap::new(),
        }
    }
}

/// Applications in one region and the faults to inject there.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionState {
    /// Listed in order. `null` entries are returned as absent names.
    #[serde(default)]
    pub apps: Vec<Option<String>>,

    /// Applications whose deletion fails with an internal error.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fail_delete: Vec<String>,

    /// Every call in this region is rejected as unauthorized.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deny: bool,
}

/// Shared fixture state plus the file it persists to.
#[derive(Debug, Clone)]
pub struct FixtureCloud {
    state: Arc<Mutex<FixtureState>>,
    path: Option<PathBuf>,
}

impl FixtureCloud {
    /// Load a fixture file; deletions will be written back to it.
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let content = fs::read_to_string(path).map_err(|source| FixtureError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        let state: FixtureState =
            serde_json::from_str(&content).map_err(|e| FixtureError::ParseFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        info!(
            event = "core.fixture.load_completed",
            path = %path.display(),
            regions = state.regions.len()
        );

        Ok(Self {
            state: Arc::new(Mutex::new(state)),
            path: Some(path.to_path_buf()),
        })
    }

    /// In-memory fixture that is never persisted.
    pub fn from_state(state: FixtureState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            path: None,
        }
    }

    pub fn snapshot(&self) -> FixtureState {
        lock(&self.state).clone()
    }

    /// Regions defined by the fixture, in name order.
    pub fn regions(&self) -> Vec<String> {
        lock(&self.state).regions.keys().cloned().collect()
    }
}

#[async_trait]
impl ClientProvider for FixtureCloud {
    type Client = FixtureClient;

    async fn regional_client(&self, region: &Region) -> Result<Arc<FixtureClient>, BoxError> {
        if !lock(&self.state).regions.contains_key(region.as_str()) {
            return Err(Box::new(FixtureError::UnknownRegion {
                region: region.to_string(),
            }));
        }

        Ok(Arc::new(FixtureClient {
            region: region.to_string(),
            state: Arc::clone(&self.state),
            path: self.path.clone(),
        }))
    }
}

/// Client bound to one fixture region.
#[derive(Debug)]
pub struct FixtureClient {
    region: String,
    state: Arc<Mutex<FixtureState>>,
    path: Option<PathBuf>,
}

impl FixtureClient {
    fn denied(&self, operation: &str) -> FixtureError {
        FixtureError::AccessDenied {
            operation: operation.to_string(),
            region: self.region.clone(),
        }
    }

    fn persist(&self, state: &FixtureState) -> Result<(), FixtureError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let content =
            serde_json::to_string_pretty(state).map_err(|e| FixtureError::SerializeFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        fs::write(path, content).map_err(|source| FixtureError::WriteFailed {
            path: path.display().to_string(),
            source,
        })
    }
}

#[async_trait]
impl AppsApi for FixtureClient {
    async fn list_applications(
        &self,
        next_token: Option<String>,
    ) -> Result<ApplicationPage, BoxError> {
        let state = lock(&self.state);
        let region = region_state(&state, &self.region)?;
        if region.deny {
            return Err(Box::new(self.denied("ListApplications")));
        }

        let start = match next_token {
            None => 0,
            Some(token) => match token.parse::<usize>() {
                Ok(offset) if offset <= region.apps.len() => offset,
                _ => return Err(Box::new(FixtureError::InvalidToken { token })),
            },
        };
        let end = (start + state.page_size.max(1)).min(region.apps.len());

        debug!(
            event = "core.fixture.list_page",
            region = %self.region,
            start = start,
            end = end
        );

        Ok(ApplicationPage {
            applications: region.apps[start..end].to_vec(),
            next_token: (end < region.apps.len()).then(|| end.to_string()),
        })
    }

    async fn delete_application(&self, name: &str) -> Result<(), BoxError> {
        let mut state = lock(&self.state);
        let mut next = state.clone();
        let region = region_state_mut(&mut next, &self.region)?;
        if region.deny {
            return Err(Box::new(self.denied("DeleteApplication")));
        }
        if region.fail_delete.iter().any(|n| n == name) {
            return Err(Box::new(FixtureError::DeleteFailed {
                name: name.to_string(),
            }));
        }

        let Some(position) = region
            .apps
            .iter()
            .position(|app| app.as_deref() == Some(name))
        else {
            return Err(Box::new(FixtureError::ApplicationNotFound {
                name: name.to_string(),
            }));
        };
        region.apps.remove(position);

        // Written under the lock so concurrent deletions persist in order.
        // Memory only changes once the file has.
        self.persist(&next)?;
        *state = next;
        Ok(())
    }
}

fn lock(state: &Mutex<FixtureState>) -> MutexGuard<'_, FixtureState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn region_state<'a>(state: &'a FixtureState, region: &str) -> Result<&'a RegionState, FixtureError> {
    state
        .regions
        .get(region)
        .ok_or_else(|| FixtureError::UnknownRegion {
            region: region.to_string(),
        })
}

fn region_state_mut<'a>(
    state: &'a mut FixtureState,
    region: &str,
) -> Result<&'a mut RegionState, FixtureError> {
    state
        .regions
        .get_mut(region)
        .ok_or_else(|| FixtureError::UnknownRegion {
            region: region.to_string(),
        })
}
