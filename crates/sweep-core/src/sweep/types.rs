use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sweep::errors::SweepError;

/// Deployment region targeted by a sweep.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Region(String);

impl Region {
    pub fn new(name: impl Into<String>) -> Result<Self, SweepError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(SweepError::InvalidRegion);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Provider-assigned name of a listed remote object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceIdentifier(String);

impl ResourceIdentifier {
    /// Build an identifier from a raw listing entry.
    ///
    /// Returns `None` for absent or blank entries, which listings occasionally contain.
    pub fn from_listed(entry: Option<&str>) -> Option<Self> {
        let entry = entry?;
        if entry.trim().is_empty() {
            return None;
        }
        Some(Self(entry.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a resource type composes its identity from a listed name.
///
/// The prefix stands in for the part of a composite ID that is unknown at
/// listing time (an account fragment, for instance).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityFormat {
    pub prefix: String,
}

impl IdentityFormat {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn compose(&self, identifier: &ResourceIdentifier) -> String {
        format!("{}:{}", self.prefix, identifier)
    }
}

/// Configuration of one resource as known right after listing.
///
/// Only identity and name are populated; `attributes` is filled in by a
/// later read if a resource type needs more than its name to delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceConfig {
    pub id: String,
    pub name: String,
    pub attributes: BTreeMap<String, String>,
}

impl ResourceConfig {
    pub fn for_listed(format: &IdentityFormat, identifier: &ResourceIdentifier) -> Self {
        Self {
            id: format.compose(identifier),
            name: identifier.as_str().to_string(),
            attributes: BTreeMap::new(),
        }
    }
}

/// One page of a listing response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub items: Vec<Option<String>>,
    /// Continuation token; `None` marks the last page.
    pub next_token: Option<String>,
}

impl Page {
    pub fn new(items: Vec<Option<String>>, next_token: Option<String>) -> Self {
        Self { items, next_token }
    }

    pub fn last(items: Vec<Option<String>>) -> Self {
        Self::new(items, None)
    }

    pub fn is_last(&self) -> bool {
        self.next_token.is_none()
    }
}

/// Counters for a single sweeper pass over one region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub sweeper: String,
    pub region: String,
    pub listed: usize,
    pub deleted: usize,
    pub failed: usize,
    /// Handles never dispatched or interrupted by cancellation.
    pub abandoned: usize,
    pub dry_run: bool,
    pub cancelled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SweepOutcome {
    Completed(SweepReport),
    Skipped { report: SweepReport, reason: String },
}

impl SweepOutcome {
    pub fn report(&self) -> &SweepReport {
        match self {
            SweepOutcome::Completed(report) => report,
            SweepOutcome::Skipped { report, .. } => report,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, SweepOutcome::Skipped { .. })
    }
}
