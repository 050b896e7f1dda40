use std::fmt;

use crate::errors::{BoxError, SweeperError};

#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    #[error("Invalid region: name cannot be empty")]
    InvalidRegion,

    #[error("error getting client for {region}: {source}")]
    ClientAcquisition {
        region: String,
        #[source]
        source: BoxError,
    },

    #[error("error describing {description} for {region}: {source}")]
    Listing {
        description: String,
        region: String,
        #[source]
        source: BoxError,
    },

    #[error("listing returned continuation token '{token}' twice")]
    RepeatedPageToken { token: String },

    #[error("error deleting '{identifier}': {source}")]
    Deletion {
        identifier: String,
        #[source]
        source: BoxError,
    },

    #[error("timed out deleting '{identifier}' after {timeout_secs}s")]
    DeletionTimedOut { identifier: String, timeout_secs: u64 },

    #[error("error sweeping {description} for {region}: {source}")]
    Sweeping {
        description: String,
        region: String,
        #[source]
        source: AggregateError,
    },

    #[error("{0}")]
    Failed(#[from] AggregateError),
}

impl SweeperError for SweepError {
    fn error_code(&self) -> &'static str {
        match self {
            SweepError::InvalidRegion => "SWEEP_INVALID_REGION",
            SweepError::ClientAcquisition { .. } => "SWEEP_CLIENT_ACQUISITION_FAILED",
            SweepError::Listing { .. } => "SWEEP_LISTING_FAILED",
            SweepError::RepeatedPageToken { .. } => "SWEEP_REPEATED_PAGE_TOKEN",
            SweepError::Deletion { .. } => "SWEEP_DELETION_FAILED",
            SweepError::DeletionTimedOut { .. } => "SWEEP_DELETION_TIMED_OUT",
            SweepError::Sweeping { .. } => "SWEEP_ORCHESTRATION_FAILED",
            SweepError::Failed(_) => "SWEEP_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, SweepError::InvalidRegion)
    }
}

/// An ordered bundle of zero or more independent sweep failures.
///
/// An empty aggregate means success; use [`AggregateError::into_result`]
/// rather than checking emptiness by hand at call sites.
#[derive(Debug, Default)]
pub struct AggregateError {
    causes: Vec<SweepError>,
}

impl AggregateError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cause: SweepError) {
        self.causes.push(cause);
    }

    pub fn extend(&mut self, other: AggregateError) {
        self.causes.extend(other.causes);
    }

    pub fn is_empty(&self) -> bool {
        self.causes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.causes.len()
    }

    pub fn causes(&self) -> &[SweepError] {
        &self.causes
    }

    pub fn into_causes(self) -> Vec<SweepError> {
        self.causes
    }

    /// Causes with nested aggregates flattened out.
    ///
    /// `Sweeping` and `Failed` wrap another aggregate; their own causes are
    /// returned in place of the wrapper.
    pub fn leaf_causes(&self) -> Vec<&SweepError> {
        let mut leaves = Vec::new();
        for cause in &self.causes {
            match cause {
                SweepError::Sweeping { source, .. } | SweepError::Failed(source) => {
                    leaves.extend(source.leaf_causes());
                }
                other => leaves.push(other),
            }
        }
        leaves
    }

    pub fn into_result(self) -> Result<(), AggregateError> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<SweepError> for AggregateError {
    fn from(cause: SweepError) -> Self {
        Self {
            causes: vec![cause],
        }
    }
}

impl FromIterator<SweepError> for AggregateError {
    fn from_iter<I: IntoIterator<Item = SweepError>>(iter: I) -> Self {
        Self {
            causes: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.causes.len() {
            0 => write!(f, "no errors occurred"),
            1 => write!(f, "1 error occurred:\n\t* {}", self.causes[0]),
            n => {
                write!(f, "{} errors occurred:", n)?;
                for cause in &self.causes {
                    write!(f, "\n\t* {}", cause)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for AggregateError {}
