use crate::errors::error_chain_text;
use crate::sweep::errors::AggregateError;

/// Message fragments that mean "this sweeper cannot run here", not "cleanup failed".
pub const DEFAULT_BENIGN_SIGNATURES: &[&str] = &[
    "AccessDenied",
    "AccessDeniedException",
    "UnauthorizedOperation",
    "UnsupportedOperation",
    "InvalidAction",
    "UnknownOperationException",
    "is not supported in this region",
    "is not available in this region",
    "not authorized to perform",
    "Forbidden",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Treat the sweep as a successful no-op.
    Skip,
    /// Surface the aggregated error unchanged.
    Fail,
}

#[derive(Debug, Clone)]
pub struct SkipClassifier {
    signatures: Vec<String>,
}

impl Default for SkipClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_BENIGN_SIGNATURES.iter().copied())
    }
}

impl SkipClassifier {
    pub fn new<I, S>(signatures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            signatures: signatures.into_iter().map(Into::into).collect(),
        }
    }

    /// Add host-supplied signatures on top of the current ones.
    pub fn with_additional<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for signature in extra {
            let signature = signature.into();
            if !signature.is_empty() && !self.signatures.contains(&signature) {
                self.signatures.push(signature);
            }
        }
        self
    }

    pub fn signatures(&self) -> &[String] {
        &self.signatures
    }

    /// Whether any signature appears in the error or its sources.
    pub fn matches(&self, error: &(dyn std::error::Error + 'static)) -> bool {
        let text = error_chain_text(error);
        self.signatures.iter().any(|s| text.contains(s.as_str()))
    }

    /// Skip only when there is at least one cause and every cause is benign.
    pub fn classify(&self, errors: &AggregateError) -> Classification {
        let leaves = errors.leaf_causes();
        if !leaves.is_empty() && leaves.iter().all(|cause| self.matches(*cause)) {
            Classification::Skip
        } else {
            Classification::Fail
        }
    }
}
