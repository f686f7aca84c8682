//! Errors surfaced by the search layer.

use sift_core::error::ErrorCode;

use crate::mode::SearchMode;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors from search dispatch and scoring.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The mode string is not one of the supported search modes.
    #[error("invalid search mode '{value}': expected one of {}", SearchMode::valid_list())]
    InvalidMode { value: String },

    /// Page numbers are 1-indexed and page sizes must be positive.
    #[error("invalid pagination: page {page}, page size {page_size} (both must be >= 1)")]
    InvalidPagination { page: usize, page_size: usize },

    /// A document store call failed. `operation` names what was attempted,
    /// e.g. `"basic search"`.
    #[error("{operation} failed: {source}")]
    Collaborator {
        operation: &'static str,
        #[source]
        source: BoxError,
    },

    /// Similarity was requested between vectors from different fits.
    #[error("vector dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
}

impl SearchError {
    /// Wrap a store failure with the operation that triggered it.
    #[must_use]
    pub fn collaborator(operation: &'static str, source: anyhow::Error) -> Self {
        Self::Collaborator {
            operation,
            source: source.into(),
        }
    }

    /// Stable machine code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidMode { .. } => ErrorCode::InvalidMode,
            Self::InvalidPagination { .. } => ErrorCode::InvalidPagination,
            Self::Collaborator { .. } => ErrorCode::CollaboratorFailure,
            Self::DimensionMismatch { .. } => ErrorCode::InternalUnexpected,
        }
    }
}
