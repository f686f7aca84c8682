//! Search modes and mode-string validation.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::SearchError;

/// Ranking strategy used for a search call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Exact phrase matching, executed by the document store.
    Basic,
    /// The store's full-text query language.
    #[serde(rename = "fulltext")]
    FullText,
    /// TF-IDF cosine similarity over the full corpus.
    Vector,
    /// Weighted fusion of full-text and vector rankings.
    Hybrid,
}

impl SearchMode {
    pub const ALL: [Self; 4] = [Self::Basic, Self::FullText, Self::Vector, Self::Hybrid];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::FullText => "fulltext",
            Self::Vector => "vector",
            Self::Hybrid => "hybrid",
        }
    }

    /// Comma-separated list of valid mode names, for error messages.
    #[must_use]
    pub fn valid_list() -> String {
        Self::ALL
            .iter()
            .map(|mode| mode.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| SearchError::InvalidMode {
                value: s.to_string(),
            })
    }
}

/// Validate a mode string. Matching is exact: no trimming, no case folding.
///
/// # Errors
///
/// Returns [`SearchError::InvalidMode`] naming the rejected value.
pub fn validate_mode(mode: &str) -> Result<SearchMode, SearchError> {
    mode.parse()
}
