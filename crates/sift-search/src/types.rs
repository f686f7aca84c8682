//! Result types shared by every search strategy.

use serde::Serialize;
use sift_core::Document;
use std::cmp::Ordering;

use crate::mode::SearchMode;

/// A document paired with its relevance score (`>= 0`, larger is better).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub document: Document,
    pub score: f64,
}

impl SearchResult {
    #[must_use]
    pub const fn new(document: Document, score: f64) -> Self {
        Self { document, score }
    }

    #[must_use]
    pub const fn id(&self) -> i64 {
        self.document.id
    }
}

/// One page of results for a search call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    pub documents: Vec<SearchResult>,
    /// Number of matches across all pages.
    pub total: usize,
    pub page: usize,
    pub mode: SearchMode,
}

/// A ranked result list plus the match count before any truncation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RankedResults {
    pub results: Vec<SearchResult>,
    pub total: usize,
}

/// Score descending, then document id ascending.
pub(crate) fn by_score_desc(a: &SearchResult, b: &SearchResult) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.document.id.cmp(&b.document.id))
}

/// Sort results by descending score with a deterministic id tie-break.
pub(crate) fn rank_descending(results: &mut [SearchResult]) {
    results.sort_by(by_score_desc);
}
