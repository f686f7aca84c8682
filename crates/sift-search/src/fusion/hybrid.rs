//! Weighted score fusion across the full-text and vector layers.
//!
//! ```text
//! fused(d) = 0.6 * ft(d) / max(ft) + 0.4 * vec(d) / max(vec)
//! ```
//!
//! A document found by only one layer keeps that layer's weighted score; it
//! is not penalized for being absent from the other.

use std::collections::HashMap;

use crate::fusion::normalize::normalize;
use crate::types::{SearchResult, rank_descending};

/// Weight applied to normalized full-text scores.
pub const FULLTEXT_WEIGHT: f64 = 0.6;
/// Weight applied to normalized vector scores.
pub const VECTOR_WEIGHT: f64 = 0.4;

/// Per-layer weights used by [`fuse_weighted`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusionWeights {
    pub fulltext: f64,
    pub vector: f64,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            fulltext: FULLTEXT_WEIGHT,
            vector: VECTOR_WEIGHT,
        }
    }
}

/// Fuse full-text and vector results with the default 0.6 / 0.4 weights.
///
/// # Example
///
/// ```
/// use sift_core::Document;
/// use sift_search::fusion::fuse;
/// use sift_search::SearchResult;
///
/// let doc = |id| Document::new(id, "t", "c", "");
/// let fulltext = vec![SearchResult::new(doc(1), 12.0), SearchResult::new(doc(2), 6.0)];
/// let vector = vec![SearchResult::new(doc(2), 0.8)];
///
/// let fused = fuse(&fulltext, &vector);
/// assert_eq!(fused[0].id(), 2); // 0.6 * 0.5 + 0.4 * 1.0 = 0.7
/// assert_eq!(fused[1].id(), 1); // 0.6 * 1.0
/// ```
#[must_use]
pub fn fuse(fulltext: &[SearchResult], vector: &[SearchResult]) -> Vec<SearchResult> {
    fuse_weighted(fulltext, vector, FusionWeights::default())
}

/// Fuse two result lists by document id with explicit weights.
///
/// Both inputs are normalized independently first. The output holds each
/// document id at most once, sorted by fused score descending with ties
/// broken by ascending id.
#[must_use]
pub fn fuse_weighted(
    fulltext: &[SearchResult],
    vector: &[SearchResult],
    weights: FusionWeights,
) -> Vec<SearchResult> {
    let mut fused: HashMap<i64, SearchResult> = HashMap::with_capacity(fulltext.len() + vector.len());

    // Seed from full-text. Inputs arrive best-first, so the first occurrence
    // of a repeated id is the one kept.
    for result in normalize(fulltext) {
        let weighted = result.score * weights.fulltext;
        fused
            .entry(result.id())
            .or_insert_with(|| SearchResult::new(result.document, weighted));
    }

    for result in normalize(vector) {
        let contribution = result.score * weights.vector;
        fused
            .entry(result.id())
            .and_modify(|existing| existing.score += contribution)
            .or_insert_with(|| SearchResult::new(result.document, contribution));
    }

    let mut out: Vec<SearchResult> = fused.into_values().collect();
    rank_descending(&mut out);
    out
}
