//! Max-normalization of result scores.

use crate::types::SearchResult;

/// Divide every score by the maximum score when that maximum is positive.
///
/// Returns a new list; `results` itself is never modified. When the maximum
/// is `<= 0` (or the list is empty) scores are copied through unchanged.
#[must_use]
pub fn normalize(results: &[SearchResult]) -> Vec<SearchResult> {
    let max = results
        .iter()
        .map(|r| r.score)
        .fold(f64::NEG_INFINITY, f64::max);

    if max > 0.0 {
        results
            .iter()
            .map(|r| SearchResult::new(r.document.clone(), r.score / max))
            .collect()
    } else {
        results.to_vec()
    }
}
