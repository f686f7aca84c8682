//! Vector math for TF-IDF scoring.

use tracing::debug;

use crate::error::SearchError;

/// Euclidean (L2) norm.
#[must_use]
pub fn l2_norm(vector: &[f64]) -> f64 {
    vector.iter().map(|v| v * v).sum::<f64>().sqrt()
}

/// Scale `vector` to unit length in place. A zero vector is left untouched.
pub fn l2_normalize(vector: &mut [f64]) {
    let norm = l2_norm(vector);
    if norm > 0.0 {
        for value in vector.iter_mut() {
            *value /= norm;
        }
    }
}

/// Cosine similarity that reports a length mismatch instead of hiding it.
///
/// Returns `Ok(0.0)` when either vector has zero norm.
///
/// # Errors
///
/// Returns [`SearchError::DimensionMismatch`] if the lengths differ.
pub fn checked_cosine_similarity(left: &[f64], right: &[f64]) -> Result<f64, SearchError> {
    if left.len() != right.len() {
        return Err(SearchError::DimensionMismatch {
            left: left.len(),
            right: right.len(),
        });
    }

    let mut dot = 0.0_f64;
    let mut left_norm_sq = 0.0_f64;
    let mut right_norm_sq = 0.0_f64;

    for (a, b) in left.iter().zip(right.iter()) {
        dot += a * b;
        left_norm_sq += a * a;
        right_norm_sq += b * b;
    }

    let denom = left_norm_sq.sqrt() * right_norm_sq.sqrt();
    if denom == 0.0 {
        return Ok(0.0);
    }

    Ok((dot / denom).clamp(-1.0, 1.0))
}

/// Cosine similarity in `[-1, 1]`.
///
/// A length mismatch means two vectors came from different fits. That is an
/// internal invariant breach, not a caller error, so it scores `0.0` and is
/// logged rather than propagated.
#[must_use]
pub fn cosine_similarity(left: &[f64], right: &[f64]) -> f64 {
    match checked_cosine_similarity(left, right) {
        Ok(score) => score,
        Err(err) => {
            debug!("scoring as 0.0: {err}");
            0.0
        }
    }
}
