//! Fusion of full-text and vector rankings into one result list.
//!
//! The two sources score on unrelated scales (BM25 vs cosine), so each side
//! is max-normalized into `[0, 1]` before the fixed weights are applied.

pub mod hybrid;
pub mod normalize;

pub use hybrid::{FULLTEXT_WEIGHT, FusionWeights, VECTOR_WEIGHT, fuse, fuse_weighted};
pub use normalize::normalize;
