#![forbid(unsafe_code)]
//! sift-search library.
//!
//! TF-IDF vector search, score normalization and weighted fusion, and the
//! search-mode dispatcher that ties them to a [`sift_core::DocumentStore`].
//!
//! # Conventions
//!
//! - **Errors**: [`SearchError`] at the public boundary; store failures arrive
//!   as `anyhow::Error` and are wrapped with the operation that failed.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod dispatch;
pub mod error;
pub mod fusion;
pub mod mode;
pub mod similarity;
pub mod tfidf;
pub mod tokenize;
pub mod types;
pub mod vector;

pub use dispatch::{SearchService, paginate};
pub use error::SearchError;
pub use mode::{SearchMode, validate_mode};
pub use similarity::{checked_cosine_similarity, cosine_similarity};
pub use tfidf::{TfIdfModel, Vocabulary};
pub use tokenize::tokenize;
pub use types::{RankedResults, SearchResponse, SearchResult};
pub use vector::{CorpusFitter, FreshFit, vector_search, vector_search_with};
