//! Graceful degradation tests for search dispatch.
//!
//! # Scenarios covered
//!
//! 1. **Single modes propagate store failures**: basic, fulltext and vector
//!    return a `Collaborator` error naming the failed operation.
//! 2. **Hybrid survives a failed full-text branch**: vector results are
//!    fused alone at the vector weight.
//! 3. **Hybrid survives a failed corpus fetch**: full-text results are fused
//!    alone at the full-text weight.
//! 4. **Hybrid with both branches down**: an empty page, not an error.

use anyhow::{Result, bail};
use sift_core::error::ErrorCode;
use sift_core::{Document, DocumentStore, QueryPage, QuerySpec, SqliteStore};
use sift_search::{SearchError, SearchMode, SearchResult, SearchService};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Wraps a real store and fails whichever operations are switched off.
struct Flaky {
    inner: SqliteStore,
    corpus_down: bool,
    query_down: bool,
}

impl Flaky {
    fn new(corpus_down: bool, query_down: bool) -> Self {
        let mut inner = SqliteStore::open_in_memory().expect("open store");
        inner
            .upsert_all(&[
                Document::new(1, "Fix authentication timeout", "OAuth fails under load", ""),
                Document::new(2, "Connection pool exhaustion", "Pool exhausts under write load", ""),
                Document::new(3, "README cleanup", "Documentation spelling fixes", ""),
            ])
            .expect("seed store");
        Self {
            inner,
            corpus_down,
            query_down,
        }
    }
}

impl DocumentStore for Flaky {
    fn fetch_corpus(&self) -> Result<Vec<Document>> {
        if self.corpus_down {
            bail!("database is locked");
        }
        self.inner.fetch_corpus()
    }

    fn execute_query(&self, spec: &QuerySpec, offset: usize, limit: usize) -> Result<QueryPage> {
        if self.query_down {
            bail!("no such table: documents_fts");
        }
        self.inner.execute_query(spec, offset, limit)
    }
}

fn ids(results: &[SearchResult]) -> Vec<i64> {
    results.iter().map(SearchResult::id).collect()
}

// ---------------------------------------------------------------------------
// Single modes
// ---------------------------------------------------------------------------

#[test]
fn single_modes_propagate_store_failures() {
    let service = SearchService::new(Flaky::new(true, true));

    for (mode, operation) in [
        (SearchMode::Basic, "basic search"),
        (SearchMode::FullText, "fulltext search"),
        (SearchMode::Vector, "vector search"),
    ] {
        let err = service
            .search("authentication", mode, 1, 10)
            .expect_err("store is down");
        assert!(
            err.to_string().starts_with(&format!("{operation} failed")),
            "unexpected message for {mode}: {err}"
        );
        assert_eq!(err.code(), ErrorCode::CollaboratorFailure);
    }
}

#[test]
fn collaborator_error_keeps_the_underlying_cause() {
    let service = SearchService::new(Flaky::new(true, false));
    let err = service
        .search("load", SearchMode::Vector, 1, 10)
        .expect_err("corpus fetch fails");
    match err {
        SearchError::Collaborator { operation, source } => {
            assert_eq!(operation, "vector search");
            assert!(source.to_string().contains("database is locked"));
        }
        other => panic!("expected collaborator error, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Hybrid
// ---------------------------------------------------------------------------

#[test]
fn hybrid_falls_back_to_vector_when_fulltext_fails() {
    let service = SearchService::new(Flaky::new(false, true));
    let response = service
        .search("authentication timeout", SearchMode::Hybrid, 1, 10)
        .expect("hybrid degrades");

    assert_eq!(ids(&response.documents), vec![1]);
    assert!((response.documents[0].score - 0.4).abs() < 1e-9);
    assert_eq!(response.total, 1);
}

#[test]
fn hybrid_falls_back_to_fulltext_when_corpus_fetch_fails() {
    let service = SearchService::new(Flaky::new(true, false));
    let response = service
        .search("load", SearchMode::Hybrid, 1, 10)
        .expect("hybrid degrades");

    let mut found = ids(&response.documents);
    found.sort_unstable();
    assert_eq!(found, vec![1, 2]);
    assert!((response.documents[0].score - 0.6).abs() < 1e-9);
}

#[test]
fn hybrid_with_both_branches_down_is_empty_not_an_error() {
    let service = SearchService::new(Flaky::new(true, true));
    let response = service
        .search("anything", SearchMode::Hybrid, 1, 10)
        .expect("hybrid never fails on store errors");
    assert!(response.documents.is_empty());
    assert_eq!(response.total, 0);
    assert_eq!(response.mode, SearchMode::Hybrid);
}

#[test]
fn hybrid_degraded_queries_do_not_panic() {
    let service = SearchService::new(Flaky::new(false, true));
    for query in ["a", "zzz", "привет мир", "42", "!!!", "load load load"] {
        let response = service
            .search(query, SearchMode::Hybrid, 1, 5)
            .expect("degraded hybrid");
        assert!(response.documents.len() <= 5);
    }
}
