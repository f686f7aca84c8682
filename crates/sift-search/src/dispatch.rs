//! Search mode dispatch and pagination.
//!
//! Basic and fulltext queries are delegated to the [`DocumentStore`], which
//! paginates on its side. Vector and hybrid rankings are computed here and
//! paginated in memory.
//!
//! Hybrid search degrades gracefully: if either branch fails, a warning is
//! logged and that branch contributes nothing to the fusion. Single-mode
//! failures propagate as [`SearchError::Collaborator`].

use sift_core::{DocumentStore, QueryPage, QuerySpec};
use tracing::{debug, instrument, warn};

use crate::error::SearchError;
use crate::fusion::fuse;
use crate::mode::{SearchMode, validate_mode};
use crate::types::{SearchResponse, SearchResult};
use crate::vector::{CorpusFitter, FreshFit, vector_search_with};

/// Candidates pulled from each hybrid branch, as a multiple of the page size.
pub const HYBRID_CANDIDATE_FACTOR: usize = 2;

/// Routes queries to a ranking strategy over a [`DocumentStore`].
#[derive(Debug)]
pub struct SearchService<S, F = FreshFit> {
    store: S,
    fitter: F,
}

impl<S: DocumentStore> SearchService<S> {
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self {
            store,
            fitter: FreshFit,
        }
    }
}

impl<S: DocumentStore, F: CorpusFitter> SearchService<S, F> {
    /// Use `fitter` instead of refitting from scratch on every vector query.
    #[must_use]
    pub const fn with_fitter(store: S, fitter: F) -> Self {
        Self { store, fitter }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Validate `mode` and run [`Self::search`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidMode`] for an unknown mode string, or
    /// any error [`Self::search`] returns.
    pub fn dispatch(
        &self,
        query: &str,
        mode: &str,
        page: usize,
        page_size: usize,
    ) -> Result<SearchResponse, SearchError> {
        let mode = validate_mode(mode)?;
        self.search(query, mode, page, page_size)
    }

    /// Run one search and return the requested page.
    ///
    /// `page` is 1-indexed. A blank query yields an empty page.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPagination`] if `page` or `page_size` is
    /// zero, and [`SearchError::Collaborator`] when the store fails in basic,
    /// fulltext or vector mode.
    #[instrument(skip(self))]
    pub fn search(
        &self,
        query: &str,
        mode: SearchMode,
        page: usize,
        page_size: usize,
    ) -> Result<SearchResponse, SearchError> {
        if page == 0 || page_size == 0 {
            return Err(SearchError::InvalidPagination { page, page_size });
        }

        if query.trim().is_empty() {
            debug!("blank query, returning empty page");
            return Ok(SearchResponse {
                documents: Vec::new(),
                total: 0,
                page,
                mode,
            });
        }

        let offset = (page - 1).saturating_mul(page_size);

        let (documents, total) = match mode {
            SearchMode::Basic => {
                let result = self
                    .store
                    .execute_query(&QuerySpec::Exact(query.to_string()), offset, page_size)
                    .map_err(|e| SearchError::collaborator("basic search", e))?;
                into_results(result)
            }
            SearchMode::FullText => {
                let result = self
                    .store
                    .execute_query(&QuerySpec::FullText(query.to_string()), offset, page_size)
                    .map_err(|e| SearchError::collaborator("fulltext search", e))?;
                into_results(result)
            }
            SearchMode::Vector => {
                let corpus = self
                    .store
                    .fetch_corpus()
                    .map_err(|e| SearchError::collaborator("vector search", e))?;
                let ranked = vector_search_with(&self.fitter, query, &corpus, 0);
                (paginate(ranked.results, page, page_size), ranked.total)
            }
            SearchMode::Hybrid => {
                let fused = self.hybrid(query, page_size.saturating_mul(HYBRID_CANDIDATE_FACTOR));
                let total = fused.len();
                (paginate(fused, page, page_size), total)
            }
        };

        debug!(returned = documents.len(), total, "search complete");

        Ok(SearchResponse {
            documents,
            total,
            page,
            mode,
        })
    }

    /// Fused ranking of up to `candidates` hits from each branch.
    fn hybrid(&self, query: &str, candidates: usize) -> Vec<SearchResult> {
        let fulltext = match self
            .store
            .execute_query(&QuerySpec::FullText(query.to_string()), 0, candidates)
        {
            Ok(result) => into_results(result).0,
            Err(e) => {
                warn!("fulltext branch unavailable, fusing vector results only: {e:#}");
                Vec::new()
            }
        };

        let vector = match self.store.fetch_corpus() {
            Ok(corpus) => vector_search_with(&self.fitter, query, &corpus, candidates).results,
            Err(e) => {
                warn!("vector branch unavailable, fusing fulltext results only: {e:#}");
                Vec::new()
            }
        };

        debug!(
            fulltext = fulltext.len(),
            vector = vector.len(),
            "fusing hybrid branches"
        );
        fuse(&fulltext, &vector)
    }
}

fn into_results(page: QueryPage) -> (Vec<SearchResult>, usize) {
    let results = page
        .hits
        .into_iter()
        .map(|hit| SearchResult::new(hit.document, hit.score))
        .collect();
    (results, page.total)
}

/// Slice `items` to the 1-indexed `page` of `page_size` entries.
///
/// Pages past the end are empty; the last page may be short. A `page` or
/// `page_size` of zero yields an empty page.
///
/// # Example
///
/// ```
/// use sift_search::paginate;
///
/// let items: Vec<u32> = (0..25).collect();
/// assert_eq!(paginate(items.clone(), 3, 10), (20..25).collect::<Vec<_>>());
/// assert!(paginate(items, 4, 10).is_empty());
/// ```
#[must_use]
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Vec<T> {
    if page == 0 || page_size == 0 {
        return Vec::new();
    }
    let offset = (page - 1).saturating_mul(page_size);
    items.into_iter().skip(offset).take(page_size).collect()
}
