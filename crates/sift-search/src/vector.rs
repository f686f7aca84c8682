//! Vector search over a corpus snapshot.
//!
//! Each call fits a fresh [`TfIdfModel`] over the corpus it is handed, scores
//! every document against the query and keeps only positive similarities.
//! The fit step sits behind [`CorpusFitter`] so a cached-vocabulary strategy
//! can replace [`FreshFit`] without changing callers.

use sift_core::Document;
use tracing::{debug, instrument};

use crate::similarity::cosine_similarity;
use crate::tfidf::TfIdfModel;
use crate::types::{RankedResults, SearchResult, rank_descending};

/// Produces the model used to vectorize one corpus snapshot.
pub trait CorpusFitter {
    fn fit(&self, corpus: &[Document]) -> TfIdfModel;
}

/// Refit from scratch on every call. No state survives between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreshFit;

impl CorpusFitter for FreshFit {
    fn fit(&self, corpus: &[Document]) -> TfIdfModel {
        TfIdfModel::fit(corpus)
    }
}

/// Score every document in `corpus` against `query` with an existing model.
///
/// Documents with similarity `<= 0` are excluded. The result is sorted by
/// descending score, ties by ascending id.
#[must_use]
pub fn score_corpus(model: &TfIdfModel, query: &str, corpus: &[Document]) -> Vec<SearchResult> {
    let query_vector = model.transform(query);

    let mut results: Vec<SearchResult> = corpus
        .iter()
        .filter_map(|document| {
            let score = cosine_similarity(&query_vector, &model.transform_document(document));
            (score > 0.0).then(|| SearchResult::new(document.clone(), score))
        })
        .collect();

    rank_descending(&mut results);
    results
}

/// Rank `corpus` against `query` using a fresh fit.
///
/// `page_size == 0` disables truncation. `total` counts every positive match
/// before truncation.
#[must_use]
pub fn vector_search(query: &str, corpus: &[Document], page_size: usize) -> RankedResults {
    vector_search_with(&FreshFit, query, corpus, page_size)
}

/// [`vector_search`] with a caller-chosen fitting strategy.
#[must_use]
#[instrument(skip(fitter, corpus), fields(corpus = corpus.len()))]
pub fn vector_search_with<F>(
    fitter: &F,
    query: &str,
    corpus: &[Document],
    page_size: usize,
) -> RankedResults
where
    F: CorpusFitter + ?Sized,
{
    if corpus.is_empty() {
        return RankedResults::default();
    }

    let model = fitter.fit(corpus);
    let mut results = score_corpus(&model, query, corpus);
    let total = results.len();

    debug!(
        vocabulary = model.dimension(),
        documents = corpus.len(),
        matches = total,
        "vector search scored corpus"
    );

    if page_size > 0 {
        results.truncate(page_size);
    }

    RankedResults { results, total }
}
