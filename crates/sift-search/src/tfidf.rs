//! From-scratch TF-IDF vectorizer.
//!
//! # Fit
//!
//! ```text
//! df(t)  = number of documents whose token set contains t
//! keep t iff df(t) / N <= MAX_DF_RATIO
//! idf(t) = ln(N / df(t))
//! ```
//!
//! Retained tokens are sorted lexicographically and indexed by position, so
//! identical corpora always produce identical vector layouts.
//!
//! # Transform
//!
//! ```text
//! tf(t)  = count(t) / total tokens in text
//! v[i]   = tf(t_i) * idf[i]
//! v      = v / ||v||   (left all-zero when ||v|| = 0)
//! ```
//!
//! A [`TfIdfModel`] is an immutable value. Nothing is cached between calls;
//! callers that want reuse hold on to the model themselves.

use sift_core::Document;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::trace;

use crate::similarity::l2_normalize;
use crate::tokenize::tokenize;

/// Tokens present in a larger share of documents than this are dropped.
pub const MAX_DF_RATIO: f64 = 0.95;

/// Token → dense index mapping, in sorted-token order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    fn from_sorted(terms: Vec<String>) -> Self {
        let index = terms
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();
        Self { terms, index }
    }

    #[must_use]
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    /// Tokens in index order.
    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Result of fitting a corpus: vocabulary plus aligned IDF weights.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TfIdfModel {
    vocabulary: Vocabulary,
    idf: Vec<f64>,
    document_count: usize,
}

impl TfIdfModel {
    /// Fit over each document's title and content.
    #[must_use]
    pub fn fit(documents: &[Document]) -> Self {
        Self::fit_texts(documents.iter().map(Document::search_text))
    }

    /// Fit over raw texts, one per document.
    #[must_use]
    pub fn fit_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        let mut document_count = 0_usize;

        for text in texts {
            document_count += 1;
            let distinct: BTreeSet<String> = tokenize(text.as_ref()).into_iter().collect();
            for token in distinct {
                *document_frequency.entry(token).or_insert(0) += 1;
            }
        }

        if document_count == 0 {
            return Self::default();
        }

        #[allow(clippy::cast_precision_loss)]
        let n = document_count as f64;

        // BTreeMap iteration is already in sorted-token order.
        let (terms, idf): (Vec<String>, Vec<f64>) = document_frequency
            .into_iter()
            .filter_map(|(token, df)| {
                #[allow(clippy::cast_precision_loss)]
                let df = df as f64;
                (df / n <= MAX_DF_RATIO).then(|| (token, (n / df).ln()))
            })
            .unzip();

        trace!(
            documents = document_count,
            vocabulary = terms.len(),
            "fitted tf-idf model"
        );

        Self {
            vocabulary: Vocabulary::from_sorted(terms),
            idf,
            document_count,
        }
    }

    /// Map `text` to an L2-normalized vector of length [`Self::dimension`].
    ///
    /// Tokens outside the vocabulary are ignored.
    #[must_use]
    pub fn transform(&self, text: &str) -> Vec<f64> {
        let mut vector = vec![0.0; self.dimension()];
        let tokens = tokenize(text);
        if tokens.is_empty() || vector.is_empty() {
            return vector;
        }

        let mut counts: HashMap<&str, usize> = HashMap::with_capacity(tokens.len());
        for token in &tokens {
            *counts.entry(token.as_str()).or_insert(0) += 1;
        }

        #[allow(clippy::cast_precision_loss)]
        let total = tokens.len() as f64;
        for (token, count) in counts {
            if let Some(i) = self.vocabulary.index_of(token) {
                #[allow(clippy::cast_precision_loss)]
                let tf = count as f64 / total;
                vector[i] = tf * self.idf[i];
            }
        }

        l2_normalize(&mut vector);
        vector
    }

    #[must_use]
    pub fn transform_document(&self, document: &Document) -> Vec<f64> {
        self.transform(&document.search_text())
    }

    #[must_use]
    pub const fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// IDF weights aligned with vocabulary indices.
    #[must_use]
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// Vector length produced by [`Self::transform`].
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of documents the model was fitted on.
    #[must_use]
    pub const fn document_count(&self) -> usize {
        self.document_count
    }
}
