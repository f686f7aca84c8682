//! Property tests for the vector and fusion layers.

use proptest::prelude::*;
use sift_core::Document;
use sift_search::fusion::{fuse, normalize};
use sift_search::similarity::l2_norm;
use sift_search::{SearchResult, TfIdfModel, cosine_similarity, tokenize, vector_search};
use std::collections::HashSet;

const WORDS: &[&str] = &[
    "red", "car", "blue", "sky", "fast", "clear", "rust", "borrow", "кошка", "дом", "42", "night",
];

fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 0..8).prop_map(|words| words.join(" "))
}

fn arb_corpus() -> impl Strategy<Value = Vec<Document>> {
    prop::collection::vec((arb_text(), arb_text()), 0..12).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (title, content))| {
                Document::new(i64::try_from(i).unwrap_or(i64::MAX), title, content, "")
            })
            .collect()
    })
}

fn arb_results() -> impl Strategy<Value = Vec<SearchResult>> {
    prop::collection::vec((0_i64..20, 0.0_f64..50.0), 0..15).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(id, score)| SearchResult::new(Document::new(id, "t", "c", ""), score))
            .collect()
    })
}

proptest! {
    #[test]
    fn tokens_are_lowercase_and_long_enough(text in "\\PC{0,64}") {
        for token in tokenize(&text) {
            prop_assert!(token.chars().count() >= 2);
            prop_assert_eq!(token.to_lowercase(), token.clone());
        }
    }

    #[test]
    fn fitting_is_deterministic(corpus in arb_corpus()) {
        prop_assert_eq!(TfIdfModel::fit(&corpus), TfIdfModel::fit(&corpus));
    }

    #[test]
    fn transformed_vectors_are_unit_or_zero(corpus in arb_corpus(), query in arb_text()) {
        let model = TfIdfModel::fit(&corpus);
        let v = model.transform(&query);
        prop_assert_eq!(v.len(), model.dimension());
        let norm = l2_norm(&v);
        prop_assert!(norm == 0.0 || (norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn cosine_is_symmetric_and_bounded(corpus in arb_corpus(), a in arb_text(), b in arb_text()) {
        let model = TfIdfModel::fit(&corpus);
        let (va, vb) = (model.transform(&a), model.transform(&b));
        let ab = cosine_similarity(&va, &vb);
        prop_assert!((ab - cosine_similarity(&vb, &va)).abs() < 1e-12);
        prop_assert!((-1.0..=1.0).contains(&ab));
    }

    #[test]
    fn vector_results_are_positive_and_sorted(corpus in arb_corpus(), query in arb_text()) {
        let ranked = vector_search(&query, &corpus, 0);
        prop_assert_eq!(ranked.total, ranked.results.len());
        prop_assert!(ranked.results.iter().all(|r| r.score > 0.0));
        for pair in ranked.results.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn normalized_scores_stay_in_unit_interval(results in arb_results()) {
        let normalized = normalize(&results);
        prop_assert_eq!(normalized.len(), results.len());
        let any_positive = results.iter().any(|r| r.score > 0.0);
        for (before, after) in results.iter().zip(&normalized) {
            prop_assert_eq!(before.id(), after.id());
            if any_positive {
                prop_assert!((0.0..=1.0).contains(&after.score));
            } else {
                prop_assert_eq!(before.score, after.score);
            }
        }
    }

    #[test]
    fn fusion_yields_unique_ids_in_score_order(fulltext in arb_results(), vector in arb_results()) {
        let fused = fuse(&fulltext, &vector);
        let unique: HashSet<i64> = fused.iter().map(SearchResult::id).collect();
        prop_assert_eq!(unique.len(), fused.len());

        let expected: HashSet<i64> = fulltext.iter().chain(&vector).map(SearchResult::id).collect();
        prop_assert_eq!(unique, expected);

        for pair in fused.windows(2) {
            prop_assert!(pair[0].score > pair[1].score
                || (pair[0].score == pair[1].score && pair[0].id() < pair[1].id()));
        }
    }
}
