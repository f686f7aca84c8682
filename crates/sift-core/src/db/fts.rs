//! Exact-phrase and FTS5/BM25 queries over the document store.
//!
//! # Column Weights (BM25)
//!
//! | Column  | Weight | Rationale                          |
//! |---------|--------|------------------------------------|
//! | title   | 3.0    | Short, high signal                 |
//! | content | 1.0    | Body text                          |
//! | url     | 0.0    | Indexed for `url:` filters only    |
//!
//! SQLite's `bm25()` returns lower-is-better negative numbers. Hits returned
//! from here carry the negated value so every score is `>= 0` and larger
//! means a better match.

use anyhow::{Context, Result};
use rusqlite::{Connection, Row, params};

use super::documents::document_from_row;
use crate::model::document::Document;

pub const BM25_WEIGHT_TITLE: f64 = 3.0;
pub const BM25_WEIGHT_CONTENT: f64 = 1.0;
pub const BM25_WEIGHT_URL: f64 = 0.0;

/// Score awarded by exact matching when the phrase occurs in the title.
pub const EXACT_TITLE_SCORE: f64 = 2.0;
/// Score awarded by exact matching when the phrase occurs in the content.
pub const EXACT_CONTENT_SCORE: f64 = 1.0;

fn sql_int(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn scored_from_row(row: &Row<'_>) -> rusqlite::Result<(Document, f64)> {
    Ok((document_from_row(row)?, row.get(4)?))
}

/// Search the FTS5 index with BM25 ranking and column weights.
///
/// `query` uses FTS5 syntax: stemming, prefix `term*`, `AND`/`OR`/`NOT`,
/// quoted phrases and column filters.
///
/// # Errors
///
/// Returns an error if the FTS5 query is malformed or the database is
/// not properly initialized.
pub fn search_bm25(
    conn: &Connection,
    query: &str,
    offset: usize,
    limit: usize,
) -> Result<Vec<(Document, f64)>> {
    let sql = "SELECT d.id, d.title, d.content, d.url, bm25(documents_fts, ?1, ?2, ?3) AS rank \
               FROM documents_fts f \
               INNER JOIN documents d ON d.id = f.rowid \
               WHERE documents_fts MATCH ?4 \
               ORDER BY rank, d.id \
               LIMIT ?5 OFFSET ?6";

    let mut stmt = conn
        .prepare(sql)
        .context("prepare FTS5 BM25 search query")?;

    let rows = stmt
        .query_map(
            params![
                BM25_WEIGHT_TITLE,
                BM25_WEIGHT_CONTENT,
                BM25_WEIGHT_URL,
                query,
                sql_int(limit),
                sql_int(offset),
            ],
            scored_from_row,
        )
        .with_context(|| format!("execute FTS5 search for '{query}'"))?;

    let mut hits = Vec::new();
    for row in rows {
        let (doc, rank) = row.context("read FTS5 search hit")?;
        hits.push((doc, (-rank).max(0.0)));
    }
    Ok(hits)
}

/// Number of documents matching an FTS5 query.
///
/// # Errors
///
/// Returns an error if the FTS5 query is malformed.
pub fn count_bm25(conn: &Connection, query: &str) -> Result<usize> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM documents_fts WHERE documents_fts MATCH ?1",
            [query],
            |row| row.get(0),
        )
        .with_context(|| format!("count FTS5 matches for '{query}'"))?;
    Ok(usize::try_from(count).unwrap_or(0))
}

/// Case-insensitive phrase containment over title and content.
///
/// Both sides are folded with full Unicode lower-casing, so Cyrillic and
/// accented Latin match regardless of case.
///
/// A title hit scores [`EXACT_TITLE_SCORE`], a content hit
/// [`EXACT_CONTENT_SCORE`]; both add up. Results are ordered by score
/// descending, then id ascending.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn search_exact(
    conn: &Connection,
    phrase: &str,
    offset: usize,
    limit: usize,
) -> Result<Vec<(Document, f64)>> {
    let folded = phrase.to_lowercase();
    let sql = "SELECT id, title, content, url, \
                   (CASE WHEN instr(sift_fold(title), ?1) > 0 THEN ?2 ELSE 0.0 END) + \
                   (CASE WHEN instr(sift_fold(content), ?1) > 0 THEN ?3 ELSE 0.0 END) AS score \
               FROM documents \
               WHERE instr(sift_fold(title), ?1) > 0 OR instr(sift_fold(content), ?1) > 0 \
               ORDER BY score DESC, id ASC \
               LIMIT ?4 OFFSET ?5";

    let mut stmt = conn.prepare(sql).context("prepare exact match query")?;
    let rows = stmt
        .query_map(
            params![
                folded,
                EXACT_TITLE_SCORE,
                EXACT_CONTENT_SCORE,
                sql_int(limit),
                sql_int(offset)
            ],
            scored_from_row,
        )
        .with_context(|| format!("execute exact match for '{phrase}'"))?;

    let mut hits = Vec::new();
    for row in rows {
        hits.push(row.context("read exact match hit")?);
    }
    Ok(hits)
}

/// Number of documents containing `phrase` in title or content.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_exact(conn: &Connection, phrase: &str) -> Result<usize> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM documents \
             WHERE instr(sift_fold(title), ?1) > 0 OR instr(sift_fold(content), ?1) > 0",
            [phrase.to_lowercase()],
            |row| row.get(0),
        )
        .with_context(|| format!("count exact matches for '{phrase}'"))?;
    Ok(usize::try_from(count).unwrap_or(0))
}

/// Return the number of rows in the FTS5 index.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn fts_row_count(conn: &Connection) -> Result<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM documents_fts", [], |row| row.get(0))
        .context("count FTS5 rows")?;
    Ok(usize::try_from(count).unwrap_or(0))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::documents::{delete_document, upsert_document, upsert_documents};
    use crate::db::open_in_memory;

    fn seeded() -> Connection {
        let mut conn = open_in_memory().expect("store");
        upsert_documents(
            &mut conn,
            &[
                Document::new(1, "Authentication timeout", "Login fails after 30 seconds", ""),
                Document::new(2, "Database pool", "Authentication tokens cached in pool", ""),
                Document::new(3, "README cleanup", "Fix typos in docs", ""),
            ],
        )
        .expect("seed");
        conn
    }

    #[test]
    fn bm25_ranks_title_hits_first_with_positive_scores() {
        let conn = seeded();
        let hits = search_bm25(&conn, "authentication", 0, 10).expect("search");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].0.id, 1, "title match outranks content match");
        assert!(hits.iter().all(|(_, score)| *score >= 0.0));
        assert!(hits[0].1 >= hits[1].1);
        assert_eq!(count_bm25(&conn, "authentication").expect("count"), 2);
    }

    #[test]
    fn bm25_supports_stemming_and_prefix() {
        let conn = seeded();
        assert_eq!(search_bm25(&conn, "fails", 0, 10).expect("stem").len(), 1);
        assert_eq!(search_bm25(&conn, "auth*", 0, 10).expect("prefix").len(), 2);
    }

    #[test]
    fn bm25_applies_offset_and_limit() {
        let conn = seeded();
        let page = search_bm25(&conn, "authentication", 1, 1).expect("search");
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].0.id, 2);
    }

    #[test]
    fn malformed_fts_query_is_an_error() {
        let conn = seeded();
        assert!(search_bm25(&conn, "\"unbalanced", 0, 10).is_err());
    }

    #[test]
    fn exact_match_scores_title_and_content() {
        let conn = seeded();
        let hits = search_exact(&conn, "AUTHENTICATION", 0, 10).expect("search");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].0.id, 1);
        assert!((hits[0].1 - EXACT_TITLE_SCORE).abs() < f64::EPSILON);
        assert!((hits[1].1 - EXACT_CONTENT_SCORE).abs() < f64::EPSILON);
        assert_eq!(count_exact(&conn, "authentication").expect("count"), 2);
    }

    #[test]
    fn exact_match_folds_non_ascii_case() {
        let mut conn = open_in_memory().expect("store");
        upsert_documents(
            &mut conn,
            &[
                Document::new(1, "Привет мир", "", ""),
                Document::new(2, "Menu", "Café Au Lait", ""),
            ],
        )
        .expect("seed");

        for phrase in ["привет", "Привет", "ПРИВЕТ МИР"] {
            let hits = search_exact(&conn, phrase, 0, 10).expect("search");
            assert_eq!(hits.len(), 1, "phrase {phrase:?}");
            assert_eq!(hits[0].0.id, 1);
            assert!((hits[0].1 - EXACT_TITLE_SCORE).abs() < f64::EPSILON);
        }

        let hits = search_exact(&conn, "CAFÉ", 0, 10).expect("search");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0.id, 2);
        assert!((hits[0].1 - EXACT_CONTENT_SCORE).abs() < f64::EPSILON);
        assert_eq!(count_exact(&conn, "café au LAIT").expect("count"), 1);
    }

    #[test]
    fn exact_match_requires_the_whole_phrase() {
        let conn = seeded();
        assert!(search_exact(&conn, "timeout regression", 0, 10)
            .expect("search")
            .is_empty());
        assert_eq!(search_exact(&conn, "fix typos", 0, 10).expect("search").len(), 1);
    }

    #[test]
    fn triggers_keep_fts_in_sync() {
        let conn = seeded();
        assert_eq!(fts_row_count(&conn).expect("count"), 3);
        delete_document(&conn, 3).expect("delete");
        assert_eq!(fts_row_count(&conn).expect("count"), 2);
        assert!(search_bm25(&conn, "typos", 0, 10).expect("search").is_empty());
    }

    #[test]
    fn updated_row_is_reindexed_under_its_new_text() {
        let conn = seeded();
        upsert_document(
            &conn,
            &Document::new(3, "Changelog rewrite", "Release notes", ""),
        )
        .expect("retitle");

        let hits = search_bm25(&conn, "changelog", 0, 10).expect("new title");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0.id, 3);
        assert!(search_bm25(&conn, "readme", 0, 10).expect("old title").is_empty());
        assert!(search_bm25(&conn, "typos", 0, 10).expect("old body").is_empty());
        assert_eq!(count_bm25(&conn, "readme").expect("count"), 0);
        assert_eq!(fts_row_count(&conn).expect("count"), 3);
    }
}
