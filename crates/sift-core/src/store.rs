//! The document store collaborator interface and its SQLite implementation.
//!
//! The search engine never talks to SQLite directly. It consumes two
//! operations through [`DocumentStore`]: a full corpus fetch (vector and
//! hybrid modes) and a paginated query execution (basic and fulltext modes).

use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, instrument};

use crate::db;
use crate::model::document::Document;

/// A query the store knows how to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuerySpec {
    /// Case-insensitive phrase containment in title or content.
    Exact(String),
    /// Store-native full-text query language (FTS5 for [`SqliteStore`]).
    FullText(String),
}

impl QuerySpec {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Exact(text) | Self::FullText(text) => text,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Exact(_) => "exact",
            Self::FullText(_) => "fulltext",
        }
    }
}

/// One scored hit returned by [`DocumentStore::execute_query`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryHit {
    pub document: Document,
    /// Store-native relevance, `>= 0`, larger is better.
    pub score: f64,
}

/// A window of hits plus the total match count across all pages.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct QueryPage {
    pub hits: Vec<QueryHit>,
    pub total: usize,
}

/// Operations the search engine consumes from the document store.
pub trait DocumentStore {
    /// Every stored document, in a stable order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn fetch_corpus(&self) -> Result<Vec<Document>>;

    /// Run `spec` and return hits `offset..offset + limit` plus the total.
    ///
    /// # Errors
    ///
    /// Returns an error if the query is malformed or the store fails.
    fn execute_query(&self, spec: &QuerySpec, offset: usize, limit: usize) -> Result<QueryPage>;
}

impl<T: DocumentStore + ?Sized> DocumentStore for &T {
    fn fetch_corpus(&self) -> Result<Vec<Document>> {
        (**self).fetch_corpus()
    }

    fn execute_query(&self, spec: &QuerySpec, offset: usize, limit: usize) -> Result<QueryPage> {
        (**self).execute_query(spec, offset, limit)
    }
}

/// [`DocumentStore`] backed by a SQLite database with an FTS5 index.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (creating and migrating if needed) the store at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            conn: db::open_store(path)?,
        })
    }

    /// Open a migrated in-memory store.
    ///
    /// # Errors
    ///
    /// Returns an error if the migrations fail.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: db::open_in_memory()?,
        })
    }

    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Insert a document with a store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert(&self, title: &str, content: &str, url: &str) -> Result<i64> {
        db::documents::insert_document(&self.conn, title, content, url)
    }

    /// Insert or replace a document under its own id.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn upsert(&self, doc: &Document) -> Result<()> {
        db::documents::upsert_document(&self.conn, doc)
    }

    /// Upsert a batch of documents transactionally.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails.
    pub fn upsert_all(&mut self, docs: &[Document]) -> Result<usize> {
        db::documents::upsert_documents(&mut self.conn, docs)
    }
}

impl DocumentStore for SqliteStore {
    #[instrument(skip(self))]
    fn fetch_corpus(&self) -> Result<Vec<Document>> {
        let docs = db::documents::fetch_all_documents(&self.conn).context("fetch corpus")?;
        debug!(documents = docs.len(), "fetched corpus");
        Ok(docs)
    }

    #[instrument(skip(self), fields(kind = spec.kind()))]
    fn execute_query(&self, spec: &QuerySpec, offset: usize, limit: usize) -> Result<QueryPage> {
        let text = spec.text().trim();
        if text.is_empty() || limit == 0 {
            return Ok(QueryPage::default());
        }

        let (rows, total) = match spec {
            QuerySpec::Exact(_) => (
                db::fts::search_exact(&self.conn, text, offset, limit)?,
                db::fts::count_exact(&self.conn, text)?,
            ),
            QuerySpec::FullText(_) => (
                db::fts::search_bm25(&self.conn, text, offset, limit)?,
                db::fts::count_bm25(&self.conn, text)?,
            ),
        };

        let hits = rows
            .into_iter()
            .map(|(document, score)| QueryHit { document, score })
            .collect::<Vec<_>>();
        debug!(hits = hits.len(), total, "executed store query");
        Ok(QueryPage { hits, total })
    }
}
