//! Canonical SQLite schema for the sift document store.
//!
//! - `documents` holds one row per document; `id` is the rowid
//! - `documents_fts` is an external-content FTS5 index over `documents`,
//!   kept in sync by triggers

/// Migration v1: the documents table.
pub const MIGRATION_V1_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    content TEXT NOT NULL DEFAULT '',
    url TEXT NOT NULL DEFAULT '',
    created_at_us INTEGER NOT NULL,
    updated_at_us INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_documents_updated
    ON documents(updated_at_us DESC);
"#;

/// Migration v2: FTS5 index with sync triggers and a backfill.
pub const MIGRATION_V2_SQL: &str = r#"
CREATE VIRTUAL TABLE IF NOT EXISTS documents_fts USING fts5(
    title,
    content,
    url,
    content='documents',
    content_rowid='id',
    tokenize='porter unicode61',
    prefix='2 3'
);

CREATE TRIGGER IF NOT EXISTS documents_ai
AFTER INSERT ON documents
BEGIN
    INSERT INTO documents_fts(rowid, title, content, url)
    VALUES (new.id, new.title, new.content, new.url);
END;

CREATE TRIGGER IF NOT EXISTS documents_au
AFTER UPDATE ON documents
BEGIN
    INSERT INTO documents_fts(documents_fts, rowid, title, content, url)
    VALUES ('delete', old.id, old.title, old.content, old.url);

    INSERT INTO documents_fts(rowid, title, content, url)
    VALUES (new.id, new.title, new.content, new.url);
END;

CREATE TRIGGER IF NOT EXISTS documents_ad
AFTER DELETE ON documents
BEGIN
    INSERT INTO documents_fts(documents_fts, rowid, title, content, url)
    VALUES ('delete', old.id, old.title, old.content, old.url);
END;

INSERT INTO documents_fts(documents_fts) VALUES ('rebuild');
"#;
