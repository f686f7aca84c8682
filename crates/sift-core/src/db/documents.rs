//! CRUD helpers for the `documents` table.
//!
//! The FTS5 mirror is maintained by triggers, so nothing here touches
//! `documents_fts` directly.

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension as _, Row, params};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::document::Document;

fn now_us() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_micros()).unwrap_or(i64::MAX))
}

pub(crate) fn document_from_row(row: &Row<'_>) -> rusqlite::Result<Document> {
    Ok(Document {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        url: row.get(3)?,
    })
}

/// Insert a new document and let SQLite assign its id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_document(conn: &Connection, title: &str, content: &str, url: &str) -> Result<i64> {
    let ts = now_us();
    conn.execute(
        "INSERT INTO documents (title, content, url, created_at_us, updated_at_us)
         VALUES (?1, ?2, ?3, ?4, ?4)",
        params![title, content, url, ts],
    )
    .with_context(|| format!("insert document '{title}'"))?;
    Ok(conn.last_insert_rowid())
}

/// Insert or replace a document under its own id.
///
/// # Errors
///
/// Returns an error if the upsert fails.
pub fn upsert_document(conn: &Connection, doc: &Document) -> Result<()> {
    let ts = now_us();
    conn.execute(
        "INSERT INTO documents (id, title, content, url, created_at_us, updated_at_us)
         VALUES (?1, ?2, ?3, ?4, ?5, ?5)
         ON CONFLICT(id) DO UPDATE SET
             title = excluded.title,
             content = excluded.content,
             url = excluded.url,
             updated_at_us = excluded.updated_at_us",
        params![doc.id, doc.title, doc.content, doc.url, ts],
    )
    .with_context(|| format!("upsert document {}", doc.id))?;
    Ok(())
}

/// Upsert a batch of documents in a single transaction.
///
/// Returns the number of documents written.
///
/// # Errors
///
/// Returns an error if any upsert fails; the transaction is rolled back.
pub fn upsert_documents(conn: &mut Connection, docs: &[Document]) -> Result<usize> {
    let tx = conn.transaction().context("begin document batch")?;
    for doc in docs {
        upsert_document(&tx, doc)?;
    }
    tx.commit().context("commit document batch")?;
    Ok(docs.len())
}

/// Delete a document. Returns `true` if a row was removed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_document(conn: &Connection, id: i64) -> Result<bool> {
    let removed = conn
        .execute("DELETE FROM documents WHERE id = ?1", [id])
        .with_context(|| format!("delete document {id}"))?;
    Ok(removed > 0)
}

/// Fetch a single document by id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_document(conn: &Connection, id: i64) -> Result<Option<Document>> {
    conn.query_row(
        "SELECT id, title, content, url FROM documents WHERE id = ?1",
        [id],
        document_from_row,
    )
    .optional()
    .with_context(|| format!("load document {id}"))
}

/// Count stored documents.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn document_count(conn: &Connection) -> Result<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))
        .context("count documents")?;
    Ok(usize::try_from(count).unwrap_or(0))
}

/// Load every document, ordered by id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn fetch_all_documents(conn: &Connection) -> Result<Vec<Document>> {
    let mut stmt = conn
        .prepare("SELECT id, title, content, url FROM documents ORDER BY id")
        .context("prepare corpus query")?;
    let rows = stmt
        .query_map([], document_from_row)
        .context("execute corpus query")?;

    let mut docs = Vec::new();
    for row in rows {
        docs.push(row.context("read corpus row")?);
    }
    Ok(docs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    #[test]
    fn insert_assigns_ids_and_get_round_trips() {
        let conn = open_in_memory().expect("store");
        let id = insert_document(&conn, "Red Car", "A fast red car", "https://a").expect("insert");
        let doc = get_document(&conn, id).expect("get").expect("present");
        assert_eq!(doc.title, "Red Car");
        assert_eq!(doc.url, "https://a");
        assert_eq!(document_count(&conn).expect("count"), 1);
    }

    #[test]
    fn upsert_replaces_existing_row() {
        let mut conn = open_in_memory().expect("store");
        upsert_documents(
            &mut conn,
            &[Document::new(5, "Old title", "old body", "")],
        )
        .expect("first upsert");
        upsert_document(&conn, &Document::new(5, "New title", "new body", "u")).expect("upsert");

        let doc = get_document(&conn, 5).expect("get").expect("present");
        assert_eq!(doc.title, "New title");
        assert_eq!(document_count(&conn).expect("count"), 1);
    }

    #[test]
    fn fetch_all_is_ordered_by_id() {
        let mut conn = open_in_memory().expect("store");
        upsert_documents(
            &mut conn,
            &[
                Document::new(3, "c", "", ""),
                Document::new(1, "a", "", ""),
                Document::new(2, "b", "", ""),
            ],
        )
        .expect("upsert");

        let ids: Vec<i64> = fetch_all_documents(&conn)
            .expect("fetch")
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn delete_reports_whether_a_row_was_removed() {
        let conn = open_in_memory().expect("store");
        let id = insert_document(&conn, "t", "c", "").expect("insert");
        assert!(delete_document(&conn, id).expect("delete"));
        assert!(!delete_document(&conn, id).expect("second delete"));
        assert!(get_document(&conn, id).expect("get").is_none());
    }
}
