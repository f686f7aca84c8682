//! JSON-lines document import format.
//!
//! One document object per line: `{"id": 1, "title": "...", "content": "...", "url": "..."}`.
//! `url` may be omitted. Blank lines are skipped.

use anyhow::{Context, Result};
use std::io::BufRead;

use super::document::Document;

/// Parse every document from a JSON-lines stream.
///
/// # Errors
///
/// Returns an error naming the 1-based line number of the first line that
/// cannot be read or is not a valid document object.
pub fn read_documents<R: BufRead>(reader: R) -> Result<Vec<Document>> {
    let mut docs = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("line {line_no}: read failed"))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let doc: Document = serde_json::from_str(trimmed)
            .with_context(|| format!("line {line_no}: invalid document"))?;
        docs.push(doc);
    }

    Ok(docs)
}
