//! The searchable document record.

use serde::{Deserialize, Serialize};

/// A single searchable document.
///
/// Documents are immutable for the duration of a search call. Every call
/// fetches a fresh copy from the store; nothing is cached across calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier. Doubles as the SQLite rowid.
    pub id: i64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub url: String,
}

impl Document {
    #[must_use]
    pub fn new(
        id: i64,
        title: impl Into<String>,
        content: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            url: url.into(),
        }
    }

    /// Text used for vectorization: title and content joined by a space.
    #[must_use]
    pub fn search_text(&self) -> String {
        let mut text = String::with_capacity(self.title.len() + self.content.len() + 1);
        text.push_str(&self.title);
        text.push(' ');
        text.push_str(&self.content);
        text
    }
}
