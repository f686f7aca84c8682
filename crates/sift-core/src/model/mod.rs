//! Domain types shared across sift crates.

pub mod document;
pub mod jsonl;
