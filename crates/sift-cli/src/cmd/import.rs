use super::{fail, open_project};
use crate::output::{OutputMode, pretty_kv, render_mode};
use anyhow::{Context as _, Result};
use clap::Args;
use serde::Serialize;
use sift_core::error::ErrorCode;
use sift_core::model::jsonl::read_documents;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// JSON-lines file with one `{"id", "title", "content", "url"}` object per line.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

#[derive(Debug, Serialize)]
struct ImportReport {
    source: String,
    imported: usize,
    total_documents: usize,
}

/// Execute `sift import <file.jsonl>`.
///
/// The whole file is parsed before anything is written, so a bad line
/// leaves the store untouched.
///
/// # Errors
///
/// Returns an error if the file cannot be read, any line is not a valid
/// document, or the store write fails.
pub fn run_import(args: &ImportArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let mut project = open_project(project_root, output)?;

    let file = File::open(&args.path)
        .with_context(|| format!("Failed to open {}", args.path.display()))?;
    let docs = match read_documents(BufReader::new(file)) {
        Ok(docs) => docs,
        Err(err) => {
            return fail(
                output,
                ErrorCode::ImportParseError,
                format!("{}: {err:#}", args.path.display()),
            );
        }
    };

    let imported = project.store.upsert_all(&docs)?;
    let total_documents =
        sift_core::db::documents::document_count(project.store.connection())?;

    tracing::info!(imported, total_documents, "imported documents");

    let report = ImportReport {
        source: args.path.display().to_string(),
        imported,
        total_documents,
    };

    render_mode(
        output,
        &report,
        |r, w| writeln!(w, "imported={}  total={}", r.imported, r.total_documents),
        |r, w| {
            writeln!(w, "✓ Imported {} document(s)", r.imported)?;
            pretty_kv(w, "Source", &r.source)?;
            pretty_kv(w, "Total", r.total_documents.to_string())
        },
    )
}
