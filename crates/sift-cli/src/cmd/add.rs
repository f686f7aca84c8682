use super::open_project;
use crate::output::{OutputMode, pretty_kv, render_mode};
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use sift_core::Document;
use std::path::Path;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Document title.
    #[arg(long)]
    pub title: String,

    /// Document body text.
    #[arg(long)]
    pub content: String,

    /// Source URL, stored but not searched.
    #[arg(long, default_value = "")]
    pub url: String,

    /// Explicit id. An existing document with this id is replaced.
    #[arg(long)]
    pub id: Option<i64>,
}

#[derive(Debug, Serialize)]
struct AddReport {
    id: i64,
    title: String,
    replaced: bool,
}

/// Execute `sift add`.
///
/// # Errors
///
/// Returns an error if the project cannot be opened or the write fails.
pub fn run_add(args: &AddArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let project = open_project(project_root, output)?;
    let store = &project.store;

    let (id, replaced) = match args.id {
        Some(id) => {
            let existed =
                sift_core::db::documents::get_document(store.connection(), id)?.is_some();
            store.upsert(&Document::new(id, &args.title, &args.content, &args.url))?;
            (id, existed)
        }
        None => (store.insert(&args.title, &args.content, &args.url)?, false),
    };

    tracing::debug!(id, replaced, "stored document");

    let report = AddReport {
        id,
        title: args.title.clone(),
        replaced,
    };

    render_mode(
        output,
        &report,
        |r, w| writeln!(w, "{}  {}", r.id, r.title),
        |r, w| {
            let verb = if r.replaced { "Replaced" } else { "Added" };
            writeln!(w, "✓ {verb} document {}", r.id)?;
            pretty_kv(w, "Title", &r.title)
        },
    )
}
