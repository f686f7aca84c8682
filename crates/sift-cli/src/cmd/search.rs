//! `sift search`: ranked document search.
//!
//! Four modes share one result shape:
//! - `basic`: case-insensitive phrase match in title or content
//! - `fulltext`: FTS5 syntax with BM25 ranking (stemming, `auth*`, AND/OR/NOT)
//! - `vector`: TF-IDF cosine similarity over the whole corpus
//! - `hybrid`: weighted fusion of fulltext (0.6) and vector (0.4) scores

use super::open_project;
use crate::output::{CliError, OutputMode, pretty_rule, render_error, render_mode};
use clap::Args;
use serde::Serialize;
use sift_search::{SearchResponse, SearchService};
use std::io::Write;
use std::path::Path;

#[derive(Args, Debug)]
#[command(
    about = "Search documents",
    long_about = "Search documents using basic, fulltext, vector or hybrid ranking.\n\n\
                  Fulltext and hybrid modes accept FTS5 syntax: stemming ('run' matches 'running'), \
                  prefix search ('auth*'), boolean operators (AND, OR, NOT).",
    after_help = "EXAMPLES:\n    # Hybrid search (default mode)\n    sift search \"red car\"\n\n\
                  # Vector similarity only\n    sift search \"red car\" --mode vector\n\n\
                  # Second page of five\n    sift search timeout --page 2 --page-size 5\n\n\
                  # Machine-readable output\n    sift search \"red car\" --format json"
)]
pub struct SearchArgs {
    /// Search query.
    pub query: String,

    /// Search mode: basic, fulltext, vector or hybrid. Defaults to the
    /// project's `search.default_mode`.
    #[arg(short, long)]
    pub mode: Option<String>,

    /// 1-based page number.
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Results per page. Defaults to the project's `search.page_size`.
    #[arg(short = 'n', long)]
    pub page_size: Option<usize>,
}

/// JSON envelope for search output.
#[derive(Debug, Serialize)]
struct SearchOutput {
    query: String,
    #[serde(flatten)]
    response: SearchResponse,
}

/// Execute `sift search <query>`.
///
/// # Errors
///
/// Returns an error if the project cannot be opened, the mode or page
/// arguments are invalid, the store fails in a single-layer mode, or
/// output rendering fails.
pub fn run_search(args: &SearchArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let project = open_project(project_root, output)?;

    let mode = args
        .mode
        .clone()
        .unwrap_or_else(|| project.config.search.default_mode.clone());
    let page_size = args.page_size.unwrap_or(project.config.search.page_size);

    let service = SearchService::new(&project.store);
    let response = match service.dispatch(&args.query, &mode, args.page, page_size) {
        Ok(response) => response,
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            return Err(err.into());
        }
    };

    let search_output = SearchOutput {
        query: args.query.clone(),
        response,
    };

    render_mode(
        output,
        &search_output,
        |out, w| render_search_text(out, w),
        |out, w| render_search_human(out, w),
    )
}

/// Render search results in human-readable format.
fn render_search_human(out: &SearchOutput, w: &mut dyn Write) -> std::io::Result<()> {
    let response = &out.response;
    if response.documents.is_empty() {
        writeln!(w, "No {} results for '{}'", response.mode, out.query)?;
        if response.page > 1 && response.total > 0 {
            writeln!(w, "Only {} match(es); try an earlier page", response.total)?;
        }
        return Ok(());
    }

    writeln!(
        w,
        "{} {} result(s) for '{}' (page {}):",
        response.total, response.mode, out.query, response.page
    )?;
    pretty_rule(w)?;
    writeln!(w, "{:<8}  {:>8}  TITLE", "ID", "SCORE")?;
    pretty_rule(w)?;

    for result in &response.documents {
        writeln!(
            w,
            "{:<8}  {:>8.3}  {}",
            result.document.id, result.score, result.document.title
        )?;
        if !result.document.url.is_empty() {
            writeln!(w, "{:<8}  {:>8}  {}", "", "", result.document.url)?;
        }
    }

    Ok(())
}

fn render_search_text(out: &SearchOutput, w: &mut dyn Write) -> std::io::Result<()> {
    let response = &out.response;
    if response.documents.is_empty() {
        writeln!(
            w,
            "advice  no-results  mode={}  query={}",
            response.mode, out.query
        )?;
        return Ok(());
    }

    for result in &response.documents {
        writeln!(
            w,
            "{}  score={:.3}  {}",
            result.document.id, result.score, result.document.title
        )?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
