use crate::output::{OutputMode, pretty_kv, render_mode};
use anyhow::{Context as _, Result};
use clap::Args;
use serde::Serialize;
use sift_core::SqliteStore;
use sift_core::config::{PROJECT_DIR, default_project_toml, load_project_config};
use std::path::Path;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Force re-initialization even if `.sift/` already exists.
    #[arg(long)]
    pub force: bool,
}

const GITIGNORE: &str = "sift.db\nsift.db-wal\nsift.db-shm\n";

#[derive(Debug, Serialize)]
struct InitReport {
    config: String,
    store: String,
    documents: usize,
}

/// Execute `sift init`. Creates the project skeleton:
///
/// ```text
/// .sift/
///   config.toml   (default project config)
///   .gitignore    (store database files)
///   sift.db       (empty, migrated document store)
/// ```
///
/// Re-initializing with `--force` rewrites the config but keeps any
/// documents already in the store.
///
/// # Errors
///
/// Returns an error if `.sift/` already exists and `--force` is not set,
/// or if any filesystem or store operation fails.
pub fn run_init(args: &InitArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let sift_dir = project_root.join(PROJECT_DIR);

    if sift_dir.exists() && !args.force {
        anyhow::bail!("{PROJECT_DIR}/ already exists. Use `sift init --force` to reinitialize.");
    }

    std::fs::create_dir_all(&sift_dir)
        .with_context(|| format!("Failed to create {}", sift_dir.display()))?;

    let config_path = sift_dir.join("config.toml");
    std::fs::write(&config_path, default_project_toml()?)
        .with_context(|| format!("Failed to write config: {}", config_path.display()))?;

    let gitignore_path = sift_dir.join(".gitignore");
    std::fs::write(&gitignore_path, GITIGNORE)
        .with_context(|| format!("Failed to write .gitignore: {}", gitignore_path.display()))?;

    let config = load_project_config(project_root)?;
    let store_path = config.store.resolve(project_root);
    let store = SqliteStore::open(&store_path)?;
    let documents = sift_core::db::documents::document_count(store.connection())?;

    tracing::info!(store = %store_path.display(), "initialized project");

    let report = InitReport {
        config: config_path.display().to_string(),
        store: store_path.display().to_string(),
        documents,
    };

    render_mode(
        output,
        &report,
        |r, w| writeln!(w, "initialized  config={}  store={}", r.config, r.store),
        |r, w| {
            writeln!(w, "✓ Initialized {PROJECT_DIR}/ project structure.")?;
            writeln!(w)?;
            pretty_kv(w, "Config", &r.config)?;
            pretty_kv(w, "Store", &r.store)?;
            pretty_kv(w, "Documents", r.documents.to_string())?;
            writeln!(w)?;
            writeln!(w, "Next steps:")?;
            writeln!(w, "  sift add --title \"Red Car\" --content \"A fast red car\"")?;
            writeln!(w, "  sift import documents.jsonl")?;
            writeln!(w, "  sift search \"red car\"")
        },
    )
}
