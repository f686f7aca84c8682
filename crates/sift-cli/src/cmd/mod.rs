pub mod add;
pub mod completions;
pub mod import;
pub mod init;
pub mod search;

use crate::output::{CliError, OutputMode, render_error};
use sift_core::SqliteStore;
use sift_core::config::{PROJECT_DIR, ProjectConfig, load_project_config};
use sift_core::error::ErrorCode;
use std::path::Path;

/// An initialized project: its config and an open store.
pub struct Project {
    pub config: ProjectConfig,
    pub store: SqliteStore,
}

/// Open the project rooted at `project_root`.
///
/// Renders a coded error and fails when the project is not initialized,
/// its config does not parse, or the store file is missing.
///
/// # Errors
///
/// Returns an error for any of the conditions above or if the store
/// cannot be opened.
pub fn open_project(project_root: &Path, output: OutputMode) -> anyhow::Result<Project> {
    if !project_root.join(PROJECT_DIR).is_dir() {
        return fail(
            output,
            ErrorCode::NotInitialized,
            format!("no {PROJECT_DIR}/ directory in {}", project_root.display()),
        );
    }

    let config = match load_project_config(project_root) {
        Ok(config) => config,
        Err(err) => return fail(output, ErrorCode::ConfigParseError, format!("{err:#}")),
    };

    let store_path = config.store.resolve(project_root);
    if !store_path.exists() {
        return fail(
            output,
            ErrorCode::StoreMissing,
            format!("document store not found at {}", store_path.display()),
        );
    }

    let store = SqliteStore::open(&store_path)?;
    Ok(Project { config, store })
}

/// Render a coded error, then fail with the same message.
pub fn fail<T>(output: OutputMode, code: ErrorCode, message: String) -> anyhow::Result<T> {
    render_error(output, &CliError::coded(code, message.clone()))?;
    anyhow::bail!(message)
}
