#![forbid(unsafe_code)]
//! sift-core library.
//!
//! Shared document model, the [`DocumentStore`] collaborator interface used by
//! the search engine, a SQLite/FTS5 implementation of that interface, and
//! project/user configuration.
//!
//! # Conventions
//!
//! - **Errors**: Use `anyhow::Result` for return types where appropriate.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod store;

pub use model::document::Document;
pub use store::{DocumentStore, QueryHit, QueryPage, QuerySpec, SqliteStore};
