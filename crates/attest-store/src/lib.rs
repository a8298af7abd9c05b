//! Attest Store Layer
//!
//! Filesystem access for the pipeline: read-only claim dataset snapshots,
//! optional per-dataset source registries, and the persisted
//! verification-result store that makes reruns idempotent.
//!
//! # Layout
//!
//! ```text
//! <root>/datasets/<id>/claims.json              claim snapshot (input)
//! <root>/datasets/<id>/registry.json            scope registry (optional)
//! <root>/datasets/<id>/verification/<pass>.json persisted results
//! ```
//!
//! Every write goes through write-temp-then-rename so a killed process
//! never leaves a partial file behind.

#![warn(missing_docs)]

mod fsutil;
mod results;
mod snapshot;

pub use fsutil::write_json_atomic;
pub use results::FileResultStore;
pub use snapshot::{DatasetSnapshot, SnapshotStore, SourceRegistry};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Data root directory does not exist
    #[error("data root not found: {0}")]
    RootNotFound(PathBuf),

    /// Dataset directory or claims file missing
    #[error("dataset not found: {0}")]
    DatasetNotFound(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Atomic rename failed
    #[error("failed to persist file: {0}")]
    Persist(String),
}
