//! Error types for dagedit operations.
//!
//! The core functions themselves are total: validity is reported as a
//! boolean and layout degrades to a deterministic placement instead of
//! failing. [`DagEditError`] covers the surrounding crate — file I/O,
//! snapshot parsing, configuration, and editor contract violations.

use std::io;

use thiserror::Error;

/// The main error type for dagedit operations.
#[derive(Debug, Error)]
pub enum DagEditError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Snapshot parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Graph error: {0}")]
    Graph(String),
}
