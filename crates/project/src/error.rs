//! Error types for the project crate (thiserror-based).

use thiserror::Error;

/// Errors that can occur while writing an export.
#[derive(Error, Debug)]
pub enum ProjectError {
    /// File I/O error (write, rename, path resolution).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Nothing to export: the timeline has no segments.
    #[error("Export has no segments")]
    EmptyExport,
}

/// Convenience Result type for project operations.
pub type ProjectResult<T> = Result<T, ProjectError>;
