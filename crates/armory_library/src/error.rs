//! Error types for the build library.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LibraryError>;

#[derive(Error, Debug)]
pub enum LibraryError {
    /// Reading or writing `builds.json` failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The library file was written by a newer version.
    #[error("Unsupported library version {0}")]
    UnsupportedVersion(u32),

    #[error("Build {0} not found")]
    NotFound(String),

    #[error("Build title cannot be empty")]
    EmptyTitle,

    /// Submitted builds are read-only.
    #[error("Build {0} has been submitted and can no longer be changed")]
    Submitted(String),
}
