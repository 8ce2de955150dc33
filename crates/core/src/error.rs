//! Error types for the Rudder domain.
//!
//! Uses `thiserror` for ergonomic error definitions. The steering pipeline
//! itself never fails; these errors cover the surrounding plumbing
//! (working-directory resolution, serialization of reports, configuration).

use std::path::PathBuf;
use thiserror::Error;

/// The top-level error type for all Rudder operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Filesystem ---
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Attach a path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;
