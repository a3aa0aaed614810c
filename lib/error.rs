//! Error types for ppx-release.

use std::path::PathBuf;
use thiserror::Error;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Result type for ppx-release operations.
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Error type for ppx-release operations.
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// Base manifest is missing.
    #[error("Manifest not found: {0}")]
    ConfigNotFound(PathBuf),

    /// Base manifest or override table could not be read or parsed.
    #[error("Failed to parse {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A manifest could not be written to its destination.
    #[error("Failed to write {path}: {message}")]
    WriteError { path: PathBuf, message: String },

    /// The prebuilt binary for the selected platform is not in the bundle.
    #[error("Prebuilt binary not found: {0}")]
    AssetNotFound(PathBuf),

    /// The binary could not be installed at the destination.
    #[error("Failed to install {path}: {message}")]
    InstallWriteError { path: PathBuf, message: String },

    /// The host operating system has no prebuilt release.
    #[error("No release built for the {0} platform")]
    UnsupportedPlatform(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
