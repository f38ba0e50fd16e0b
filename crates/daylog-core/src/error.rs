//! Error types for daylog

use std::path::PathBuf;

/// Daylog error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Logs directory is not writable: {0}")]
    DirectoryUnwritable(PathBuf),

    // Deliberately does not echo the candidate path.
    #[error("Requested file resolves outside the logs directory")]
    PathEscape,

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Result type alias for daylog
pub type Result<T> = std::result::Result<T, Error>;
