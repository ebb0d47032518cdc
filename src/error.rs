//! Error types for cachet
//!
//! All modules use `CachetResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cachet operations
pub type CachetResult<T> = Result<T, CachetError>;

/// All errors that can occur in cachet
#[derive(Error, Debug)]
pub enum CachetError {
    // Remote errors
    #[error("Remote resource not found: {0}")]
    RemoteNotFound(String),

    #[error("Transfer of {identifier} failed: {reason}")]
    Transfer { identifier: String, reason: String },

    // Extraction errors
    #[error("Extraction of {} failed: {reason}", .archive.display())]
    Extraction { archive: PathBuf, reason: String },

    // Verification errors
    #[error("Unsupported digest algorithm: {0}")]
    UnsupportedAlgorithm(String),

    // Locking errors
    #[error("Failed to lock {}: {source}", .path.display())]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Mounted backend has no root directory")]
    MountRootMissing,

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CachetError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a transfer error
    pub fn transfer(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Transfer {
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::RemoteNotFound(_) => Some("Check the identifier and the --endpoint in use"),
            Self::UnsupportedAlgorithm(_) => Some("Set cache.digest to \"sha1\" or \"sha256\""),
            Self::MountRootMissing => Some("Set remote.root in the config or pass --endpoint"),
            Self::Extraction { .. } => Some("Check that the archive is a valid tarball"),
            _ => None,
        }
    }
}
