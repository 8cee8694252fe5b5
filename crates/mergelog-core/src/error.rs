//! Error types for mergelog

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using MergelogError
pub type Result<T> = std::result::Result<T, MergelogError>;

/// Main error type for mergelog operations
#[derive(Debug, Error)]
pub enum MergelogError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// History-provider errors
    #[error(transparent)]
    History(#[from] HistoryError),

    /// Changelog file errors
    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// History-provider errors
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Failed to spawn the history provider process
    #[error("Failed to start history provider: {0}")]
    SpawnFailed(String),

    /// Provider exited with a nonzero status before the stream completed
    #[error("History provider exited with status {status}: {stderr}")]
    ProviderExited { status: i32, stderr: String },

    /// A history line did not match the expected record format
    #[error("Malformed history record: {0}")]
    MalformedRecord(String),

    /// Fetching a single commit message failed
    #[error("Failed to read message for commit {hash}: {reason}")]
    MessageFetchFailed { hash: String, reason: String },

    /// A resolution worker was cancelled or panicked
    #[error("Message resolution aborted: {0}")]
    ResolutionAborted(String),

    /// IO error while streaming history
    #[error("IO error reading history: {0}")]
    Io(#[from] std::io::Error),
}

/// Changelog file errors
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// Failed to read the existing changelog
    #[error("Failed to read changelog at {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write the changelog
    #[error("Failed to write changelog at {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl MergelogError {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }
}
