//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for reading-analytics operations.
///
/// Every variant except [`Error::Record`] is fatal for a run. Record errors
/// are absorbed by the aggregator and only surface as a skipped-record count.
#[derive(Debug, Error)]
pub enum Error {
    /// Required external identifiers or settings are absent or invalid
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The upstream collaborator is unreachable or returned an unusable structure
    #[error("data source error ({origin}): {message}")]
    DataSource { origin: String, message: String },

    /// A single malformed input row
    #[error("record {index} skipped: {issue}")]
    Record { index: usize, issue: RecordIssue },

    /// Snapshot or view model could not be encoded or decoded
    #[error("failed to {operation}")]
    Serialization {
        operation: String,
        #[source]
        source: serde_json::Error,
    },

    /// Directory or file could not be created, read or written
    #[error("failed to {operation} {}", path.display())]
    FileSystem {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A finished snapshot broke one of its count invariants
    #[error("snapshot failed consistency checks: {}", .0.join("; "))]
    Inconsistent(Vec<String>),
}

impl Error {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a data source error naming the collaborator
    pub fn data_source(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DataSource {
            origin: origin.into(),
            message: message.into(),
        }
    }

    /// Create a serialization error naming the failing operation
    pub fn serialization(operation: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            operation: operation.into(),
            source,
        }
    }

    /// Create a filesystem error naming the failing operation and path
    pub fn file_system(
        operation: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }
}

/// Why a single input row was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordIssue {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("malformed row: {0}")]
    MalformedRow(String),
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for attaching the failing filesystem operation to io results
pub trait IoResultExt<T> {
    fn fs_context(self, operation: &str, path: &std::path::Path) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn fs_context(self, operation: &str, path: &std::path::Path) -> Result<T> {
        self.map_err(|e| Error::file_system(operation, path, e))
    }
}
