//! Error types for snapshot acquisition.

use thiserror::Error;

/// Result type for snapshot sources.
pub type Result<T> = std::result::Result<T, FetchError>;

/// Errors that can occur while assembling a [`NexusIndexData`](crate::NexusIndexData)
/// snapshot. The index computation itself never fails.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No student record exists for this id.
    #[error("student not found: {0}")]
    StudentNotFound(String),

    /// The id cannot address a snapshot (empty or containing path separators).
    #[error("invalid student id: {0:?}")]
    InvalidStudentId(String),

    /// IO error while reading a snapshot.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FetchError {
    /// Whether retrying the fetch later could succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
