//! Error types for tracker-core

use thiserror::Error;

/// Failure reported by a persistence substrate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubstrateError {
    /// The write would grow the substrate past its byte quota
    #[error("Quota exceeded writing {key}: needs {needed} bytes, {available} available")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },

    /// Backend-specific failure (database, filesystem, ...)
    #[error("Backend error: {0}")]
    Backend(String),

    /// A lock guarding the substrate was poisoned by a panicking writer
    #[error("Substrate lock poisoned")]
    Poisoned,
}

/// Errors surfaced by mutating store operations.
///
/// Read-path problems never appear here; they are recovered inside `load`
/// and reported through [`ReadIssue`].
#[derive(Error, Debug)]
pub enum StoreError {
    /// Writing the collection back to the substrate failed. The in-memory
    /// collection still holds the state from before the mutation.
    #[error("Persistence write failed for {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: SubstrateError,
    },

    /// The collection could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A substrate operation outside a single collection failed.
    #[error("Substrate error: {0}")]
    Substrate(#[from] SubstrateError),
}

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// A recovered problem encountered while loading a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadIssue {
    /// The substrate could not be read at all
    Unavailable(String),
    /// The stored value was not a well-formed list of entries
    Malformed(String),
}

impl std::fmt::Display for ReadIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadIssue::Unavailable(msg) => write!(f, "substrate unavailable: {}", msg),
            ReadIssue::Malformed(msg) => write!(f, "malformed stored value: {}", msg),
        }
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for SubstrateError {
    fn from(err: rusqlite::Error) -> Self {
        SubstrateError::Backend(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_error_display_names_key() {
        let err = StoreError::Write {
            key: "guest_todoItems".into(),
            source: SubstrateError::QuotaExceeded {
                key: "guest_todoItems".into(),
                needed: 120,
                available: 10,
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("guest_todoItems"));
        assert!(msg.contains("Quota exceeded"));
    }

    #[test]
    fn read_issue_display() {
        let issue = ReadIssue::Malformed("expected a list".into());
        assert!(issue.to_string().contains("expected a list"));
    }
}
