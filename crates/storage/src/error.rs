//! Error types for storage operations.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Object not found in the bucket.
    #[error("Object not found: s3://{bucket}/{key}")]
    NotFound { bucket: String, key: String },

    /// Access denied.
    #[error("Access denied to s3://{bucket}/{key}: {message}")]
    AccessDenied {
        bucket: String,
        key: String,
        message: String,
    },

    /// Network or service-level failure.
    #[error("Network error: {message}")]
    NetworkError { message: String, retryable: bool },

    /// Operation cancelled by the caller (polling only; mutations run to completion).
    #[error("Operation cancelled")]
    Cancelled,

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Other error.
    #[error("{message}")]
    Other { message: String },
}

impl StorageError {
    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            StorageError::NetworkError { retryable, .. } => *retryable,
            StorageError::NotFound { .. } => false,
            StorageError::AccessDenied { .. } => false,
            StorageError::Cancelled => false,
            StorageError::InvalidConfig { .. } => false,
            StorageError::Other { .. } => false,
        }
    }

    /// Check if this error means the object does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }

    /// Shorthand for a transient network failure.
    pub fn transient(message: impl Into<String>) -> Self {
        StorageError::NetworkError {
            message: message.into(),
            retryable: true,
        }
    }
}

/// Non-fatal error recorded for one object of a multi-object operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectFailure {
    /// The key that failed.
    pub key: String,
    /// The error that occurred.
    #[serde(serialize_with = "serialize_display")]
    pub error: StorageError,
}

impl ObjectFailure {
    /// Create a new object failure.
    pub fn new(key: impl Into<String>, error: StorageError) -> Self {
        Self {
            key: key.into(),
            error,
        }
    }
}

fn serialize_display<S: Serializer>(error: &StorageError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(StorageError::transient("timeout").is_retryable());
        assert!(!StorageError::NetworkError {
            message: "bad request".into(),
            retryable: false
        }
        .is_retryable());
        assert!(!StorageError::Cancelled.is_retryable());
    }

    #[test]
    fn test_not_found_display() {
        let err = StorageError::NotFound {
            bucket: "b".into(),
            key: "media/u/a.jpg".into(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Object not found: s3://b/media/u/a.jpg");
    }
}
