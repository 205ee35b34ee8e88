//! Shared error types used across rusty-media crates.

use thiserror::Error;

/// Errors raised by the key/path mapper when a caller violates a precondition.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// Key is outside the namespace the operation requires.
    #[error("Invalid argument {key}: {reason}")]
    InvalidArgument {
        /// The offending key.
        key: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A user supplied name cannot be used as a path segment.
    #[error("Invalid name '{name}': {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

impl KeyError {
    /// Create an InvalidArgument error.
    ///
    /// # Arguments
    /// * `key` - The key that was rejected
    /// * `reason` - Human readable reason
    pub fn invalid_argument(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
