//! Error types for the VFS crate.

use std::fmt;

use rusty_media_common::KeyError;
use rusty_media_storage::StorageError;

/// Errors that can occur during VFS operations.
///
/// Per-object failures inside multi-object operations are not errors; they are
/// reported in `DeleteResult` / `RenameResult`. This type covers precondition
/// violations and store calls whose failure aborts the whole operation.
#[derive(Debug)]
pub enum VfsError {
    /// Caller violated a precondition.
    InvalidArgument(String),

    /// Key mapping rejected a key or name.
    Key(KeyError),

    /// Single-object write failed.
    StorageWrite { key: String, source: StorageError },

    /// Store call failed (listing, enumeration).
    Storage(StorageError),
}

impl fmt::Display for VfsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VfsError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            VfsError::Key(err) => write!(f, "{}", err),
            VfsError::StorageWrite { key, source } => {
                write!(f, "Failed to write {}: {}", key, source)
            }
            VfsError::Storage(err) => write!(f, "Storage error: {}", err),
        }
    }
}

impl std::error::Error for VfsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VfsError::Key(err) => Some(err),
            VfsError::StorageWrite { source, .. } => Some(source),
            VfsError::Storage(err) => Some(err),
            VfsError::InvalidArgument(_) => None,
        }
    }
}

impl From<KeyError> for VfsError {
    fn from(err: KeyError) -> Self {
        VfsError::Key(err)
    }
}

impl From<StorageError> for VfsError {
    fn from(err: StorageError) -> Self {
        VfsError::Storage(err)
    }
}
