//! Result and input types for folder-emulation operations.

use rusty_media_storage::ObjectFailure;
use serde::{Serialize, Serializer};

/// Aggregated outcome of a delete across every object it touched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeleteResult {
    /// Keys removed (or already absent).
    pub succeeded: Vec<String>,
    /// Keys whose removal failed.
    pub failed: Vec<ObjectFailure>,
}

impl DeleteResult {
    /// Whether every removal succeeded.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub(crate) fn record(&mut self, key: String, failure: Option<ObjectFailure>) {
        match failure {
            None => self.succeeded.push(key),
            Some(f) => self.failed.push(f),
        }
    }
}

/// Outcome of a rename or move.
///
/// Partial completion is a normal result: when every copy lands but some
/// originals could not be removed the operation still succeeded, with a warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameResult {
    /// Every object was copied and every original removed.
    Renamed {
        new_key: String,
        succeeded: usize,
    },
    /// Every object was copied but some originals remain.
    RenamedWithWarning {
        new_key: String,
        succeeded: usize,
        warning: String,
    },
    /// Nothing was committed (collision, or a copy failed).
    Failed { error: String },
}

/// Outcome of a move; moves share the rename result shape.
pub type MoveResult = RenameResult;

impl RenameResult {
    pub(crate) fn failed(error: impl Into<String>) -> Self {
        RenameResult::Failed {
            error: error.into(),
        }
    }

    /// Whether the destination now holds the item.
    pub fn is_success(&self) -> bool {
        !matches!(self, RenameResult::Failed { .. })
    }

    /// Number of objects copied, when successful.
    pub fn succeeded(&self) -> Option<usize> {
        match self {
            RenameResult::Renamed { succeeded, .. }
            | RenameResult::RenamedWithWarning { succeeded, .. } => Some(*succeeded),
            RenameResult::Failed { .. } => None,
        }
    }

    /// Destination key, when successful.
    pub fn new_key(&self) -> Option<&str> {
        match self {
            RenameResult::Renamed { new_key, .. }
            | RenameResult::RenamedWithWarning { new_key, .. } => Some(new_key),
            RenameResult::Failed { .. } => None,
        }
    }

    /// Failure message.
    pub fn error(&self) -> Option<&str> {
        match self {
            RenameResult::Failed { error } => Some(error),
            _ => None,
        }
    }

    /// Partial-success warning.
    pub fn warning(&self) -> Option<&str> {
        match self {
            RenameResult::RenamedWithWarning { warning, .. } => Some(warning),
            _ => None,
        }
    }
}

/// Flat wire shape consumed by the UI: `{success, succeeded?, newKey?, error?, warning?}`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RenameResultWire<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    succeeded: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_key: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<&'a str>,
}

impl Serialize for RenameResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RenameResultWire {
            success: self.is_success(),
            succeeded: self.succeeded(),
            new_key: self.new_key(),
            error: self.error(),
            warning: self.warning(),
        }
        .serialize(serializer)
    }
}

/// Progress of a folder rename or move, reported after each object copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenameProgress {
    /// Objects copied so far.
    pub current: usize,
    /// Objects to copy.
    pub total: usize,
}

/// A file to upload into a folder.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// File name (single segment).
    pub name: String,
    /// File contents.
    pub data: Vec<u8>,
    /// Explicit content type; guessed from the name when absent.
    pub content_type: Option<String>,
}

impl UploadFile {
    /// Create an upload without an explicit content type.
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
            content_type: None,
        }
    }

    /// Set an explicit content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}
