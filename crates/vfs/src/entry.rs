//! Virtual filesystem nodes exposed to consumers.

use rusty_media_common::{classify_by_extension, MediaKind};
use serde::Serialize;

/// Whether an entry is a file or a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Folder,
    File,
}

/// One node of a virtual directory listing.
///
/// Entries are view values: a new listing replaces the previous one wholesale
/// and entries are never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Full object key; folder keys end with `/`.
    pub key: String,
    /// Last path segment.
    pub name: String,
    /// File or folder.
    pub kind: EntryKind,
    /// Size in bytes (files only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Last modified timestamp in Unix epoch seconds (files only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<i64>,
}

impl Entry {
    /// Create a file entry.
    pub fn file(
        key: impl Into<String>,
        name: impl Into<String>,
        size: u64,
        last_modified: Option<i64>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            kind: EntryKind::File,
            size: Some(size),
            last_modified,
        }
    }

    /// Create a folder entry. `key` must end with `/`.
    pub fn folder(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            kind: EntryKind::Folder,
            size: None,
            last_modified: None,
        }
    }

    /// Whether this entry is a folder.
    pub fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }

    /// Media classification; folders are always `Other`.
    pub fn media_kind(&self) -> MediaKind {
        match self.kind {
            EntryKind::Folder => MediaKind::Other,
            EntryKind::File => classify_by_extension(&self.name),
        }
    }
}
