//! Navigation, selection and sort state of one folder view.
//!
//! A [`FolderView`] is owned by a single consumer and replaced wholesale on
//! every refresh: new entries replace the old ones and the selection is pruned
//! to keys that still exist. There is no incremental patching and no locking.

mod selection;

pub use selection::Selection;

use std::collections::HashSet;

use rusty_media_common::{
    decode_path_param, encode_path_param, join_virtual_path, normalize_virtual_path,
    parent_virtual_path, KeyError,
};
use serde::Serialize;

use crate::entry::Entry;
use crate::sorting::{sort_entries, SortSpec};

/// One step of the breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    /// Segment name.
    pub name: String,
    /// Virtual path up to and including this segment.
    pub path: String,
}

/// State of the folder currently shown.
#[derive(Debug, Clone, Default)]
pub struct FolderView {
    /// Current virtual path (`""` is the root).
    path: String,
    /// Entries of the current folder, in display order.
    entries: Vec<Entry>,
    /// Selected keys; always a subset of `entries`' keys.
    selection: Selection,
    /// Active sort.
    sort: SortSpec,
}

impl FolderView {
    /// View of the root folder.
    pub fn new() -> Self {
        Self::default()
    }

    /// View of the given folder.
    pub fn at(path: &str) -> Self {
        Self {
            path: normalize_virtual_path(path),
            ..Self::default()
        }
    }

    /// Restore a view from the persisted query parameter.
    ///
    /// # Errors
    /// `KeyError::InvalidArgument` when the value is not valid percent-encoding.
    pub fn from_query_param(value: &str) -> Result<Self, KeyError> {
        Ok(Self::at(&decode_path_param(value)?))
    }

    /// Query parameter value persisting the current path.
    pub fn query_param(&self) -> String {
        encode_path_param(&self.path)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    /// Replace the entries with a fresh listing.
    ///
    /// Entries are sorted with the active spec and the selection is pruned to
    /// keys present in the new listing.
    pub fn replace_entries(&mut self, mut entries: Vec<Entry>) {
        sort_entries(&mut entries, self.sort);
        let present: HashSet<&str> = entries.iter().map(|e: &Entry| e.key.as_str()).collect();
        self.selection.retain(|k: &str| present.contains(k));
        self.entries = entries;
    }

    /// Navigate to a folder.
    ///
    /// Changing folders drops the current entries and selection; the caller
    /// must list the new folder.
    ///
    /// # Returns
    /// Whether the path changed.
    pub fn navigate_to(&mut self, path: &str) -> bool {
        let path: String = normalize_virtual_path(path);
        if path == self.path {
            return false;
        }
        self.path = path;
        self.entries.clear();
        self.selection.clear();
        true
    }

    /// Navigate to the parent folder; no-op at the root.
    pub fn navigate_up(&mut self) -> bool {
        let parent: String = parent_virtual_path(&self.path);
        self.navigate_to(&parent)
    }

    /// Open a folder entry of the current listing. Files are ignored.
    pub fn enter(&mut self, entry: &Entry) -> bool {
        if !entry.is_folder() {
            return false;
        }
        let path: String = join_virtual_path(&self.path, &entry.name);
        self.navigate_to(&path)
    }

    /// Segments of the current path with their cumulative paths.
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        let mut crumbs: Vec<Breadcrumb> = Vec::new();
        let mut path: String = String::new();
        for segment in self.path.split('/').filter(|s: &&str| !s.is_empty()) {
            path = join_virtual_path(&path, segment);
            crumbs.push(Breadcrumb {
                name: segment.to_string(),
                path: path.clone(),
            });
        }
        crumbs
    }

    /// Select an entry of the current listing.
    ///
    /// # Returns
    /// `false` when the key is not listed (nothing changes).
    pub fn select(&mut self, key: &str) -> bool {
        if !self.has_entry(key) {
            return false;
        }
        self.selection.insert(key);
        true
    }

    /// Deselect a key; returns whether it was selected.
    pub fn deselect(&mut self, key: &str) -> bool {
        self.selection.remove(key)
    }

    /// Flip the selection state of a listed key.
    ///
    /// # Returns
    /// Whether the key is selected afterwards.
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.selection.remove(key) {
            return false;
        }
        self.select(key)
    }

    pub fn select_all(&mut self) {
        for entry in &self.entries {
            self.selection.insert(&entry.key);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.selection.contains(key)
    }

    /// Selected entries, in display order.
    pub fn selected_entries(&self) -> Vec<&Entry> {
        self.entries
            .iter()
            .filter(|e: &&Entry| self.selection.contains(&e.key))
            .collect()
    }

    /// Change the sort and re-sort the current entries.
    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
        sort_entries(&mut self.entries, sort);
    }

    fn has_entry(&self, key: &str) -> bool {
        self.entries.iter().any(|e: &Entry| e.key == key)
    }
}
