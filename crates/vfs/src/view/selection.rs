//! Set of selected entry keys.

use std::collections::BTreeSet;

/// Selected keys of one folder view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    keys: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Selected keys in key order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub(crate) fn insert(&mut self, key: &str) -> bool {
        self.keys.insert(key.to_string())
    }

    pub(crate) fn remove(&mut self, key: &str) -> bool {
        self.keys.remove(key)
    }

    pub(crate) fn clear(&mut self) {
        self.keys.clear();
    }

    /// Keep only keys accepted by `keep`.
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.keys.retain(|k: &String| keep(k));
    }
}
