//! Sorting configuration and logic for entry listings.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::entry::Entry;

/// Column to sort entries by.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SortColumn {
    #[default]
    Name,
    Size,
    Modified,
}

/// Sort order (ascending or descending).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Active sort column and order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SortSpec {
    pub column: SortColumn,
    pub order: SortOrder,
}

impl SortSpec {
    /// Create a sort spec.
    pub fn new(column: SortColumn, order: SortOrder) -> Self {
        Self { column, order }
    }
}

/// Compares two names using natural (alphanumeric) sort, case-insensitive.
///
/// `file2` sorts before `file10`. Names equal ignoring case fall back to a
/// byte comparison so the order is total.
pub fn compare_names_natural(a: &str, b: &str) -> Ordering {
    alphanumeric_sort::compare_str(a.to_lowercase(), b.to_lowercase()).then_with(|| a.cmp(b))
}

/// Sorts entries by the given spec.
/// Folders always come first, whatever the column and order.
/// Folders have no size or timestamp, so among themselves they sort by name.
pub fn sort_entries(entries: &mut [Entry], spec: SortSpec) {
    entries.sort_by(|a, b| {
        match a.kind.cmp(&b.kind) {
            Ordering::Equal => {}
            other => return other,
        }

        let by_name: Ordering = compare_names_natural(&a.name, &b.name);
        let primary: Ordering = match spec.column {
            SortColumn::Name => by_name,
            SortColumn::Size => a.size.cmp(&b.size).then(by_name),
            SortColumn::Modified => a.last_modified.cmp(&b.last_modified).then(by_name),
        };

        match spec.order {
            SortOrder::Ascending => primary,
            SortOrder::Descending => primary.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_natural_order() {
        let mut values: Vec<&str> = vec!["file10", "file2", "file1"];
        values.sort_by(|a, b| compare_names_natural(a, b));
        assert_eq!(values, vec!["file1", "file2", "file10"]);
    }

    #[test]
    fn test_natural_order_case_insensitive() {
        let mut values: Vec<&str> = vec!["b", "A", "a", "B10", "b9"];
        values.sort_by(|a, b| compare_names_natural(a, b));
        assert_eq!(values, vec!["A", "a", "b", "b9", "B10"]);
    }

    #[test]
    fn test_folders_first_in_every_order() {
        let mut entries: Vec<Entry> = vec![
            Entry::file("k/a.jpg", "a.jpg", 1, Some(1)),
            Entry::folder("k/z/", "z"),
            Entry::file("k/b.jpg", "b.jpg", 5, Some(2)),
            Entry::folder("k/y/", "y"),
        ];

        sort_entries(&mut entries, SortSpec::new(SortColumn::Size, SortOrder::Descending));
        assert_eq!(names(&entries), vec!["z", "y", "b.jpg", "a.jpg"]);

        sort_entries(&mut entries, SortSpec::default());
        assert_eq!(names(&entries), vec!["y", "z", "a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_sort_by_modified() {
        let mut entries: Vec<Entry> = vec![
            Entry::file("k/new.jpg", "new.jpg", 1, Some(200)),
            Entry::file("k/old.jpg", "old.jpg", 1, Some(100)),
        ];
        sort_entries(&mut entries, SortSpec::new(SortColumn::Modified, SortOrder::Ascending));
        assert_eq!(names(&entries), vec!["old.jpg", "new.jpg"]);
    }
}
