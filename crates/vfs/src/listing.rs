//! Derive a typed folder/file view from a flat object listing.
//!
//! This is the one place where flat keys become a tree. Every consumer
//! (navigation, selection, rename collision checks) goes through
//! [`parse_listing`].
//!
//! Input is everything the store returned under a base prefix plus the
//! optional "excluded subpaths" hint (prefixes with deeper objects that were
//! not enumerated). Output is deduplicated by `(name, kind)` and sorted with
//! folders first, natural order within each kind.

use std::collections::HashSet;

use rusty_media_common::KEY_SEPARATOR;
use rusty_media_storage::{ObjectInfo, ObjectListing};

use crate::entry::{Entry, EntryKind};
use crate::sorting::{sort_entries, SortSpec};

/// Parse a raw listing under `base_prefix` into entries of that level.
///
/// # Arguments
/// * `base_prefix` - Prefix that was listed, with trailing separator (or empty)
/// * `items` - Objects returned by the store, shallow or recursive
/// * `excluded_subpaths` - Prefix hints for folders that were not enumerated
///
/// # Returns
/// Unique entries, folders first, then files, each in natural name order.
pub fn parse_listing(
    base_prefix: &str,
    items: &[ObjectInfo],
    excluded_subpaths: &[String],
) -> Vec<Entry> {
    let mut seen: HashSet<(String, EntryKind)> = HashSet::new();
    let mut entries: Vec<Entry> = Vec::new();

    let mut push = |entry: Entry| {
        if seen.insert((entry.name.clone(), entry.kind)) {
            entries.push(entry);
        }
    };

    for item in items {
        if item.key == base_prefix {
            continue;
        }
        let Some(relative) = item.key.strip_prefix(base_prefix) else {
            continue;
        };

        let mut parts = relative.split(KEY_SEPARATOR);
        let first: &str = parts.next().unwrap_or("");
        if first.is_empty() {
            continue;
        }

        let has_more_segments: bool = parts.any(|s: &str| !s.is_empty());
        if !has_more_segments && !relative.ends_with(KEY_SEPARATOR) {
            push(Entry::file(
                item.key.clone(),
                first,
                item.size,
                item.last_modified,
            ));
        } else {
            push(folder_entry(base_prefix, first));
        }
    }

    for subpath in excluded_subpaths {
        let Some(relative) = subpath.strip_prefix(base_prefix) else {
            continue;
        };
        let first: &str = relative.split(KEY_SEPARATOR).next().unwrap_or("");
        if !first.is_empty() {
            push(folder_entry(base_prefix, first));
        }
    }

    sort_entries(&mut entries, SortSpec::default());
    entries
}

/// Parse a listing returned by `StorageClient::list_objects`.
pub fn parse_object_listing(base_prefix: &str, listing: &ObjectListing) -> Vec<Entry> {
    parse_listing(base_prefix, &listing.objects, &listing.excluded_subpaths)
}

fn folder_entry(base_prefix: &str, name: &str) -> Entry {
    Entry::folder(format!("{}{}/", base_prefix, name), name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(key: &str) -> ObjectInfo {
        ObjectInfo::new(key, 10)
    }

    fn summary(entries: &[Entry]) -> Vec<(&str, EntryKind)> {
        entries.iter().map(|e| (e.name.as_str(), e.kind)).collect()
    }

    #[test]
    fn test_two_folders_two_files() {
        let items: Vec<ObjectInfo> = vec![
            info("media/u/photo.jpg"),
            info("media/u/folder1/"),
            info("media/u/folder2/"),
            info("media/u/video.mp4"),
        ];

        let entries: Vec<Entry> = parse_listing("media/u/", &items, &[]);

        assert_eq!(
            summary(&entries),
            vec![
                ("folder1", EntryKind::Folder),
                ("folder2", EntryKind::Folder),
                ("photo.jpg", EntryKind::File),
                ("video.mp4", EntryKind::File),
            ]
        );
        assert_eq!(entries[0].key, "media/u/folder1/");
        assert_eq!(entries[2].size, Some(10));
    }

    #[test]
    fn test_base_marker_is_dropped() {
        let items: Vec<ObjectInfo> = vec![info("media/u/a/"), info("media/u/a/x.jpg")];
        let entries: Vec<Entry> = parse_listing("media/u/a/", &items, &[]);
        assert_eq!(summary(&entries), vec![("x.jpg", EntryKind::File)]);
    }

    #[test]
    fn test_marker_and_hint_collapse_to_one_folder() {
        let items: Vec<ObjectInfo> = vec![info("media/u/trips/")];
        let hints: Vec<String> = vec!["media/u/trips/".to_string()];

        let entries: Vec<Entry> = parse_listing("media/u/", &items, &hints);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, EntryKind::Folder);
        assert_eq!(entries[0].key, "media/u/trips/");
    }

    #[test]
    fn test_recursive_items_infer_implicit_folders() {
        let items: Vec<ObjectInfo> = vec![
            info("media/u/a/b/c.jpg"),
            info("media/u/a/d.jpg"),
            info("media/u/e.jpg"),
        ];
        let entries: Vec<Entry> = parse_listing("media/u/", &items, &[]);
        assert_eq!(
            summary(&entries),
            vec![("a", EntryKind::Folder), ("e.jpg", EntryKind::File)]
        );
    }

    #[test]
    fn test_file_and_folder_with_same_name_both_kept() {
        let items: Vec<ObjectInfo> = vec![info("media/u/x"), info("media/u/x/")];
        let entries: Vec<Entry> = parse_listing("media/u/", &items, &[]);
        assert_eq!(
            summary(&entries),
            vec![("x", EntryKind::Folder), ("x", EntryKind::File)]
        );
    }

    #[test]
    fn test_natural_sort_within_files() {
        let items: Vec<ObjectInfo> = vec![
            info("media/u/file10"),
            info("media/u/file2"),
            info("media/u/file1"),
        ];
        let entries: Vec<Entry> = parse_listing("media/u/", &items, &[]);
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["file1", "file2", "file10"]);
    }

    #[test]
    fn test_ignores_keys_outside_base_and_empty_segments() {
        let items: Vec<ObjectInfo> = vec![
            info("media/v/other.jpg"),
            info("media/u//double.jpg"),
            info("media/u/ok.jpg"),
        ];
        let hints: Vec<String> = vec!["media/v/elsewhere/".to_string()];
        let entries: Vec<Entry> = parse_listing("media/u/", &items, &hints);
        assert_eq!(summary(&entries), vec![("ok.jpg", EntryKind::File)]);
    }

    #[test]
    fn test_non_ascii_names() {
        let items: Vec<ObjectInfo> = vec![info("media/u/写真/旅行.jpg")];
        let entries: Vec<Entry> = parse_listing("media/u/", &items, &[]);
        assert_eq!(entries[0].name, "写真");
        assert_eq!(entries[0].key, "media/u/写真/");
    }
}
