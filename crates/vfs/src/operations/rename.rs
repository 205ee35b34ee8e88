//! Rename, and the copy-then-delete relocation shared with move.
//!
//! A relocation has two phases. The copy phase is all-or-nothing from the
//! caller's point of view: the first failed copy fails the operation, and
//! destinations already written stay where they are. The delete phase only
//! downgrades success to a warning.

use rusty_media_common::{
    last_segment, parent_prefix, replace_last_segment, validate_name, ProgressCallback,
};
use rusty_media_storage::{ListOptions, ObjectFailure, ObjectListing, StorageClient};

use super::{item_key, MediaFileSystem, RenameProgress, RenameResult};
use crate::entry::{Entry, EntryKind};
use crate::error::VfsError;
use crate::listing::parse_object_listing;

impl<C: StorageClient + ?Sized> MediaFileSystem<'_, C> {
    /// Rename a file or folder in place.
    ///
    /// # Arguments
    /// * `current_key` - Key of the item (folders with or without trailing `/`)
    /// * `new_name` - Replacement for the last segment
    /// * `is_folder` - Whether the item is a folder
    /// * `progress` - Optional callback, invoked after each object copy of a folder
    ///
    /// # Returns
    /// `Failed` when the name is taken or a copy fails; `RenamedWithWarning`
    /// when some originals could not be removed.
    ///
    /// # Errors
    /// Invalid names or keys, and failures listing the store.
    pub async fn rename(
        &self,
        current_key: &str,
        new_name: &str,
        is_folder: bool,
        progress: Option<&dyn ProgressCallback<RenameProgress>>,
    ) -> Result<RenameResult, VfsError> {
        validate_name(new_name)?;
        let source: String = item_key(current_key, is_folder);
        self.ensure_owned(&source)?;

        let destination: String = replace_last_segment(&source, new_name);
        self.relocate(&source, &destination, is_folder, progress)
            .await
    }

    /// Copy `source` (file key or folder prefix) to `destination`, then remove
    /// the originals.
    pub(super) async fn relocate(
        &self,
        source: &str,
        destination: &str,
        is_folder: bool,
        progress: Option<&dyn ProgressCallback<RenameProgress>>,
    ) -> Result<RenameResult, VfsError> {
        if source == destination {
            return Ok(RenameResult::Renamed {
                new_key: destination.to_string(),
                succeeded: 0,
            });
        }

        if let Some(message) = self.find_collision(destination, is_folder).await? {
            log::debug!("Refusing to relocate {}: {}", source, message);
            return Ok(RenameResult::failed(message));
        }

        let pairs: Vec<(String, String)> = if is_folder {
            self.list_all(source)
                .await?
                .into_iter()
                .filter_map(|key: String| {
                    let rest: String = key.strip_prefix(source)?.to_string();
                    Some((key, format!("{}{}", destination, rest)))
                })
                .collect()
        } else {
            vec![(source.to_string(), destination.to_string())]
        };

        let total: usize = pairs.len();
        for (index, (from, to)) in pairs.iter().enumerate() {
            if let Err(e) = self
                .client
                .copy_object(&self.location.bucket, from, to)
                .await
            {
                log::warn!(
                    "Copy {} -> {} failed after {} of {} object(s): {}",
                    from,
                    to,
                    index,
                    total,
                    e
                );
                return Ok(RenameResult::failed(format!(
                    "Failed to copy '{}': {}",
                    last_segment(from),
                    e
                )));
            }

            if is_folder {
                if let Some(cb) = progress {
                    cb.on_progress(&RenameProgress {
                        current: index + 1,
                        total,
                    });
                }
            }
        }

        let mut originals: Vec<String> = pairs.into_iter().map(|(from, _)| from).collect();
        if is_folder && !originals.iter().any(|k: &String| k == source) {
            originals.push(source.to_string());
        }

        let failures: Vec<ObjectFailure> = self
            .remove_objects(originals)
            .await
            .into_iter()
            .filter_map(|(_, failure)| failure)
            .collect();

        match failures.first() {
            None => Ok(RenameResult::Renamed {
                new_key: destination.to_string(),
                succeeded: total,
            }),
            Some(first) => {
                let warning: String = format!(
                    "Renamed successfully, but failed to delete {} original object(s): {}",
                    failures.len(),
                    first.error
                );
                log::warn!("{} -> {}: {}", source, destination, warning);
                Ok(RenameResult::RenamedWithWarning {
                    new_key: destination.to_string(),
                    succeeded: total,
                    warning,
                })
            }
        }
    }

    /// Check whether the destination's parent already holds an item with the
    /// same name and kind. Check-then-act: a concurrent writer can still race.
    async fn find_collision(
        &self,
        destination: &str,
        is_folder: bool,
    ) -> Result<Option<String>, VfsError> {
        let parent: &str = parent_prefix(destination);
        let name: &str = last_segment(destination);
        let kind: EntryKind = if is_folder {
            EntryKind::Folder
        } else {
            EntryKind::File
        };

        let listing: ObjectListing = self
            .client
            .list_objects(&self.location.bucket, parent, &ListOptions::shallow())
            .await?;
        let taken: bool = parse_object_listing(parent, &listing)
            .iter()
            .any(|e: &Entry| e.name == name && e.kind == kind);

        Ok(taken.then(|| format!("An item named '{}' already exists", name)))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use rusty_media_common::progress_fn;
    use rusty_media_storage::{FailureOp, MediaLocation, MemoryStorageClient};

    use super::*;

    fn fs(client: &MemoryStorageClient) -> MediaFileSystem<'_, MemoryStorageClient> {
        MediaFileSystem::new(client, MediaLocation::new("b", "u"))
    }

    #[tokio::test]
    async fn test_rename_file() {
        let client = MemoryStorageClient::new();
        client.insert("b", "media/u/p/old.jpg", b"img".to_vec());

        let result: RenameResult = fs(&client)
            .rename("media/u/p/old.jpg", "new.jpg", false, None)
            .await
            .unwrap();

        assert_eq!(
            result,
            RenameResult::Renamed {
                new_key: "media/u/p/new.jpg".into(),
                succeeded: 1
            }
        );
        assert_eq!(client.keys("b"), vec!["media/u/p/new.jpg"]);
    }

    #[tokio::test]
    async fn test_rename_collision_issues_no_copy() {
        let client = MemoryStorageClient::new();
        client.insert("b", "media/u/old.jpg", vec![1]);
        client.insert("b", "media/u/new.jpg", vec![2]);

        let result: RenameResult = fs(&client)
            .rename("media/u/old.jpg", "new.jpg", false, None)
            .await
            .unwrap();

        assert!(!result.is_success());
        assert!(result.error().unwrap().contains("already exists"));
        assert_eq!(client.call_count(FailureOp::Copy), 0);
    }

    #[tokio::test]
    async fn test_folder_with_same_name_as_file_is_not_a_collision() {
        let client = MemoryStorageClient::new();
        client.insert("b", "media/u/old/a.jpg", vec![1]);
        client.insert("b", "media/u/new", vec![2]);

        let result: RenameResult = fs(&client)
            .rename("media/u/old/", "new", true, None)
            .await
            .unwrap();

        assert!(result.is_success());
        assert!(client.contains("b", "media/u/new/a.jpg"));
        assert!(client.contains("b", "media/u/new"));
    }

    #[tokio::test]
    async fn test_rename_delete_failure_is_warning() {
        let client = MemoryStorageClient::new();
        client.insert("b", "media/u/old.jpg", vec![1]);
        client.fail_always(FailureOp::Delete, "media/u/old.jpg");

        let result: RenameResult = fs(&client)
            .rename("media/u/old.jpg", "new.jpg", false, None)
            .await
            .unwrap();

        assert!(result.is_success());
        assert!(!result.warning().unwrap().is_empty());
        assert!(client.contains("b", "media/u/new.jpg"));
        assert!(client.contains("b", "media/u/old.jpg"));
    }

    #[tokio::test]
    async fn test_folder_copy_failure_leaves_partial_copies() {
        let client = MemoryStorageClient::new();
        client.insert("b", "media/u/f/", vec![]);
        client.insert("b", "media/u/f/a.jpg", vec![1]);
        client.insert("b", "media/u/f/b.jpg", vec![1]);
        client.fail_always(FailureOp::Copy, "media/u/f/b.jpg");

        let result: RenameResult = fs(&client)
            .rename("media/u/f/", "g", true, None)
            .await
            .unwrap();

        assert!(!result.is_success());
        assert!(client.contains("b", "media/u/g/a.jpg"));
        assert!(client.contains("b", "media/u/f/a.jpg"));
        assert!(client.contains("b", "media/u/f/b.jpg"));
        assert_eq!(client.call_count(FailureOp::Delete), 0);
    }

    #[tokio::test]
    async fn test_folder_rename_reports_progress_in_order() {
        let client = MemoryStorageClient::new();
        client.insert("b", "media/u/f/a.jpg", vec![1]);
        client.insert("b", "media/u/f/sub/b.jpg", vec![1]);
        let seen: Mutex<Vec<RenameProgress>> = Mutex::new(Vec::new());
        let callback = progress_fn(|p: &RenameProgress| seen.lock().unwrap().push(*p));

        let result: RenameResult = fs(&client)
            .rename("media/u/f", "g", true, Some(&callback))
            .await
            .unwrap();

        assert_eq!(result.new_key(), Some("media/u/g/"));
        assert_eq!(result.succeeded(), Some(2));
        assert_eq!(
            seen.into_inner().unwrap(),
            vec![
                RenameProgress { current: 1, total: 2 },
                RenameProgress { current: 2, total: 2 }
            ]
        );
        assert_eq!(client.keys("b"), vec!["media/u/g/a.jpg", "media/u/g/sub/b.jpg"]);
    }

    #[tokio::test]
    async fn test_rename_to_same_name_is_noop() {
        let client = MemoryStorageClient::new();
        client.insert("b", "media/u/a.jpg", vec![1]);

        let result: RenameResult = fs(&client)
            .rename("media/u/a.jpg", "a.jpg", false, None)
            .await
            .unwrap();

        assert!(result.is_success());
        assert_eq!(client.call_count(FailureOp::List), 0);
        assert!(client.contains("b", "media/u/a.jpg"));
    }

    #[tokio::test]
    async fn test_rename_rejects_invalid_input() {
        let client = MemoryStorageClient::new();
        let fs = fs(&client);

        assert!(matches!(
            fs.rename("media/u/a.jpg", "x/y", false, None).await,
            Err(VfsError::Key(_))
        ));
        assert!(matches!(
            fs.rename("media/other/a.jpg", "b.jpg", false, None).await,
            Err(VfsError::InvalidArgument(_))
        ));
    }
}
