//! Deletion of files and folders.
//!
//! Every object is removed independently: one failure never aborts its
//! siblings, and `NotFound` counts as removed.

use std::collections::HashSet;

use futures::stream::{self, StreamExt};
use rusty_media_storage::{ObjectFailure, StorageClient, StorageError};

use super::{item_key, DeleteResult, MediaFileSystem};
use crate::entry::Entry;
use crate::error::VfsError;

/// One planned removal, or a failure found while planning.
enum Target {
    Remove(String),
    Failed(ObjectFailure),
}

impl<C: StorageClient + ?Sized> MediaFileSystem<'_, C> {
    /// Delete files and folders.
    ///
    /// Folders are enumerated recursively; every listed object and the folder
    /// marker are removed. Removals run with bounded concurrency.
    ///
    /// # Arguments
    /// * `items` - Entries to delete
    ///
    /// # Returns
    /// Keys removed and keys that failed, aggregated across all items in input
    /// order. A folder whose enumeration fails is recorded as one failure for
    /// its prefix.
    pub async fn delete(&self, items: &[Entry]) -> DeleteResult {
        let mut targets: Vec<Target> = Vec::new();
        for item in items {
            // A folder key without its separator would also match siblings.
            let key: String = item_key(&item.key, item.is_folder());
            if let Err(err) = self.ensure_owned(&key) {
                targets.push(Target::Failed(ObjectFailure::new(
                    &key,
                    StorageError::AccessDenied {
                        bucket: self.location.bucket.clone(),
                        key: key.clone(),
                        message: err.to_string(),
                    },
                )));
                continue;
            }

            if !item.is_folder() {
                targets.push(Target::Remove(key));
                continue;
            }

            match self.list_all(&key).await {
                Ok(keys) => {
                    targets.extend(keys.into_iter().map(Target::Remove));
                    targets.push(Target::Remove(key));
                }
                Err(VfsError::Storage(error)) => {
                    log::warn!("Failed to enumerate {} for deletion: {}", key, error);
                    targets.push(Target::Failed(ObjectFailure::new(&key, error)));
                }
                Err(other) => {
                    targets.push(Target::Failed(ObjectFailure::new(
                        &key,
                        StorageError::Other {
                            message: other.to_string(),
                        },
                    )));
                }
            }
        }

        // Overlapping selections (a folder and one of its files) list a key twice.
        let mut seen: HashSet<String> = HashSet::new();
        targets.retain(|t: &Target| match t {
            Target::Remove(key) => seen.insert(key.clone()),
            Target::Failed(_) => true,
        });

        let max_concurrency: usize = self.options.max_concurrency.max(1);
        let outcomes: Vec<(String, Option<ObjectFailure>)> = stream::iter(targets)
            .map(|target: Target| async move {
                match target {
                    Target::Remove(key) => {
                        let failure: Option<ObjectFailure> = self.remove_object(&key).await;
                        (key, failure)
                    }
                    Target::Failed(failure) => (failure.key.clone(), Some(failure)),
                }
            })
            .buffered(max_concurrency)
            .collect()
            .await;

        let mut result = DeleteResult::default();
        for (key, failure) in outcomes {
            result.record(key, failure);
        }

        if !result.failed.is_empty() {
            log::warn!(
                "Delete finished with {} failure(s) out of {} object(s)",
                result.failed.len(),
                result.failed.len() + result.succeeded.len()
            );
        }
        result
    }

    /// Remove every key with bounded concurrency, in input order.
    pub(super) async fn remove_objects(
        &self,
        keys: Vec<String>,
    ) -> Vec<(String, Option<ObjectFailure>)> {
        let max_concurrency: usize = self.options.max_concurrency.max(1);
        stream::iter(keys)
            .map(|key: String| async move {
                let failure: Option<ObjectFailure> = self.remove_object(&key).await;
                (key, failure)
            })
            .buffered(max_concurrency)
            .collect()
            .await
    }

    /// Remove one object; an already-missing object is not a failure.
    async fn remove_object(&self, key: &str) -> Option<ObjectFailure> {
        match self.client.delete_object(&self.location.bucket, key).await {
            Ok(()) => None,
            Err(e) if e.is_not_found() => None,
            Err(e) => Some(ObjectFailure::new(key, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_media_storage::{FailureOp, MediaLocation, MemoryStorageClient};

    use super::*;

    fn fs(client: &MemoryStorageClient) -> MediaFileSystem<'_, MemoryStorageClient> {
        MediaFileSystem::new(client, MediaLocation::new("b", "u"))
    }

    fn file(key: &str) -> Entry {
        Entry::file(key, rusty_media_common::last_segment(key), 1, None)
    }

    #[tokio::test]
    async fn test_delete_folder_recursively() {
        let client = MemoryStorageClient::new();
        client.insert("b", "media/u/f/", vec![]);
        client.insert("b", "media/u/f/a.jpg", vec![1]);
        client.insert("b", "media/u/f/sub/b.jpg", vec![1]);
        client.insert("b", "media/u/keep.jpg", vec![1]);

        let result: DeleteResult = fs(&client)
            .delete(&[Entry::folder("media/u/f/", "f")])
            .await;

        assert!(result.is_complete());
        assert_eq!(result.succeeded.len(), 3);
        assert_eq!(client.keys("b"), vec!["media/u/keep.jpg"]);
    }

    #[tokio::test]
    async fn test_delete_implicit_folder_without_marker() {
        let client = MemoryStorageClient::new();
        client.insert("b", "media/u/f/a.jpg", vec![1]);

        let result: DeleteResult = fs(&client)
            .delete(&[Entry::folder("media/u/f/", "f")])
            .await;

        assert!(result.is_complete());
        assert_eq!(result.succeeded, vec!["media/u/f/a.jpg", "media/u/f/"]);
        assert!(client.keys("b").is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_file_counts_as_success() {
        let client = MemoryStorageClient::new();
        let result: DeleteResult = fs(&client).delete(&[file("media/u/gone.jpg")]).await;
        assert_eq!(result.succeeded, vec!["media/u/gone.jpg"]);
    }

    #[tokio::test]
    async fn test_listing_failure_recorded_for_folder_only() {
        let client = MemoryStorageClient::new();
        client.insert("b", "media/u/a.jpg", vec![1]);
        client.fail_always(FailureOp::List, "media/u/f/");

        let result: DeleteResult = fs(&client)
            .delete(&[Entry::folder("media/u/f/", "f"), file("media/u/a.jpg")])
            .await;

        assert_eq!(result.succeeded, vec!["media/u/a.jpg"]);
        assert_eq!(result.failed.len(), 1);
        assert_eq!(result.failed[0].key, "media/u/f/");
    }

    #[tokio::test]
    async fn test_keys_outside_namespace_are_refused() {
        let client = MemoryStorageClient::new();
        client.insert("b", "media/other/a.jpg", vec![1]);

        let result: DeleteResult = fs(&client)
            .delete(&[file("media/other/a.jpg"), Entry::folder("media/u/", "u")])
            .await;

        assert!(result.succeeded.is_empty());
        assert_eq!(result.failed.len(), 2);
        assert!(matches!(result.failed[0].error, StorageError::AccessDenied { .. }));
        assert!(client.contains("b", "media/other/a.jpg"));
        assert_eq!(client.call_count(FailureOp::Delete), 0);
    }

    #[tokio::test]
    async fn test_overlapping_items_remove_each_key_once() {
        let client = MemoryStorageClient::new();
        client.insert("b", "media/u/f/a.jpg", vec![1]);

        let result: DeleteResult = fs(&client)
            .delete(&[Entry::folder("media/u/f/", "f"), file("media/u/f/a.jpg")])
            .await;

        assert_eq!(result.succeeded, vec!["media/u/f/a.jpg", "media/u/f/"]);
        assert_eq!(client.calls_for(FailureOp::Delete).len(), 2);
    }

    #[tokio::test]
    async fn test_folder_key_without_separator_spares_siblings() {
        let client = MemoryStorageClient::new();
        client.insert("b", "media/u/f/a.jpg", vec![1]);
        client.insert("b", "media/u/f2/keep.jpg", vec![1]);
        client.insert("b", "media/u/f.jpg", vec![1]);

        let result: DeleteResult = fs(&client)
            .delete(&[Entry::folder("media/u/f", "f")])
            .await;

        assert!(result.is_complete());
        assert_eq!(result.succeeded, vec!["media/u/f/a.jpg", "media/u/f/"]);
        assert_eq!(
            client.keys("b"),
            vec!["media/u/f.jpg", "media/u/f2/keep.jpg"]
        );
    }

    #[tokio::test]
    async fn test_marker_only_folder_removes_marker_once() {
        let client = MemoryStorageClient::new();
        client.insert("b", "media/u/empty/", vec![]);
        client.insert("b", "media/u/keep.jpg", vec![1]);

        let result: DeleteResult = fs(&client)
            .delete(&[Entry::folder("media/u/empty/", "empty")])
            .await;

        assert!(result.is_complete());
        assert_eq!(result.succeeded, vec!["media/u/empty/"]);
        assert_eq!(client.calls_for(FailureOp::Delete), vec!["media/u/empty/"]);
        assert_eq!(client.keys("b"), vec!["media/u/keep.jpg"]);
    }

    #[tokio::test]
    async fn test_folder_with_nothing_stored_succeeds() {
        let client = MemoryStorageClient::new();

        let result: DeleteResult = fs(&client)
            .delete(&[Entry::folder("media/u/ghost/", "ghost")])
            .await;

        assert_eq!(result.succeeded, vec!["media/u/ghost/"]);
        assert!(result.failed.is_empty());
    }
}
