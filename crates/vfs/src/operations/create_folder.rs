//! Folder creation.

use rusty_media_common::validate_name;
use rusty_media_storage::StorageClient;

use super::MediaFileSystem;
use crate::error::VfsError;

impl<C: StorageClient + ?Sized> MediaFileSystem<'_, C> {
    /// Create a folder by writing a zero-byte marker object.
    ///
    /// # Arguments
    /// * `base` - Parent folder, as a virtual path or full key
    /// * `name` - New folder name (single segment)
    ///
    /// # Returns
    /// The new folder's key, with trailing separator.
    ///
    /// # Errors
    /// `VfsError::Key` for an unusable name, `VfsError::StorageWrite` when the
    /// marker could not be written.
    pub async fn create_folder(&self, base: &str, name: &str) -> Result<String, VfsError> {
        validate_name(name)?;

        let key: String = format!("{}{}/", self.folder_prefix_for(base), name);
        self.client
            .put_object(&self.location.bucket, &key, &[], None)
            .await
            .map_err(|source| VfsError::StorageWrite {
                key: key.clone(),
                source,
            })?;

        log::debug!("Created folder marker {}", key);
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use rusty_media_storage::{FailureOp, MediaLocation, MemoryStorageClient};

    use super::*;

    #[tokio::test]
    async fn test_create_folder_writes_marker() {
        let client = MemoryStorageClient::new();
        let fs = MediaFileSystem::new(&client, MediaLocation::new("b", "u"));

        let key: String = fs.create_folder("photos", "2024").await.unwrap();

        assert_eq!(key, "media/u/photos/2024/");
        assert_eq!(client.object_data("b", &key), Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_create_folder_at_root_from_key() {
        let client = MemoryStorageClient::new();
        let fs = MediaFileSystem::new(&client, MediaLocation::new("b", "u"));
        let key: String = fs.create_folder("media/u/", "new").await.unwrap();
        assert_eq!(key, "media/u/new/");
    }

    #[tokio::test]
    async fn test_create_folder_write_failure() {
        let client = MemoryStorageClient::new();
        client.fail_always(FailureOp::Put, "media/u/x/");
        let fs = MediaFileSystem::new(&client, MediaLocation::new("b", "u"));

        let err: VfsError = fs.create_folder("", "x").await.unwrap_err();
        assert!(matches!(err, VfsError::StorageWrite { ref key, .. } if key == "media/u/x/"));
    }

    #[tokio::test]
    async fn test_create_folder_rejects_bad_name() {
        let client = MemoryStorageClient::new();
        let fs = MediaFileSystem::new(&client, MediaLocation::new("b", "u"));

        assert!(matches!(fs.create_folder("", "a/b").await, Err(VfsError::Key(_))));
        assert!(matches!(fs.create_folder("", "").await, Err(VfsError::Key(_))));
        assert_eq!(client.call_count(FailureOp::Put), 0);
    }
}
