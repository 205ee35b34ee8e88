//! Folder-emulation operations over a flat object store.
//!
//! The store has no directory primitive: a folder is a key prefix, optionally
//! materialized as a zero-byte marker object ending in `/`. Every operation
//! that touches a folder enumerates the objects under its prefix and mutates
//! them one by one, so partial completion is reported in the result types
//! rather than raised.
//!
//! # Example
//!
//! ```ignore
//! let fs = MediaFileSystem::new(&client, MediaLocation::new("bucket", owner_id));
//! let entries = fs.list_folder("photos/2024").await?;
//! let result = fs.delete(&entries).await;
//! ```

mod create_folder;
mod delete;
mod move_op;
mod rename;
mod types;
mod upload;

pub use types::{DeleteResult, MoveResult, RenameProgress, RenameResult, UploadFile};

use rusty_media_common::{is_within_prefix, KEY_SEPARATOR};
use rusty_media_storage::{ListOptions, MediaLocation, ObjectListing, StorageClient};

use crate::entry::Entry;
use crate::error::VfsError;
use crate::listing::parse_object_listing;
use crate::options::OperationOptions;

/// Virtual filesystem view of one owner's media namespace.
pub struct MediaFileSystem<'a, C: StorageClient + ?Sized> {
    /// The storage client.
    client: &'a C,
    /// Bucket and owner namespace.
    location: MediaLocation,
    /// Operation options.
    options: OperationOptions,
}

impl<'a, C: StorageClient + ?Sized> MediaFileSystem<'a, C> {
    /// Create a filesystem bound to a bucket and owner.
    ///
    /// # Arguments
    /// * `client` - Storage client
    /// * `location` - Bucket and owner namespace
    pub fn new(client: &'a C, location: MediaLocation) -> Self {
        Self {
            client,
            location,
            options: OperationOptions::default(),
        }
    }

    /// Set operation options.
    ///
    /// # Arguments
    /// * `options` - Operation options
    pub fn with_options(mut self, options: OperationOptions) -> Self {
        self.options = options;
        self
    }

    /// Bucket and owner this filesystem works in.
    pub fn location(&self) -> &MediaLocation {
        &self.location
    }

    /// List the direct children of a folder.
    ///
    /// # Arguments
    /// * `folder` - Virtual path or full folder key; `""` is the owner root
    ///
    /// # Returns
    /// Entries of that level, folders first, natural order within kind.
    ///
    /// # Errors
    /// The store's listing error, unchanged.
    pub async fn list_folder(&self, folder: &str) -> Result<Vec<Entry>, VfsError> {
        let prefix: String = self.folder_prefix_for(folder);
        let listing: ObjectListing = self
            .client
            .list_objects(&self.location.bucket, &prefix, &ListOptions::shallow())
            .await?;
        Ok(parse_object_listing(&prefix, &listing))
    }

    /// Presigned download URL for a file key.
    ///
    /// # Arguments
    /// * `key` - Full object key
    pub async fn signed_url(&self, key: &str) -> Result<String, VfsError> {
        self.ensure_owned(key)?;
        let url: String = self
            .client
            .presigned_get_url(&self.location.bucket, key, self.options.presign_expiry)
            .await?;
        Ok(url)
    }

    /// Folder prefix (with trailing separator) for a virtual path or full key.
    pub(crate) fn folder_prefix_for(&self, folder: &str) -> String {
        self.location
            .folder_prefix(&self.location.virtual_path(folder))
    }

    /// Every key under `prefix`, recursively.
    pub(crate) async fn list_all(&self, prefix: &str) -> Result<Vec<String>, VfsError> {
        let listing: ObjectListing = self
            .client
            .list_objects(&self.location.bucket, prefix, &ListOptions::recursive())
            .await?;
        Ok(listing.objects.into_iter().map(|o| o.key).collect())
    }

    /// Reject keys outside the owner's namespace and the namespace root itself.
    pub(crate) fn ensure_owned(&self, key: &str) -> Result<(), VfsError> {
        let root: String = self.location.media_root();
        if key.len() <= root.len() || !is_within_prefix(key, &root) {
            return Err(VfsError::InvalidArgument(format!(
                "'{}' is not an item under {}",
                key, root
            )));
        }
        Ok(())
    }
}

/// Normalize an item key to the form its kind requires.
pub(crate) fn item_key(key: &str, is_folder: bool) -> String {
    let bare: &str = key.trim_end_matches(KEY_SEPARATOR);
    if is_folder {
        format!("{}/", bare)
    } else {
        bare.to_string()
    }
}
