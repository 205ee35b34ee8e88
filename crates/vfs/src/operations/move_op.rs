//! Moving items between folders.

use rusty_media_common::{last_segment, ProgressCallback};
use rusty_media_storage::StorageClient;

use super::{item_key, MediaFileSystem, MoveResult, RenameProgress, RenameResult};
use crate::entry::Entry;
use crate::error::VfsError;

impl<C: StorageClient + ?Sized> MediaFileSystem<'_, C> {
    /// Move a file or folder into another folder, keeping its name.
    ///
    /// # Arguments
    /// * `current_key` - Key of the item
    /// * `is_folder` - Whether the item is a folder
    /// * `destination_folder` - Target folder, as a virtual path or full key
    /// * `progress` - Optional callback, invoked after each object copy of a folder
    ///
    /// # Errors
    /// `VfsError::InvalidArgument` when a folder would move into itself or one
    /// of its descendants, or the key is outside the owner's namespace.
    pub async fn move_item(
        &self,
        current_key: &str,
        is_folder: bool,
        destination_folder: &str,
        progress: Option<&dyn ProgressCallback<RenameProgress>>,
    ) -> Result<MoveResult, VfsError> {
        let source: String = item_key(current_key, is_folder);
        self.ensure_owned(&source)?;

        let target_prefix: String = self.folder_prefix_for(destination_folder);
        if is_folder && target_prefix.starts_with(&source) {
            return Err(VfsError::InvalidArgument(format!(
                "Cannot move '{}' into itself or one of its subfolders",
                last_segment(&source)
            )));
        }

        let destination: String = item_key(
            &format!("{}{}", target_prefix, last_segment(&source)),
            is_folder,
        );
        self.relocate(&source, &destination, is_folder, progress)
            .await
    }

    /// Move several entries into one folder.
    ///
    /// Items are moved one after another and independently; a rejected or
    /// failed item is reported as `Failed` and does not stop the others.
    ///
    /// # Returns
    /// `(original key, result)` for every item, in input order.
    pub async fn move_items(
        &self,
        items: &[Entry],
        destination_folder: &str,
    ) -> Vec<(String, MoveResult)> {
        let mut results: Vec<(String, MoveResult)> = Vec::with_capacity(items.len());
        for item in items {
            let result: MoveResult = match self
                .move_item(&item.key, item.is_folder(), destination_folder, None)
                .await
            {
                Ok(result) => result,
                Err(e) => {
                    log::warn!("Move of {} rejected: {}", item.key, e);
                    RenameResult::failed(e.to_string())
                }
            };
            results.push((item.key.clone(), result));
        }
        results
    }
}
