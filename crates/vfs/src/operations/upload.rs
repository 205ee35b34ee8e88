//! Uploading files into a folder.

use rusty_media_common::{validate_name, ProgressCallback};
use rusty_media_storage::{StorageClient, UploadOrchestrator, UploadProgress, UploadRequest};

use super::{MediaFileSystem, UploadFile};
use crate::error::VfsError;

impl<C: StorageClient + ?Sized> MediaFileSystem<'_, C> {
    /// Upload files into a folder, one store write per file.
    ///
    /// Writes are issued concurrently. The batch is not atomic: when one write
    /// fails the call fails, and files already written stay in place.
    ///
    /// # Arguments
    /// * `files` - Files to write
    /// * `base` - Target folder, as a virtual path or full key
    /// * `progress` - Optional callback, invoked once per finished write
    ///
    /// # Returns
    /// The written keys, in input order.
    ///
    /// # Errors
    /// `VfsError::Key` for an unusable file name (nothing is written), or the
    /// first write failure in input order.
    pub async fn upload(
        &self,
        files: Vec<UploadFile>,
        base: &str,
        progress: Option<&dyn ProgressCallback<UploadProgress>>,
    ) -> Result<Vec<String>, VfsError> {
        for file in &files {
            validate_name(&file.name)?;
        }

        let prefix: String = self.folder_prefix_for(base);
        let requests: Vec<UploadRequest> = files
            .into_iter()
            .map(|file: UploadFile| {
                let request = UploadRequest::new(format!("{}{}", prefix, file.name), file.data);
                match file.content_type {
                    Some(content_type) => request.with_content_type(content_type),
                    None => request,
                }
            })
            .collect();

        let keys: Vec<String> = UploadOrchestrator::new(self.client, &self.location.bucket)
            .with_options(self.options.upload_options())
            .upload_objects(requests, progress)
            .await?;

        log::debug!("Uploaded {} file(s) to {}", keys.len(), prefix);
        Ok(keys)
    }
}
