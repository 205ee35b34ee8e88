//! Upload orchestration for media objects.
//!
//! This module provides batch upload operations that work with any
//! `StorageClient` implementation. It handles:
//!
//! - Parallel object uploads with bounded concurrency
//! - Content type detection from the key's extension
//! - Progress reporting
//!
//! A batch is not atomic: every issued upload runs to completion, the first
//! failure (in input order) is returned, and objects already written are kept.
//!
//! # Example
//!
//! ```ignore
//! use rusty_media_storage::{UploadOrchestrator, UploadRequest};
//!
//! let orchestrator = UploadOrchestrator::new(&client, "my-bucket");
//! let keys = orchestrator
//!     .upload_objects(vec![UploadRequest::new("media/u/a.jpg", bytes)], None)
//!     .await?;
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

use futures::stream::{self, StreamExt};
use rusty_media_common::{ProgressCallback, DEFAULT_OPERATION_CONCURRENCY};

use crate::error::StorageError;
use crate::traits::StorageClient;

/// Options for upload operations.
#[derive(Debug, Clone)]
pub struct UploadOptions {
    /// Maximum concurrent uploads.
    pub max_concurrency: usize,
    /// Guess a content type from the key's extension when none is given.
    pub detect_content_type: bool,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_OPERATION_CONCURRENCY,
            detect_content_type: true,
        }
    }
}

impl UploadOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum concurrency for parallel uploads.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    /// Enable or disable content type detection.
    pub fn with_content_type_detection(mut self, enabled: bool) -> Self {
        self.detect_content_type = enabled;
        self
    }
}

/// One object to write.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Destination key.
    pub key: String,
    /// Object contents.
    pub data: Vec<u8>,
    /// Explicit content type, overrides detection.
    pub content_type: Option<String>,
}

impl UploadRequest {
    /// Create a request without an explicit content type.
    pub fn new(key: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            key: key.into(),
            data,
            content_type: None,
        }
    }

    /// Set an explicit content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Progress of a batch upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadProgress {
    /// Key that just finished uploading.
    pub key: String,
    /// Uploads finished so far (successful or not).
    pub completed: usize,
    /// Uploads in the batch.
    pub total: usize,
}

/// Batch upload operations using any StorageClient implementation.
pub struct UploadOrchestrator<'a, C: StorageClient + ?Sized> {
    /// The storage client.
    client: &'a C,
    /// Destination bucket.
    bucket: String,
    /// Upload options.
    options: UploadOptions,
}

impl<'a, C: StorageClient + ?Sized> UploadOrchestrator<'a, C> {
    /// Create a new upload orchestrator.
    ///
    /// # Arguments
    /// * `client` - Storage client
    /// * `bucket` - Destination bucket
    pub fn new(client: &'a C, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            options: UploadOptions::default(),
        }
    }

    /// Set upload options.
    ///
    /// # Arguments
    /// * `options` - Upload options
    pub fn with_options(mut self, options: UploadOptions) -> Self {
        self.options = options;
        self
    }

    /// Upload every request, independently and with bounded concurrency.
    ///
    /// # Arguments
    /// * `requests` - Objects to write
    /// * `progress` - Optional progress callback, invoked once per finished upload
    ///
    /// # Returns
    /// The written keys, in input order.
    ///
    /// # Errors
    /// The first failure in input order. Other uploads still run to completion
    /// and are not rolled back.
    pub async fn upload_objects(
        &self,
        requests: Vec<UploadRequest>,
        progress: Option<&dyn ProgressCallback<UploadProgress>>,
    ) -> Result<Vec<String>, StorageError> {
        let total: usize = requests.len();
        let completed = AtomicUsize::new(0);
        let max_concurrency: usize = self.options.max_concurrency.max(1);

        let results: Vec<Result<String, StorageError>> = stream::iter(requests)
            .map(|request: UploadRequest| {
                let completed = &completed;
                async move {
                    let content_type: Option<String> = self.content_type_for(&request);
                    let result: Result<(), StorageError> = self
                        .client
                        .put_object(
                            &self.bucket,
                            &request.key,
                            &request.data,
                            content_type.as_deref(),
                        )
                        .await;

                    let done: usize = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    if let Some(cb) = progress {
                        cb.on_progress(&UploadProgress {
                            key: request.key.clone(),
                            completed: done,
                            total,
                        });
                    }

                    match result {
                        Ok(()) => Ok(request.key),
                        Err(e) => {
                            log::warn!("Upload of {} failed: {}", request.key, e);
                            Err(e)
                        }
                    }
                }
            })
            .buffered(max_concurrency)
            .collect()
            .await;

        results.into_iter().collect()
    }

    fn content_type_for(&self, request: &UploadRequest) -> Option<String> {
        if request.content_type.is_some() {
            return request.content_type.clone();
        }
        if !self.options.detect_content_type {
            return None;
        }
        mime_guess::from_path(&request.key)
            .first()
            .map(|m| m.essence_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{FailureOp, MemoryStorageClient};
    use rusty_media_common::progress_fn;
    use std::sync::Mutex;

    #[test]
    fn test_upload_options_default() {
        let options = UploadOptions::default();
        assert_eq!(options.max_concurrency, DEFAULT_OPERATION_CONCURRENCY);
        assert!(options.detect_content_type);
    }

    #[test]
    fn test_upload_options_with_concurrency() {
        let options = UploadOptions::default().with_max_concurrency(20);
        assert_eq!(options.max_concurrency, 20);
    }

    #[tokio::test]
    async fn test_upload_returns_keys_in_input_order() {
        let client = MemoryStorageClient::new();
        let orchestrator = UploadOrchestrator::new(&client, "b")
            .with_options(UploadOptions::default().with_max_concurrency(2));

        let keys: Vec<String> = orchestrator
            .upload_objects(
                vec![
                    UploadRequest::new("media/u/c.png", vec![1]),
                    UploadRequest::new("media/u/a.jpg", vec![2]),
                    UploadRequest::new("media/u/b.txt", vec![3]),
                ],
                None,
            )
            .await
            .unwrap();

        assert_eq!(keys, vec!["media/u/c.png", "media/u/a.jpg", "media/u/b.txt"]);
        assert_eq!(client.content_type("b", "media/u/a.jpg").as_deref(), Some("image/jpeg"));
        assert_eq!(client.content_type("b", "media/u/c.png").as_deref(), Some("image/png"));
    }

    #[tokio::test]
    async fn test_upload_failure_keeps_siblings() {
        let client = MemoryStorageClient::new();
        client.fail_always(FailureOp::Put, "media/u/bad.jpg");
        let orchestrator = UploadOrchestrator::new(&client, "b");

        let result = orchestrator
            .upload_objects(
                vec![
                    UploadRequest::new("media/u/ok1.jpg", vec![1]),
                    UploadRequest::new("media/u/bad.jpg", vec![2]),
                    UploadRequest::new("media/u/ok2.jpg", vec![3]),
                ],
                None,
            )
            .await;

        assert!(result.is_err());
        assert!(client.contains("b", "media/u/ok1.jpg"));
        assert!(client.contains("b", "media/u/ok2.jpg"));
        assert!(!client.contains("b", "media/u/bad.jpg"));
    }

    #[tokio::test]
    async fn test_upload_reports_progress() {
        let client = MemoryStorageClient::new();
        let orchestrator = UploadOrchestrator::new(&client, "b");
        let seen: Mutex<Vec<(usize, usize)>> = Mutex::new(Vec::new());
        let callback = progress_fn(|p: &UploadProgress| {
            seen.lock().unwrap().push((p.completed, p.total));
        });

        orchestrator
            .upload_objects(
                vec![
                    UploadRequest::new("media/u/1.jpg", vec![1]),
                    UploadRequest::new("media/u/2.jpg", vec![1]),
                ],
                Some(&callback),
            )
            .await
            .unwrap();

        let mut seen: Vec<(usize, usize)> = seen.into_inner().unwrap();
        seen.sort();
        assert_eq!(seen, vec![(1, 2), (2, 2)]);
    }

    #[tokio::test]
    async fn test_explicit_content_type_wins() {
        let client = MemoryStorageClient::new();
        let orchestrator = UploadOrchestrator::new(&client, "b");
        orchestrator
            .upload_objects(
                vec![UploadRequest::new("media/u/raw.bin", vec![1]).with_content_type("image/x-raw")],
                None,
            )
            .await
            .unwrap();
        assert_eq!(client.content_type("b", "media/u/raw.bin").as_deref(), Some("image/x-raw"));
    }
}
