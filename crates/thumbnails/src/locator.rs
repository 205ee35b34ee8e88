//! Finding thumbnails that are generated asynchronously.
//!
//! A thumbnail shows up some time after its source upload. Readers wait for it
//! with a bounded polling loop, then hand out a presigned URL.

use std::sync::atomic::AtomicBool;
use std::time::Duration;

use rusty_media_common::{
    classify_by_extension, to_thumbnail_key, MediaKind, DEFAULT_PRESIGN_EXPIRY_SECS,
};
use rusty_media_storage::{
    poll_for_object, RetryPolicy, RetrySettings, StorageClient, StorageSettings,
};

use crate::error::ThumbnailError;

/// Resolves media keys to thumbnail URLs.
pub struct ThumbnailLocator<'a, C: StorageClient + ?Sized> {
    /// The storage client.
    client: &'a C,
    /// Bucket holding media and thumbnails.
    bucket: String,
    /// Polling policy while the thumbnail is missing.
    policy: RetryPolicy,
    /// Lifetime of returned URLs.
    expiry: Duration,
}

impl<'a, C: StorageClient + ?Sized> ThumbnailLocator<'a, C> {
    /// Create a locator with the default bounded policy.
    ///
    /// # Arguments
    /// * `client` - Storage client
    /// * `bucket` - Bucket name
    pub fn new(client: &'a C, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            policy: RetryPolicy::Bounded(RetrySettings::default()),
            expiry: Duration::from_secs(DEFAULT_PRESIGN_EXPIRY_SECS),
        }
    }

    /// Create a locator using the retry and expiry values of storage settings.
    pub fn from_settings(client: &'a C, bucket: impl Into<String>, settings: &StorageSettings) -> Self {
        Self::new(client, bucket)
            .with_retry_policy(RetryPolicy::Bounded(settings.retry.clone()))
            .with_presign_expiry(settings.presign_expiry())
    }

    /// Set the polling policy.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the URL lifetime.
    pub fn with_presign_expiry(mut self, expiry: Duration) -> Self {
        self.expiry = expiry;
        self
    }

    /// Wait for the thumbnail of `media_key` and return a presigned URL.
    ///
    /// # Arguments
    /// * `media_key` - Source key under `media/`
    /// * `cancel` - Optional flag that stops the wait
    ///
    /// # Errors
    /// `UnsupportedKind` for non-images, `Key` for keys outside `media/`,
    /// `Storage(NotFound)` when the thumbnail never appears, and
    /// `Storage(Cancelled)` when the wait is cancelled.
    pub async fn thumbnail_url(
        &self,
        media_key: &str,
        cancel: Option<&AtomicBool>,
    ) -> Result<String, ThumbnailError> {
        let kind: MediaKind = classify_by_extension(media_key);
        if kind != MediaKind::Image {
            return Err(ThumbnailError::UnsupportedKind {
                key: media_key.to_string(),
                kind: kind.as_str(),
            });
        }

        let thumbnail_key: String = to_thumbnail_key(media_key)?;
        poll_for_object(self.client, &self.bucket, &thumbnail_key, &self.policy, cancel).await?;

        let url: String = self
            .client
            .presigned_get_url(&self.bucket, &thumbnail_key, self.expiry)
            .await?;
        Ok(url)
    }
}
