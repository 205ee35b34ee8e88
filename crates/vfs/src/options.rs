//! Configuration options for folder-emulation operations.

use std::time::Duration;

use rusty_media_common::{DEFAULT_OPERATION_CONCURRENCY, DEFAULT_PRESIGN_EXPIRY_SECS};
use rusty_media_storage::UploadOptions;

/// Configuration options for [`MediaFileSystem`](crate::MediaFileSystem).
///
/// # Example
///
/// ```ignore
/// let options = OperationOptions::default()
///     .with_max_concurrency(4)
///     .with_presign_expiry(Duration::from_secs(300));
///
/// let fs = MediaFileSystem::new(&client, location).with_options(options);
/// ```
#[derive(Debug, Clone)]
pub struct OperationOptions {
    /// Maximum concurrent per-object store calls (removals, uploads).
    pub max_concurrency: usize,
    /// Guess upload content types from file extensions.
    pub detect_content_type: bool,
    /// Lifetime of presigned download URLs.
    pub presign_expiry: Duration,
}

impl Default for OperationOptions {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_OPERATION_CONCURRENCY,
            detect_content_type: true,
            presign_expiry: Duration::from_secs(DEFAULT_PRESIGN_EXPIRY_SECS),
        }
    }
}

impl OperationOptions {
    /// Set maximum concurrency for per-object calls.
    ///
    /// # Arguments
    /// * `max_concurrency` - Upper bound on in-flight calls (clamped to at least 1)
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Enable or disable content type detection for uploads.
    pub fn with_content_type_detection(mut self, enabled: bool) -> Self {
        self.detect_content_type = enabled;
        self
    }

    /// Set the lifetime of presigned URLs.
    ///
    /// # Arguments
    /// * `expiry` - URL lifetime
    pub fn with_presign_expiry(mut self, expiry: Duration) -> Self {
        self.presign_expiry = expiry;
        self
    }

    /// Upload options derived from these settings.
    pub fn upload_options(&self) -> UploadOptions {
        UploadOptions::default()
            .with_max_concurrency(self.max_concurrency)
            .with_content_type_detection(self.detect_content_type)
    }
}
