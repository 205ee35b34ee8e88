//! Shared data structures for storage operations.

use std::time::Duration;

use rusty_media_common::{
    owner_root, to_folder_prefix, to_object_key, to_virtual_path, DEFAULT_PRESIGN_EXPIRY_SECS,
    THUMBNAIL_PREFIX,
};
use serde::{Deserialize, Serialize};

/// Configuration settings for storage operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// AWS region.
    pub region: String,
    /// Static credentials; the default provider chain is used when absent.
    pub credentials: Option<AwsCredentials>,
    /// Custom endpoint for S3-compatible stores (MinIO, R2, ...).
    pub endpoint_url: Option<String>,
    /// Use path-style addressing (required by most S3-compatible stores).
    pub force_path_style: bool,
    /// Expected bucket owner account id.
    pub expected_bucket_owner: Option<String>,
    /// Retry settings for polling reads.
    pub retry: RetrySettings,
    /// Lifetime of presigned download URLs in seconds.
    pub presign_expiry_secs: u64,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            region: "us-east-1".into(),
            credentials: None,
            endpoint_url: None,
            force_path_style: false,
            expected_bucket_owner: None,
            retry: RetrySettings::default(),
            presign_expiry_secs: DEFAULT_PRESIGN_EXPIRY_SECS,
        }
    }
}

impl StorageSettings {
    /// Presigned URL lifetime as a duration.
    pub fn presign_expiry(&self) -> Duration {
        Duration::from_secs(self.presign_expiry_secs)
    }

    /// Point the client at an S3-compatible endpoint using path-style addressing.
    pub fn with_endpoint(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self.force_path_style = true;
        self
    }

    /// Set the region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }
}

/// AWS credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

/// Retry settings for read polling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,
    /// Initial backoff delay in milliseconds.
    pub initial_backoff_ms: u64,
    /// Maximum backoff delay in milliseconds.
    pub max_backoff_ms: u64,
    /// Backoff multiplier (1.0 gives a fixed delay).
    pub backoff_multiplier: f64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff_ms: 500,
            max_backoff_ms: 8_000,
            backoff_multiplier: 2.0,
        }
    }
}

impl RetrySettings {
    /// Fixed delay between a bounded number of attempts.
    pub fn fixed(max_attempts: u32, delay_ms: u64) -> Self {
        Self {
            max_attempts,
            initial_backoff_ms: delay_ms,
            max_backoff_ms: delay_ms,
            backoff_multiplier: 1.0,
        }
    }

    /// Delay to wait after the given zero-based failed attempt.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor: f64 = self.backoff_multiplier.max(1.0).powi(attempt as i32);
        let millis: f64 = (self.initial_backoff_ms as f64 * factor).min(self.max_backoff_ms as f64);
        Duration::from_millis(millis as u64)
    }
}

/// Bucket and owner namespace an operation works in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaLocation {
    /// Bucket name.
    pub bucket: String,
    /// Opaque per-identity namespace id, supplied by the identity layer.
    pub owner_id: String,
}

impl MediaLocation {
    /// Create a new media location.
    pub fn new(bucket: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            owner_id: owner_id.into(),
        }
    }

    /// Root prefix of the owner's media namespace.
    /// Returns: "media/{owner_id}/"
    pub fn media_root(&self) -> String {
        owner_root(&self.owner_id)
    }

    /// Root prefix of the owner's thumbnails.
    /// Returns: "thumbnails/{owner_id}/"
    pub fn thumbnail_root(&self) -> String {
        format!("{}{}/", THUMBNAIL_PREFIX, self.owner_id)
    }

    /// Full key for a virtual file path.
    pub fn object_key(&self, virtual_path: &str) -> String {
        to_object_key(&self.owner_id, virtual_path)
    }

    /// Full prefix (with trailing separator) for a virtual folder path.
    pub fn folder_prefix(&self, virtual_path: &str) -> String {
        to_folder_prefix(&self.owner_id, virtual_path)
    }

    /// Virtual path of a full key or owner-relative path.
    pub fn virtual_path(&self, key_or_path: &str) -> String {
        to_virtual_path(&self.owner_id, key_or_path)
    }
}
