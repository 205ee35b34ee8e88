//! Storage traits/interfaces for object store operations.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::StorageError;

/// Information about an object from list/head operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInfo {
    /// Object key.
    pub key: String,
    /// Object size in bytes.
    pub size: u64,
    /// Last modified timestamp (Unix epoch seconds).
    pub last_modified: Option<i64>,
    /// ETag (usually MD5 hash for non-multipart uploads).
    pub etag: Option<String>,
}

impl ObjectInfo {
    /// Create object info with only a key and size.
    pub fn new(key: impl Into<String>, size: u64) -> Self {
        Self {
            key: key.into(),
            size,
            last_modified: None,
            etag: None,
        }
    }
}

/// Options for list operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// List every object under the prefix instead of one level.
    ///
    /// When false, deeper objects are summarized as excluded subpaths.
    pub recursive: bool,
}

impl ListOptions {
    /// One level below the prefix, deeper objects reported as excluded subpaths.
    pub fn shallow() -> Self {
        Self { recursive: false }
    }

    /// Every object under the prefix.
    pub fn recursive() -> Self {
        Self { recursive: true }
    }
}

/// Result of a list call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectListing {
    /// Objects directly returned by the store.
    pub objects: Vec<ObjectInfo>,
    /// Prefixes (ending in `/`) under which deeper objects exist but were not
    /// enumerated. Always empty for recursive listings.
    pub excluded_subpaths: Vec<String>,
}

/// Low-level object store operations - implemented by each backend.
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Expected bucket owner for security validation, if configured.
    fn expected_bucket_owner(&self) -> Option<&str> {
        None
    }

    /// Check if an object exists and return its size.
    /// Returns None if object doesn't exist.
    async fn head_object(&self, bucket: &str, key: &str) -> Result<Option<u64>, StorageError>;

    /// Upload bytes.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: &[u8],
        content_type: Option<&str>,
    ) -> Result<(), StorageError>;

    /// Download object to bytes.
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Server-side copy within a bucket.
    async fn copy_object(
        &self,
        bucket: &str,
        source_key: &str,
        destination_key: &str,
    ) -> Result<(), StorageError>;

    /// Remove an object. Backends may report `StorageError::NotFound`.
    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StorageError>;

    /// List objects with prefix.
    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
        options: &ListOptions,
    ) -> Result<ObjectListing, StorageError>;

    /// Time-limited download URL for an object.
    async fn presigned_get_url(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, StorageError>;
}
