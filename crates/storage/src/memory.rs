//! In-process `StorageClient` with S3-like listing semantics.
//!
//! Useful for tests and local development. Failures can be injected per
//! operation and key, and every call is recorded so tests can assert on what
//! was (or was not) issued.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;

use crate::error::StorageError;
use crate::traits::{ListOptions, ObjectInfo, ObjectListing, StorageClient};

/// Store operation kinds, used for failure injection and call accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureOp {
    Head,
    Get,
    Put,
    /// Matched against the copy's source key.
    Copy,
    Delete,
    /// Matched against the list prefix.
    List,
    Presign,
}

#[derive(Debug, Clone)]
struct StoredObject {
    data: Vec<u8>,
    content_type: Option<String>,
    last_modified: i64,
}

/// Remaining injected failures: `None` fails forever.
type FailurePlan = HashMap<(FailureOp, String), Option<u32>>;

/// In-memory object store.
#[derive(Debug, Default)]
pub struct MemoryStorageClient {
    buckets: Mutex<BTreeMap<String, BTreeMap<String, StoredObject>>>,
    failures: Mutex<FailurePlan>,
    calls: Mutex<Vec<(FailureOp, String)>>,
}

impl MemoryStorageClient {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object directly, bypassing failure injection and call log.
    ///
    /// # Arguments
    /// * `bucket` - Bucket name
    /// * `key` - Object key
    /// * `data` - Object contents
    pub fn insert(&self, bucket: &str, key: &str, data: Vec<u8>) {
        let mut buckets = self.buckets.lock().unwrap();
        buckets.entry(bucket.to_string()).or_default().insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: None,
                last_modified: now_epoch_seconds(),
            },
        );
    }

    /// Whether an object exists.
    pub fn contains(&self, bucket: &str, key: &str) -> bool {
        let buckets = self.buckets.lock().unwrap();
        buckets.get(bucket).is_some_and(|b| b.contains_key(key))
    }

    /// All keys in a bucket, sorted.
    pub fn keys(&self, bucket: &str) -> Vec<String> {
        let buckets = self.buckets.lock().unwrap();
        buckets
            .get(bucket)
            .map(|b| b.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Contents of an object, if present.
    pub fn object_data(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        let buckets = self.buckets.lock().unwrap();
        buckets.get(bucket)?.get(key).map(|o| o.data.clone())
    }

    /// Content type recorded for an object, if any.
    pub fn content_type(&self, bucket: &str, key: &str) -> Option<String> {
        let buckets = self.buckets.lock().unwrap();
        buckets.get(bucket)?.get(key)?.content_type.clone()
    }

    /// Make every call of `op` on `key` fail with a retryable network error.
    pub fn fail_always(&self, op: FailureOp, key: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert((op, key.to_string()), None);
    }

    /// Make the next `times` calls of `op` on `key` fail.
    pub fn fail_times(&self, op: FailureOp, key: &str, times: u32) {
        self.failures
            .lock()
            .unwrap()
            .insert((op, key.to_string()), Some(times));
    }

    /// Remove all injected failures.
    pub fn clear_failures(&self) {
        self.failures.lock().unwrap().clear();
    }

    /// Number of calls issued for an operation kind.
    pub fn call_count(&self, op: FailureOp) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(o, _)| *o == op)
            .count()
    }

    /// Keys passed to calls of an operation kind, in call order.
    pub fn calls_for(&self, op: FailureOp) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(o, _)| *o == op)
            .map(|(_, k)| k.clone())
            .collect()
    }

    /// Record the call and return an injected failure if one is pending.
    fn check(&self, op: FailureOp, key: &str) -> Result<(), StorageError> {
        self.calls.lock().unwrap().push((op, key.to_string()));

        let mut failures = self.failures.lock().unwrap();
        let plan_key: (FailureOp, String) = (op, key.to_string());
        match failures.get_mut(&plan_key) {
            None => Ok(()),
            Some(None) => Err(injected(op, key)),
            Some(Some(remaining)) => {
                *remaining -= 1;
                if *remaining == 0 {
                    failures.remove(&plan_key);
                }
                Err(injected(op, key))
            }
        }
    }

    fn not_found(bucket: &str, key: &str) -> StorageError {
        StorageError::NotFound {
            bucket: bucket.to_string(),
            key: key.to_string(),
        }
    }
}

fn injected(op: FailureOp, key: &str) -> StorageError {
    StorageError::transient(format!("injected {:?} failure for {}", op, key))
}

fn now_epoch_seconds() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[async_trait]
impl StorageClient for MemoryStorageClient {
    async fn head_object(&self, bucket: &str, key: &str) -> Result<Option<u64>, StorageError> {
        self.check(FailureOp::Head, key)?;
        let buckets = self.buckets.lock().unwrap();
        Ok(buckets
            .get(bucket)
            .and_then(|b| b.get(key))
            .map(|o| o.data.len() as u64))
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: &[u8],
        content_type: Option<&str>,
    ) -> Result<(), StorageError> {
        self.check(FailureOp::Put, key)?;
        let mut buckets = self.buckets.lock().unwrap();
        buckets.entry(bucket.to_string()).or_default().insert(
            key.to_string(),
            StoredObject {
                data: data.to_vec(),
                content_type: content_type.map(str::to_string),
                last_modified: now_epoch_seconds(),
            },
        );
        Ok(())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        self.check(FailureOp::Get, key)?;
        self.object_data(bucket, key)
            .ok_or_else(|| Self::not_found(bucket, key))
    }

    async fn copy_object(
        &self,
        bucket: &str,
        source_key: &str,
        destination_key: &str,
    ) -> Result<(), StorageError> {
        self.check(FailureOp::Copy, source_key)?;
        let mut buckets = self.buckets.lock().unwrap();
        let objects = buckets
            .get_mut(bucket)
            .ok_or_else(|| Self::not_found(bucket, source_key))?;
        let mut copied: StoredObject = objects
            .get(source_key)
            .cloned()
            .ok_or_else(|| Self::not_found(bucket, source_key))?;
        copied.last_modified = now_epoch_seconds();
        objects.insert(destination_key.to_string(), copied);
        Ok(())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StorageError> {
        self.check(FailureOp::Delete, key)?;
        let mut buckets = self.buckets.lock().unwrap();
        buckets
            .get_mut(bucket)
            .and_then(|b| b.remove(key))
            .map(|_| ())
            .ok_or_else(|| Self::not_found(bucket, key))
    }

    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
        options: &ListOptions,
    ) -> Result<ObjectListing, StorageError> {
        self.check(FailureOp::List, prefix)?;
        let buckets = self.buckets.lock().unwrap();
        let mut listing = ObjectListing::default();
        let Some(objects) = buckets.get(bucket) else {
            return Ok(listing);
        };

        let mut common_prefixes: BTreeSet<String> = BTreeSet::new();
        for (key, object) in objects.range(prefix.to_string()..) {
            let Some(rest) = key.strip_prefix(prefix) else {
                break;
            };

            // Delimiter semantics: anything past the next separator rolls up.
            if !options.recursive {
                if let Some(pos) = rest.find('/') {
                    common_prefixes.insert(format!("{}{}", prefix, &rest[..=pos]));
                    continue;
                }
            }

            listing.objects.push(ObjectInfo {
                key: key.clone(),
                size: object.data.len() as u64,
                last_modified: Some(object.last_modified),
                etag: None,
            });
        }

        listing.excluded_subpaths = common_prefixes.into_iter().collect();
        Ok(listing)
    }

    async fn presigned_get_url(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, StorageError> {
        self.check(FailureOp::Presign, key)?;
        Ok(format!(
            "memory://{}/{}?expires={}",
            bucket,
            key,
            expires_in.as_secs()
        ))
    }
}
