//! Bounded polling for objects that appear asynchronously.
//!
//! Derived artifacts such as thumbnails are written some time after their
//! source. Readers poll with a [`RetryPolicy`]; tests use
//! [`RetryPolicy::NoRetry`] to get exactly one attempt and no sleeping.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::StorageError;
use crate::traits::StorageClient;
use crate::types::RetrySettings;

/// How often a read is retried before giving up.
#[derive(Debug, Clone, PartialEq)]
pub enum RetryPolicy {
    /// Single attempt, no delay.
    NoRetry,
    /// Up to `max_attempts` attempts with backoff between them.
    Bounded(RetrySettings),
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::Bounded(RetrySettings::default())
    }
}

impl RetryPolicy {
    /// Total number of attempts this policy allows (at least one).
    pub fn max_attempts(&self) -> u32 {
        match self {
            RetryPolicy::NoRetry => 1,
            RetryPolicy::Bounded(settings) => settings.max_attempts.max(1),
        }
    }
}

/// Wait until `key` exists, returning its size.
///
/// Missing objects and retryable errors are retried according to `policy`;
/// non-retryable errors are returned immediately.
///
/// # Arguments
/// * `client` - Storage client
/// * `bucket` - Bucket name
/// * `key` - Object key to wait for
/// * `policy` - Retry policy
/// * `cancel` - Optional flag; when set the loop stops with `StorageError::Cancelled`
///
/// # Errors
/// `StorageError::NotFound` when attempts are exhausted without the object
/// appearing, or the last retryable error.
pub async fn poll_for_object<C>(
    client: &C,
    bucket: &str,
    key: &str,
    policy: &RetryPolicy,
    cancel: Option<&AtomicBool>,
) -> Result<u64, StorageError>
where
    C: StorageClient + ?Sized,
{
    let attempts: u32 = policy.max_attempts();
    let mut last_error: StorageError = StorageError::NotFound {
        bucket: bucket.to_string(),
        key: key.to_string(),
    };

    for attempt in 0..attempts {
        if cancel.is_some_and(|flag: &AtomicBool| flag.load(Ordering::Relaxed)) {
            return Err(StorageError::Cancelled);
        }

        match client.head_object(bucket, key).await {
            Ok(Some(size)) => return Ok(size),
            Ok(None) => {
                last_error = StorageError::NotFound {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                };
            }
            Err(err) if err.is_retryable() => {
                log::debug!("Retryable error polling {}: {}", key, err);
                last_error = err;
            }
            Err(err) => return Err(err),
        }

        if attempt + 1 < attempts {
            if let RetryPolicy::Bounded(settings) = policy {
                tokio::time::sleep(settings.delay_for_attempt(attempt)).await;
            }
        }
    }

    Err(last_error)
}
