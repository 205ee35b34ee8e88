//! Storage abstraction for rusty-media object store operations.
//!
//! This crate provides a backend-agnostic interface to the object store that
//! holds media and thumbnails. Backends implement [`StorageClient`]:
//!
//! - **CRT Backend** - `rusty-media-storage-crt`, AWS SDK for Rust
//! - **Memory Backend** - [`MemoryStorageClient`], in-process, for tests and local runs
//!
//! On top of the primitives it offers batch uploads ([`UploadOrchestrator`]) and
//! bounded polling for objects written asynchronously ([`poll_for_object`]).

mod error;
pub mod memory;
pub mod retry;
mod traits;
mod types;
pub mod upload;

pub use error::{ObjectFailure, StorageError};
pub use memory::{FailureOp, MemoryStorageClient};
pub use retry::{poll_for_object, RetryPolicy};
pub use traits::{ListOptions, ObjectInfo, ObjectListing, StorageClient};
pub use types::{AwsCredentials, MediaLocation, RetrySettings, StorageSettings};
pub use upload::{UploadOptions, UploadOrchestrator, UploadProgress, UploadRequest};
