//! AWS SDK S3 backend for rusty-media storage.
//!
//! This crate provides a `StorageClient` implementation using the AWS SDK for Rust.
//! It covers the primitives the virtual filesystem and thumbnail pipeline need:
//! delimiter listings, server-side copy, delete, put/get and presigned URLs.
//!
//! # Example
//!
//! ```ignore
//! use rusty_media_storage_crt::CrtStorageClient;
//! use rusty_media_storage::StorageSettings;
//!
//! let settings = StorageSettings::default().with_region("eu-west-1");
//! let client = CrtStorageClient::new(settings).await?;
//! ```

mod client;
mod error;

pub use client::CrtStorageClient;
pub use error::CrtError;
