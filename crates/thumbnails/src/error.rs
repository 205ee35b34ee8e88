//! Error types for the thumbnail pipeline.

use rusty_media_common::KeyError;
use rusty_media_storage::StorageError;
use thiserror::Error;

/// Errors that can occur while handling one event record.
///
/// The batch entry point never returns these; they are logged per record.
#[derive(Debug, Error)]
pub enum ThumbnailError {
    /// Store call failed (fetching the source, writing or deleting the thumbnail).
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Key could not be mapped to a thumbnail key.
    #[error(transparent)]
    Key(#[from] KeyError),

    /// Source bytes could not be decoded or the thumbnail could not be encoded.
    #[error("Image processing failed: {0}")]
    Image(#[from] image::ImageError),

    /// The object kind has no thumbnail.
    #[error("No thumbnail for {kind} object {key}")]
    UnsupportedKind { key: String, kind: &'static str },

    /// Notification payload could not be decoded.
    #[error("Invalid event notification: {0}")]
    InvalidEvent(String),

    /// Background image task did not complete.
    #[error("Image task failed: {0}")]
    Task(String),
}
