//! Thumbnail pipeline for rusty-media.
//!
//! Store notifications drive a best-effort cache of derived thumbnails:
//!
//! - [`events`] - Object events and S3 notification decoding
//! - [`processor`] - Decode, fit within a bounding box, re-encode as JPEG
//! - [`handler`] - Per-record create/remove handling with failure isolation
//! - [`locator`] - Bounded wait for a thumbnail, then a presigned URL
//!
//! Thumbnail keys mirror media keys: `media/{owner}/a.jpg` maps to
//! `thumbnails/{owner}/a.jpg.thumb.jpg`.

pub mod error;
pub mod events;
pub mod handler;
pub mod locator;
pub mod processor;

pub use error::ThumbnailError;
pub use events::{decode_event_key, ObjectEvent, ObjectEventKind, S3EventNotification};
pub use handler::{EventOutcome, SkipReason, ThumbnailHandler, THUMBNAIL_CONTENT_TYPE};
pub use locator::ThumbnailLocator;
pub use processor::{Thumbnail, ThumbnailProcessor, ThumbnailSettings};
