//! Per-record thumbnail maintenance.
//!
//! The handler keeps a best-effort thumbnail for every image under `media/`:
//! a created image gets a fresh thumbnail (overwriting any previous one), and a
//! removed image or video loses its thumbnail. Records are independent; one
//! failing record is logged and never stops the rest of its batch.
//!
//! No retries happen here. Redelivery is the event source's business, and
//! both paths are safe to repeat: create overwrites, delete tolerates absence.

use futures::stream::{self, StreamExt};
use rusty_media_common::{classify_by_extension, is_media_key, to_thumbnail_key, MediaKind};
use rusty_media_storage::StorageClient;

use crate::error::ThumbnailError;
use crate::events::{ObjectEvent, ObjectEventKind};
use crate::processor::{Thumbnail, ThumbnailProcessor, ThumbnailSettings};

/// Content type of every thumbnail.
pub const THUMBNAIL_CONTENT_TYPE: &str = "image/jpeg";

/// Why a record needed no work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Key is outside the `media/` namespace.
    OutsideMedia,
    /// Videos have no thumbnails yet.
    Video,
    /// Not an image (or folder marker).
    Unsupported,
}

/// What handling one record did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// Thumbnail written.
    Generated { thumbnail_key: String },
    /// Thumbnail removed (or was already absent).
    Deleted { thumbnail_key: String },
    /// Nothing to do.
    Skipped(SkipReason),
}

/// Handles batches of object events against a store.
pub struct ThumbnailHandler<'a, C: StorageClient + ?Sized> {
    /// The storage client.
    client: &'a C,
    /// Image processing.
    processor: ThumbnailProcessor,
    /// Records handled concurrently per batch.
    max_concurrency: usize,
}

impl<'a, C: StorageClient + ?Sized> ThumbnailHandler<'a, C> {
    /// Create a handler with default settings.
    ///
    /// # Arguments
    /// * `client` - Storage client
    pub fn new(client: &'a C) -> Self {
        Self::with_settings(client, &ThumbnailSettings::default())
    }

    /// Create a handler with explicit settings.
    ///
    /// # Arguments
    /// * `client` - Storage client
    /// * `settings` - Thumbnail settings
    pub fn with_settings(client: &'a C, settings: &ThumbnailSettings) -> Self {
        Self {
            client,
            processor: ThumbnailProcessor::new(settings),
            max_concurrency: settings.max_concurrency.max(1),
        }
    }

    /// Handle every record of a batch.
    ///
    /// Records run concurrently and in no particular order. Failures are
    /// logged per record; this never fails.
    ///
    /// # Arguments
    /// * `events` - Records delivered together
    pub async fn handle_batch(&self, events: &[ObjectEvent]) {
        stream::iter(events)
            .for_each_concurrent(self.max_concurrency, |event: &ObjectEvent| async move {
                match self.handle_event(event).await {
                    Ok(EventOutcome::Skipped(reason)) => {
                        log::debug!("Skipped {:?} for {}: {:?}", event.kind, event.key, reason);
                    }
                    Ok(_) => {}
                    Err(e) => {
                        log::error!(
                            "Failed to handle {:?} event for s3://{}/{}: {}",
                            event.kind,
                            event.bucket,
                            event.key,
                            e
                        );
                    }
                }
            })
            .await;
    }

    /// Handle a single record.
    ///
    /// # Errors
    /// Fetch, decode, write or delete failures for this record.
    pub async fn handle_event(&self, event: &ObjectEvent) -> Result<EventOutcome, ThumbnailError> {
        match event.kind {
            ObjectEventKind::Created => self.handle_created(&event.bucket, &event.key).await,
            ObjectEventKind::Removed => self.handle_removed(&event.bucket, &event.key).await,
        }
    }

    async fn handle_created(&self, bucket: &str, key: &str) -> Result<EventOutcome, ThumbnailError> {
        if !is_media_key(key) {
            return Ok(EventOutcome::Skipped(SkipReason::OutsideMedia));
        }
        match classify_by_extension(key) {
            MediaKind::Image => {}
            MediaKind::Video => {
                log::info!("Skipping video {}: video thumbnails are not supported", key);
                return Ok(EventOutcome::Skipped(SkipReason::Video));
            }
            MediaKind::Other => return Ok(EventOutcome::Skipped(SkipReason::Unsupported)),
        }

        let thumbnail_key: String = to_thumbnail_key(key)?;
        let source: Vec<u8> = self.client.get_object(bucket, key).await?;

        let processor: ThumbnailProcessor = self.processor;
        let thumbnail: Thumbnail = tokio::task::spawn_blocking(move || processor.process(&source))
            .await
            .map_err(|e| ThumbnailError::Task(e.to_string()))??;

        self.client
            .put_object(
                bucket,
                &thumbnail_key,
                &thumbnail.data,
                Some(THUMBNAIL_CONTENT_TYPE),
            )
            .await?;

        log::info!(
            "Generated thumbnail {} ({}x{}, {} bytes)",
            thumbnail_key,
            thumbnail.width,
            thumbnail.height,
            thumbnail.data.len()
        );
        Ok(EventOutcome::Generated { thumbnail_key })
    }

    async fn handle_removed(&self, bucket: &str, key: &str) -> Result<EventOutcome, ThumbnailError> {
        if !is_media_key(key) {
            return Ok(EventOutcome::Skipped(SkipReason::OutsideMedia));
        }
        if !classify_by_extension(key).is_visual() {
            return Ok(EventOutcome::Skipped(SkipReason::Unsupported));
        }

        let thumbnail_key: String = to_thumbnail_key(key)?;
        match self.client.delete_object(bucket, &thumbnail_key).await {
            Ok(()) => log::info!("Deleted thumbnail {}", thumbnail_key),
            Err(e) if e.is_not_found() => {
                log::debug!("Thumbnail {} already absent", thumbnail_key);
            }
            Err(e) => return Err(e.into()),
        }
        Ok(EventOutcome::Deleted { thumbnail_key })
    }
}
