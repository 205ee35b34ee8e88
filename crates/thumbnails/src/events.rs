//! Object events that trigger the thumbnail pipeline.
//!
//! Events reach the pipeline either already decoded (`ObjectEvent`) or as S3
//! bucket notification JSON, decoded by [`S3EventNotification`].

use serde::{Deserialize, Serialize};

use crate::error::ThumbnailError;

/// What happened to the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectEventKind {
    Created,
    Removed,
}

/// One store-side change to an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectEvent {
    /// Created or removed.
    #[serde(rename = "eventKind")]
    pub kind: ObjectEventKind,
    /// Bucket holding the object.
    pub bucket: String,
    /// Decoded object key.
    pub key: String,
}

impl ObjectEvent {
    /// Event for a newly written object.
    pub fn created(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            kind: ObjectEventKind::Created,
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Event for a removed object.
    pub fn removed(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            kind: ObjectEventKind::Removed,
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

/// S3 bucket notification payload (`{"Records": [...]}`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct S3EventNotification {
    #[serde(rename = "Records", default)]
    pub records: Vec<S3EventRecord>,
}

/// One record of an S3 notification.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3EventRecord {
    /// e.g. `ObjectCreated:Put`, `ObjectRemoved:Delete`.
    pub event_name: String,
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Object {
    /// URL-encoded key; spaces arrive as `+`.
    pub key: String,
}

impl S3EventNotification {
    /// Parse a notification payload.
    ///
    /// # Errors
    /// `ThumbnailError::InvalidEvent` when the payload is not a notification.
    pub fn from_json(payload: &str) -> Result<Self, ThumbnailError> {
        serde_json::from_str(payload).map_err(|e| ThumbnailError::InvalidEvent(e.to_string()))
    }

    /// Convert records to object events.
    ///
    /// Records with other event names (test events, restores, ...) and keys
    /// that do not decode are skipped with a log line.
    pub fn into_events(self) -> Vec<ObjectEvent> {
        self.records
            .into_iter()
            .filter_map(|record: S3EventRecord| {
                let kind: ObjectEventKind = if record.event_name.starts_with("ObjectCreated:") {
                    ObjectEventKind::Created
                } else if record.event_name.starts_with("ObjectRemoved:") {
                    ObjectEventKind::Removed
                } else {
                    log::debug!("Ignoring {} event", record.event_name);
                    return None;
                };

                match decode_event_key(&record.s3.object.key) {
                    Ok(key) => Some(ObjectEvent {
                        kind,
                        bucket: record.s3.bucket.name,
                        key,
                    }),
                    Err(e) => {
                        log::warn!("Skipping record with undecodable key: {}", e);
                        None
                    }
                }
            })
            .collect()
    }
}

/// Decode a notification key: form encoding, so `+` is a space.
pub fn decode_event_key(raw: &str) -> Result<String, ThumbnailError> {
    let spaced: String = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| ThumbnailError::InvalidEvent(format!("key '{}': {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOTIFICATION: &str = r#"{
        "Records": [
            {
                "eventVersion": "2.1",
                "eventSource": "aws:s3",
                "eventName": "ObjectCreated:Put",
                "s3": {
                    "bucket": { "name": "media-bucket" },
                    "object": { "key": "media/u/My+Trip/%E5%86%99%E7%9C%9F.jpg", "size": 10 }
                }
            },
            {
                "eventName": "ObjectRemoved:Delete",
                "s3": {
                    "bucket": { "name": "media-bucket" },
                    "object": { "key": "media/u/a%2Bb.png" }
                }
            },
            {
                "eventName": "ObjectRestore:Completed",
                "s3": {
                    "bucket": { "name": "media-bucket" },
                    "object": { "key": "media/u/x.jpg" }
                }
            }
        ]
    }"#;

    #[test]
    fn test_decode_notification() {
        let events: Vec<ObjectEvent> = S3EventNotification::from_json(NOTIFICATION)
            .unwrap()
            .into_events();

        assert_eq!(
            events,
            vec![
                ObjectEvent::created("media-bucket", "media/u/My Trip/写真.jpg"),
                ObjectEvent::removed("media-bucket", "media/u/a+b.png"),
            ]
        );
    }

    #[test]
    fn test_invalid_payload() {
        assert!(matches!(
            S3EventNotification::from_json("not json"),
            Err(ThumbnailError::InvalidEvent(_))
        ));
        let empty = S3EventNotification::from_json("{}").unwrap();
        assert!(empty.into_events().is_empty());
    }

    #[test]
    fn test_object_event_wire_format() {
        let event: ObjectEvent = serde_json::from_str(
            r#"{"eventKind": "removed", "bucket": "b", "key": "media/u/a.jpg"}"#,
        )
        .unwrap();
        assert_eq!(event, ObjectEvent::removed("b", "media/u/a.jpg"));
    }
}
