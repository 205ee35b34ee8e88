//! Shared constants used across rusty-media crates.

/// Separator between key segments.
pub const KEY_SEPARATOR: char = '/';

/// Namespace prefix for original media objects.
pub const MEDIA_PREFIX: &str = "media/";

/// Namespace prefix for derived thumbnail objects.
pub const THUMBNAIL_PREFIX: &str = "thumbnails/";

/// Suffix appended to a media key's path to form its thumbnail key.
pub const THUMBNAIL_SUFFIX: &str = ".thumb.jpg";

/// File extensions (lowercase, without dot) classified as images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "tif", "tiff"];

/// File extensions (lowercase, without dot) classified as videos.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv", "webm", "m4v"];

/// Thumbnails fit within a square of this many pixels.
pub const DEFAULT_THUMBNAIL_MAX_DIMENSION: u32 = 300;

/// JPEG quality used when encoding thumbnails (1-100).
pub const DEFAULT_THUMBNAIL_QUALITY: u8 = 80;

/// Default number of in-flight per-object store calls for multi-object operations.
pub const DEFAULT_OPERATION_CONCURRENCY: usize = 10;

/// Default lifetime of presigned download URLs (1 hour).
pub const DEFAULT_PRESIGN_EXPIRY_SECS: u64 = 3600;
