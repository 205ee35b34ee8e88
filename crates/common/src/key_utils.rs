//! Mapping between virtual paths and object storage keys.
//!
//! Object keys live under `media/{owner}/`; a virtual path is the owner-relative
//! remainder (`folder/sub/file.jpg`, root is `""`). A key ending in `/` denotes a
//! folder marker or prefix. Thumbnails mirror media keys under `thumbnails/`
//! with a fixed suffix. All functions here are pure.

use serde::{Deserialize, Serialize};

use crate::constants::{
    IMAGE_EXTENSIONS, KEY_SEPARATOR, MEDIA_PREFIX, THUMBNAIL_PREFIX, THUMBNAIL_SUFFIX,
    VIDEO_EXTENSIONS,
};
use crate::error::KeyError;

/// Broad media classification derived from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Other,
}

impl MediaKind {
    /// Lowercase label used in logs and serialized views.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Other => "other",
        }
    }

    /// Whether this kind can have a derived thumbnail.
    pub fn is_visual(&self) -> bool {
        matches!(self, MediaKind::Image | MediaKind::Video)
    }
}

/// Root prefix of an owner's media namespace.
///
/// # Arguments
/// * `owner_id` - Opaque per-identity namespace id
///
/// # Returns
/// `media/{owner_id}/`
pub fn owner_root(owner_id: &str) -> String {
    format!("{}{}/", MEDIA_PREFIX, owner_id)
}

/// Split a path into its non-empty segments.
fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(KEY_SEPARATOR).filter(|s: &&str| !s.is_empty())
}

/// Convert a virtual path to the full object key.
///
/// Empty segments are dropped, so `"a//b/"` and `"a/b"` map to the same key.
/// The empty virtual path maps to the owner's root prefix.
///
/// # Arguments
/// * `owner_id` - Opaque per-identity namespace id
/// * `virtual_path` - Owner-relative path
///
/// # Returns
/// `media/{owner_id}/{segments...}` (no trailing separator unless root).
pub fn to_object_key(owner_id: &str, virtual_path: &str) -> String {
    let joined: String = segments(virtual_path).collect::<Vec<_>>().join("/");
    format!("{}{}", owner_root(owner_id), joined)
}

/// Prefix under which every object of a virtual folder lives.
///
/// # Arguments
/// * `owner_id` - Opaque per-identity namespace id
/// * `virtual_path` - Owner-relative folder path
///
/// # Returns
/// The folder key with a trailing separator; the owner root for `""`.
pub fn to_folder_prefix(owner_id: &str, virtual_path: &str) -> String {
    let key: String = to_object_key(owner_id, virtual_path);
    if key.ends_with(KEY_SEPARATOR) {
        key
    } else {
        format!("{}/", key)
    }
}

/// Convert a full key or an owner-relative path to a normalized virtual path.
///
/// Callers pass both forms interchangeably, so the owner root is stripped only
/// when present. Applying this function to its own output is a no-op.
///
/// # Arguments
/// * `owner_id` - Opaque per-identity namespace id
/// * `key_or_path` - Full object key or owner-relative path
///
/// # Returns
/// Virtual path without leading/trailing separators.
pub fn to_virtual_path(owner_id: &str, key_or_path: &str) -> String {
    let root: String = owner_root(owner_id);
    let bare_root: &str = root.trim_end_matches(KEY_SEPARATOR);

    let relative: &str = if let Some(rest) = key_or_path.strip_prefix(&root) {
        rest
    } else if key_or_path == bare_root {
        ""
    } else {
        key_or_path
    };

    segments(relative).collect::<Vec<_>>().join("/")
}

/// Normalize a virtual path by dropping empty segments.
pub fn normalize_virtual_path(path: &str) -> String {
    segments(path).collect::<Vec<_>>().join("/")
}

/// Join a child segment onto a virtual folder path.
pub fn join_virtual_path(base: &str, name: &str) -> String {
    segments(base)
        .chain(segments(name))
        .collect::<Vec<_>>()
        .join("/")
}

/// Parent of a virtual path; the root's parent is the root.
pub fn parent_virtual_path(path: &str) -> String {
    let mut parts: Vec<&str> = segments(path).collect();
    parts.pop();
    parts.join("/")
}

/// Derive the thumbnail key for a media key.
///
/// # Arguments
/// * `media_key` - Key under the `media/` namespace
///
/// # Returns
/// `thumbnails/{rest}.thumb.jpg`
///
/// # Errors
/// `KeyError::InvalidArgument` when `media_key` is outside `media/`.
pub fn to_thumbnail_key(media_key: &str) -> Result<String, KeyError> {
    let rest: &str = media_key.strip_prefix(MEDIA_PREFIX).ok_or_else(|| {
        KeyError::invalid_argument(media_key, format!("key must start with '{}'", MEDIA_PREFIX))
    })?;
    Ok(format!("{}{}{}", THUMBNAIL_PREFIX, rest, THUMBNAIL_SUFFIX))
}

/// Recover the media key a thumbnail was derived from.
///
/// # Arguments
/// * `thumbnail_key` - Key under the `thumbnails/` namespace
///
/// # Errors
/// `KeyError::InvalidArgument` when the prefix or the suffix is missing.
pub fn from_thumbnail_key(thumbnail_key: &str) -> Result<String, KeyError> {
    let rest: &str = thumbnail_key
        .strip_prefix(THUMBNAIL_PREFIX)
        .and_then(|r: &str| r.strip_suffix(THUMBNAIL_SUFFIX))
        .ok_or_else(|| {
            KeyError::invalid_argument(
                thumbnail_key,
                format!(
                    "key must start with '{}' and end with '{}'",
                    THUMBNAIL_PREFIX, THUMBNAIL_SUFFIX
                ),
            )
        })?;
    Ok(format!("{}{}", MEDIA_PREFIX, rest))
}

/// Whether the key belongs to the media namespace.
pub fn is_media_key(key: &str) -> bool {
    key.starts_with(MEDIA_PREFIX)
}

/// Whether the key denotes a folder (marker or prefix).
pub fn is_folder_key(key: &str) -> bool {
    key.ends_with(KEY_SEPARATOR)
}

/// Classify a file name (or key) by its extension, case-insensitively.
///
/// Names without an extension, dotfiles such as `.jpg`, and folder keys are
/// `Other`.
///
/// # Arguments
/// * `name` - File name or full key
pub fn classify_by_extension(name: &str) -> MediaKind {
    if is_folder_key(name) {
        return MediaKind::Other;
    }

    let file_name: &str = last_segment(name);
    let ext: String = match file_name.rfind('.') {
        Some(pos) if pos > 0 && pos < file_name.len() - 1 => file_name[pos + 1..].to_lowercase(),
        _ => return MediaKind::Other,
    };

    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        MediaKind::Image
    } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        MediaKind::Video
    } else {
        MediaKind::Other
    }
}

/// Last path segment of a key, ignoring a trailing separator.
pub fn last_segment(key: &str) -> &str {
    key.trim_end_matches(KEY_SEPARATOR)
        .rsplit(KEY_SEPARATOR)
        .next()
        .unwrap_or("")
}

/// Prefix of the folder containing `key`, including the trailing separator.
///
/// Returns an empty string for top-level keys.
pub fn parent_prefix(key: &str) -> &str {
    let trimmed: &str = key.trim_end_matches(KEY_SEPARATOR);
    match trimmed.rfind(KEY_SEPARATOR) {
        Some(pos) => &key[..=pos],
        None => "",
    }
}

/// Replace the last segment of `key`, preserving a trailing separator.
///
/// # Arguments
/// * `key` - File key or folder key
/// * `new_name` - Replacement segment
pub fn replace_last_segment(key: &str, new_name: &str) -> String {
    let suffix: &str = if is_folder_key(key) { "/" } else { "" };
    format!("{}{}{}", parent_prefix(key), new_name, suffix)
}

/// Check that a user supplied name is usable as a single path segment.
///
/// # Errors
/// `KeyError::InvalidName` for empty names, names containing a separator, and
/// the relative segments `.` and `..`.
pub fn validate_name(name: &str) -> Result<(), KeyError> {
    let reason: Option<&'static str> = if name.trim().is_empty() {
        Some("name must not be empty")
    } else if name.contains(KEY_SEPARATOR) {
        Some("name must not contain '/'")
    } else if name == "." || name == ".." {
        Some("relative segments are not allowed")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(KeyError::InvalidName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Check whether `key` lies under `prefix` (lexically).
pub fn is_within_prefix(key: &str, prefix: &str) -> bool {
    key.starts_with(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_object_key_joins_segments() {
        assert_eq!(to_object_key("u1", "a/b/c.jpg"), "media/u1/a/b/c.jpg");
        assert_eq!(to_object_key("u1", "/a//b/"), "media/u1/a/b");
    }

    #[test]
    fn test_to_object_key_root() {
        assert_eq!(to_object_key("u1", ""), "media/u1/");
        assert_eq!(to_folder_prefix("u1", ""), "media/u1/");
        assert_eq!(to_folder_prefix("u1", "photos"), "media/u1/photos/");
    }

    #[test]
    fn test_to_virtual_path_accepts_both_forms() {
        assert_eq!(to_virtual_path("u1", "media/u1/a/b.jpg"), "a/b.jpg");
        assert_eq!(to_virtual_path("u1", "a/b.jpg"), "a/b.jpg");
        assert_eq!(to_virtual_path("u1", "media/u1/a/"), "a");
        assert_eq!(to_virtual_path("u1", "media/u1/"), "");
        assert_eq!(to_virtual_path("u1", "media/u1"), "");
    }

    #[test]
    fn test_to_virtual_path_idempotent() {
        let keys: [&str; 4] = [
            "media/abc/photos/2024/img.jpg",
            "media/abc/",
            "media/abc/folder/",
            "media/abc/写真/旅行/a.png",
        ];
        for key in keys {
            let once: String = to_virtual_path("abc", key);
            let twice: String = to_virtual_path("abc", &once);
            assert_eq!(once, twice);
            let via_key: String = to_virtual_path("abc", &to_object_key("abc", &once));
            assert_eq!(via_key, once);
        }
    }

    #[test]
    fn test_to_thumbnail_key() {
        assert_eq!(
            to_thumbnail_key("media/abc123/photos/image.jpg").unwrap(),
            "thumbnails/abc123/photos/image.jpg.thumb.jpg"
        );
    }

    #[test]
    fn test_to_thumbnail_key_rejects_non_media() {
        let err: KeyError = to_thumbnail_key("thumbnails/abc/x.jpg").unwrap_err();
        assert!(matches!(err, KeyError::InvalidArgument { .. }));
        assert!(to_thumbnail_key("other/media/x.jpg").is_err());
        assert!(to_thumbnail_key("").is_err());
    }

    #[test]
    fn test_from_thumbnail_key_inverts() {
        let media: &str = "media/abc/a/b.png";
        let thumb: String = to_thumbnail_key(media).unwrap();
        assert_eq!(from_thumbnail_key(&thumb).unwrap(), media);
        assert!(from_thumbnail_key("thumbnails/abc/a/b.png").is_err());
    }

    #[test]
    fn test_classify_by_extension() {
        assert_eq!(classify_by_extension("photo.JPG"), MediaKind::Image);
        assert_eq!(classify_by_extension("media/u/a/clip.Mp4"), MediaKind::Video);
        assert_eq!(classify_by_extension("notes.txt"), MediaKind::Other);
        assert_eq!(classify_by_extension("README"), MediaKind::Other);
        assert_eq!(classify_by_extension(".jpg"), MediaKind::Other);
        assert_eq!(classify_by_extension("trailing."), MediaKind::Other);
        assert_eq!(classify_by_extension("media/u/pics.jpg/"), MediaKind::Other);
    }

    #[test]
    fn test_segment_helpers() {
        assert_eq!(last_segment("media/u/a/b.jpg"), "b.jpg");
        assert_eq!(last_segment("media/u/a/"), "a");
        assert_eq!(parent_prefix("media/u/a/b.jpg"), "media/u/a/");
        assert_eq!(parent_prefix("media/u/a/"), "media/u/");
        assert_eq!(parent_prefix("top"), "");
    }

    #[test]
    fn test_replace_last_segment_preserves_folder_suffix() {
        assert_eq!(replace_last_segment("media/u/old.jpg", "new.jpg"), "media/u/new.jpg");
        assert_eq!(replace_last_segment("media/u/a/old/", "new"), "media/u/a/new/");
    }

    #[test]
    fn test_virtual_path_helpers() {
        assert_eq!(normalize_virtual_path("/a//b/"), "a/b");
        assert_eq!(join_virtual_path("", "a"), "a");
        assert_eq!(join_virtual_path("a/b", "c"), "a/b/c");
        assert_eq!(parent_virtual_path("a/b/c"), "a/b");
        assert_eq!(parent_virtual_path("a"), "");
        assert_eq!(parent_virtual_path(""), "");
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("holiday").is_ok());
        assert!(validate_name("写真").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("  ").is_err());
        assert!(validate_name("a/b").is_err());
        assert!(validate_name("..").is_err());
    }

    #[test]
    fn test_is_within_prefix_is_lexical() {
        assert!(is_within_prefix("media/u1/a.jpg", "media/u1/"));
        assert!(!is_within_prefix("media/u10/a.jpg", "media/u1/"));
        // Without a trailing separator the check also matches siblings.
        assert!(is_within_prefix("media/u10/a.jpg", "media/u1"));
    }
}
