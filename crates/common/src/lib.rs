//! Shared types and utilities for rusty-media.
//!
//! This crate provides common functionality used across all rusty-media crates:
//! - Mapping between virtual paths, media keys and thumbnail keys
//! - Query-parameter codec for virtual paths
//! - Generic progress callback trait
//! - Shared constants and error types

pub mod constants;
pub mod error;
pub mod key_utils;
pub mod progress;
pub mod url_path;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::KeyError;
pub use key_utils::{
    classify_by_extension, from_thumbnail_key, is_folder_key, is_media_key, is_within_prefix,
    join_virtual_path, last_segment, normalize_virtual_path, owner_root, parent_prefix,
    parent_virtual_path, replace_last_segment, to_folder_prefix, to_object_key,
    to_thumbnail_key, to_virtual_path, validate_name, MediaKind,
};
pub use progress::{progress_fn, FnProgress, NoOpProgress, ProgressCallback};
pub use url_path::{decode_path_param, encode_path_param};
