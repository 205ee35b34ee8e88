//! Virtual filesystem over flat object-storage keys.
//!
//! The object store only knows flat keys such as `media/{owner}/a/b.jpg`.
//! This crate derives folders from those keys and emulates folder operations
//! on top of the store's single-object primitives.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: View state (FolderView: navigation, selection, sort)
//! Layer 2: Operations (MediaFileSystem: list, create, delete, rename, move, upload)
//! Layer 1: Primitives (Entry, parse_listing, natural sort)
//! ```

pub mod entry;
pub mod error;
pub mod listing;
pub mod operations;
pub mod options;
pub mod sorting;
pub mod view;

pub use entry::{Entry, EntryKind};
pub use error::VfsError;
pub use listing::{parse_listing, parse_object_listing};
pub use operations::{
    DeleteResult, MediaFileSystem, MoveResult, RenameProgress, RenameResult, UploadFile,
};
pub use options::OperationOptions;
pub use sorting::{compare_names_natural, sort_entries, SortColumn, SortOrder, SortSpec};
pub use view::{Breadcrumb, FolderView, Selection};
