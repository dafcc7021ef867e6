//! File storage module for filedrop.
//!
//! Stored files live in a single flat directory. Names are generated from
//! the original upload filename plus the upload timestamp; the directory
//! listing is the only inventory.

mod path;
mod store;

pub use path::resolve;
pub use store::FileStore;

/// Content types accepted for upload.
pub const ALLOWED_CONTENT_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "application/pdf", "image/gif"];

/// Default maximum upload size (5 MiB).
pub const DEFAULT_MAX_UPLOAD_SIZE: u64 = 5 * 1024 * 1024;

/// Check whether a declared content type is on the upload allow-list.
pub fn is_allowed_content_type(content_type: &str) -> bool {
    ALLOWED_CONTENT_TYPES.contains(&content_type)
}
