//! Storage path resolution.

use std::path::{Component, Path, PathBuf};

use crate::{FiledropError, Result};

/// Resolve a client-supplied filename to a path under `root`.
///
/// Only a single plain path segment is accepted: absolute paths, directory
/// separators, `.`/`..` components, and NUL bytes are all rejected with
/// `InvalidPath`. The returned path therefore always lies strictly within
/// `root`.
///
/// Performs no filesystem I/O; existence is the caller's concern.
pub fn resolve(root: &Path, raw: &str) -> Result<PathBuf> {
    if raw.is_empty() {
        return Err(FiledropError::InvalidPath("empty filename".to_string()));
    }

    if raw.contains('\0') {
        return Err(FiledropError::InvalidPath(raw.to_string()));
    }

    // Backslash is a separator on Windows and never appears in generated
    // names, so reject it on every platform.
    if raw.contains('/') || raw.contains('\\') {
        return Err(FiledropError::InvalidPath(raw.to_string()));
    }

    let mut components = Path::new(raw).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(root.join(raw)),
        _ => Err(FiledropError::InvalidPath(raw.to_string())),
    }
}
