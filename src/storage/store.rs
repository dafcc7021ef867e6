//! Flat-directory file store.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::{FiledropError, Result};

use super::path::resolve;

/// File store for uploaded files.
///
/// Files are stored directly under the root directory, named
/// `<base>-<epochMillis><ext>` where `<base>` and `<ext>` come from the
/// original upload filename. Two uploads of the same base name within the
/// same millisecond get a numeric suffix before the extension, so a stored
/// file is never overwritten.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Root directory for stored files.
    root: PathBuf,
}

impl FileStore {
    /// Create a new FileStore rooted at `root`.
    ///
    /// The directory is created if it doesn't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;

        Ok(Self { root })
    }

    /// Get the root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a client-supplied filename to a path under the root.
    pub fn resolve(&self, raw: &str) -> Result<PathBuf> {
        resolve(&self.root, raw)
    }

    /// Save content under a name generated from `original_name`.
    ///
    /// # Returns
    ///
    /// The stored filename (`<base>-<epochMillis><ext>` format).
    pub fn save(&self, content: &[u8], original_name: &str) -> Result<String> {
        let millis = Utc::now().timestamp_millis();
        let (base, ext) = split_name(original_name);

        let mut stored_name = format!("{base}-{millis}{ext}");
        let mut attempt = 1u32;

        loop {
            let path = self.resolve(&stored_name)?;

            // create_new makes the existence check and the create one
            // atomic step, so concurrent saves can never clobber a file.
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
            {
                Ok(mut file) => {
                    file.write_all(content)?;
                    return Ok(stored_name);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    stored_name = format!("{base}-{millis}-{attempt}{ext}");
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Load the content of a stored file.
    ///
    /// Fails with `InvalidPath` if `stored_name` is not a plain filename,
    /// and with `NotFound` if no such file exists.
    pub fn load(&self, stored_name: &str) -> Result<Vec<u8>> {
        let path = self.resolve(stored_name)?;

        match fs::read(&path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(FiledropError::NotFound(format!("file {stored_name}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check if a stored file exists.
    pub fn exists(&self, stored_name: &str) -> bool {
        self.resolve(stored_name)
            .map(|path| path.is_file())
            .unwrap_or(false)
    }

    /// Get the size of a stored file in bytes.
    pub fn file_size(&self, stored_name: &str) -> Result<u64> {
        let path = self.resolve(stored_name)?;

        match fs::metadata(&path) {
            Ok(m) => Ok(m.len()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(FiledropError::NotFound(format!("file {stored_name}")))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Split an original filename into base name and extension.
///
/// Directory components are stripped first; the extension keeps its
/// leading dot, matching how the generated name is assembled.
fn split_name(original: &str) -> (String, String) {
    let name = original.rsplit(['/', '\\']).next().unwrap_or(original);
    let name = match name {
        "" | "." | ".." => "file",
        n => n,
    };

    match name.rsplit_once('.') {
        Some((base, ext)) if !base.is_empty() => (base.to_string(), format!(".{ext}")),
        _ => (name.to_string(), String::new()),
    }
}
