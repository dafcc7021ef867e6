//! API handlers for the filedrop HTTP surface.

pub mod file;

pub use file::{download_file, upload_file};

use std::sync::Arc;

use crate::rate_limit::FixedWindowLimiter;
use crate::storage::FileStore;

/// Shared application state.
#[derive(Debug)]
pub struct AppState {
    /// File store for uploaded files.
    pub store: FileStore,
    /// Download rate limiter.
    pub limiter: Arc<FixedWindowLimiter>,
    /// Maximum accepted upload size in bytes.
    pub max_upload_size: u64,
}

impl AppState {
    /// Create new application state.
    pub fn new(store: FileStore, limiter: Arc<FixedWindowLimiter>, max_upload_size: u64) -> Self {
        Self {
            store,
            limiter,
            max_upload_size,
        }
    }
}
