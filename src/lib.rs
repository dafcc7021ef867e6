//! Filedrop - a minimal HTTP file upload/download service.
//!
//! Clients POST a file as multipart form data to `/upload`; the service
//! validates the declared content type and size, stores the bytes under a
//! generated name, and returns that name. Files are fetched back via
//! `GET /files/{filename}`, subject to a per-client download rate limit.

pub mod config;
pub mod error;
pub mod logging;
pub mod rate_limit;
pub mod storage;
pub mod web;

pub use config::Config;
pub use error::{FiledropError, Result};
pub use rate_limit::{FixedWindowLimiter, RateLimitConfig, RateLimitResult};
pub use storage::FileStore;
pub use web::WebServer;
