//! Middleware for the filedrop HTTP surface.

pub mod cors;
pub mod rate_limit;
pub mod security;

pub use cors::create_cors_layer;
pub use rate_limit::{download_rate_limit, get_client_ip};
pub use security::security_headers;
