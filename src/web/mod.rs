//! Web API module for filedrop.
//!
//! This module provides the HTTP surface of the service: upload and
//! download handlers, the download rate limit middleware, and the server
//! wiring.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
