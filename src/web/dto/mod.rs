//! DTOs for the filedrop HTTP surface.

mod response;

pub use response::UploadResponse;
