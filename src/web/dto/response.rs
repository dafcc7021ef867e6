//! Response DTOs.

use serde::Serialize;
use utoipa::ToSchema;

/// Upload confirmation response.
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    /// Confirmation message.
    pub message: String,
    /// Generated filename the file was stored under.
    pub filename: String,
}

impl UploadResponse {
    /// Create an upload confirmation for a stored filename.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            message: "File uploaded successfully".to_string(),
            filename: filename.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_response_shape() {
        let response = UploadResponse::new("photo-1700000000000.png");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["message"], "File uploaded successfully");
        assert_eq!(json["filename"], "photo-1700000000000.png");
    }
}
