//! API error handling for the filedrop HTTP surface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::FiledropError;

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed request (400).
    BadRequest,
    /// Multipart request carried no file part (400).
    MissingFile,
    /// Filename resolved outside the storage root (400).
    InvalidPath,
    /// Requested file does not exist (404).
    NotFound,
    /// Upload content type is not on the allow-list (415).
    UnsupportedType,
    /// Upload exceeded the size ceiling (413).
    PayloadTooLarge,
    /// Client exceeded its download quota (429).
    RateLimited,
    /// Reading stored bytes failed after the existence check (500).
    TransferFailed,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::MissingFile => StatusCode::BAD_REQUEST,
            ErrorCode::InvalidPath => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::UnsupportedType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorCode::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ErrorCode::TransferFailed => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    /// Error code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Create a missing file error.
    pub fn missing_file(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingFile, message)
    }

    /// Create an invalid path error.
    pub fn invalid_path(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidPath, message)
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Create an unsupported content type error.
    pub fn unsupported_type(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnsupportedType, message)
    }

    /// Create a payload too large error.
    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PayloadTooLarge, message)
    }

    /// Create a rate limited error.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::RateLimited, message)
    }

    /// Create a transfer failed error.
    pub fn transfer_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::TransferFailed, message)
    }

    /// Create an internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<FiledropError> for ApiError {
    fn from(err: FiledropError) -> Self {
        match &err {
            FiledropError::MissingFile => ApiError::missing_file("No file uploaded"),
            FiledropError::InvalidPath(_) => ApiError::invalid_path("Invalid path"),
            FiledropError::NotFound(_) => ApiError::not_found("File not found"),
            FiledropError::UnsupportedType(t) => {
                ApiError::unsupported_type(format!("Invalid file type: {t}"))
            }
            FiledropError::TooLarge { limit, .. } => {
                ApiError::payload_too_large(format!("File too large (max {limit} bytes)"))
            }
            FiledropError::RateLimited => {
                ApiError::rate_limited("Too many requests. Please try again later.")
            }
            _ => {
                tracing::error!("Internal error: {}", err);
                ApiError::internal("An internal error occurred")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_status() {
        assert_eq!(ErrorCode::BadRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::MissingFile.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::InvalidPath.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::UnsupportedType.status_code(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            ErrorCode::PayloadTooLarge.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ErrorCode::RateLimited.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            ErrorCode::TransferFailed.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::InternalError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::PayloadTooLarge).unwrap();
        assert_eq!(json, "\"PAYLOAD_TOO_LARGE\"");

        let json = serde_json::to_string(&ErrorCode::RateLimited).unwrap();
        assert_eq!(json, "\"RATE_LIMITED\"");
    }

    #[test]
    fn test_api_error_constructors() {
        assert_eq!(ApiError::bad_request("x").code, ErrorCode::BadRequest);
        assert_eq!(ApiError::missing_file("x").code, ErrorCode::MissingFile);
        assert_eq!(ApiError::invalid_path("x").code, ErrorCode::InvalidPath);
        assert_eq!(ApiError::not_found("x").code, ErrorCode::NotFound);
        assert_eq!(
            ApiError::unsupported_type("x").code,
            ErrorCode::UnsupportedType
        );
        assert_eq!(
            ApiError::payload_too_large("x").code,
            ErrorCode::PayloadTooLarge
        );
        assert_eq!(ApiError::rate_limited("x").code, ErrorCode::RateLimited);
        assert_eq!(
            ApiError::transfer_failed("x").code,
            ErrorCode::TransferFailed
        );
        assert_eq!(ApiError::internal("x").code, ErrorCode::InternalError);
    }

    #[test]
    fn test_from_filedrop_error() {
        let err: ApiError = FiledropError::MissingFile.into();
        assert_eq!(err.code, ErrorCode::MissingFile);

        let err: ApiError = FiledropError::InvalidPath("../x".to_string()).into();
        assert_eq!(err.code, ErrorCode::InvalidPath);

        let err: ApiError = FiledropError::NotFound("file x".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err: ApiError = FiledropError::UnsupportedType("text/html".to_string()).into();
        assert_eq!(err.code, ErrorCode::UnsupportedType);

        let err: ApiError = FiledropError::TooLarge { size: 10, limit: 5 }.into();
        assert_eq!(err.code, ErrorCode::PayloadTooLarge);

        let err: ApiError = FiledropError::RateLimited.into();
        assert_eq!(err.code, ErrorCode::RateLimited);

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let err: ApiError = FiledropError::Io(io).into();
        assert_eq!(err.code, ErrorCode::InternalError);
    }
}
