//! Error types for filedrop.

use thiserror::Error;

/// Common error type for filedrop.
#[derive(Error, Debug)]
pub enum FiledropError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// A requested filename resolved outside the storage root.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Upload declared a content type outside the allow-list.
    #[error("unsupported content type: {0}")]
    UnsupportedType(String),

    /// Upload exceeded the configured size ceiling.
    #[error("file too large: {size} bytes (limit {limit})")]
    TooLarge {
        /// Actual size of the uploaded file in bytes.
        size: u64,
        /// Configured maximum in bytes.
        limit: u64,
    },

    /// Multipart request carried no file part.
    #[error("no file uploaded")]
    MissingFile,

    /// Client exceeded its download quota for the current window.
    #[error("rate limit exceeded")]
    RateLimited,

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for filedrop operations.
pub type Result<T> = std::result::Result<T, FiledropError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = FiledropError::NotFound("file photo.png".to_string());
        assert_eq!(err.to_string(), "file photo.png not found");
    }

    #[test]
    fn test_invalid_path_display() {
        let err = FiledropError::InvalidPath("../../etc/passwd".to_string());
        assert_eq!(err.to_string(), "invalid path: ../../etc/passwd");
    }

    #[test]
    fn test_unsupported_type_display() {
        let err = FiledropError::UnsupportedType("text/html".to_string());
        assert_eq!(err.to_string(), "unsupported content type: text/html");
    }

    #[test]
    fn test_too_large_display() {
        let err = FiledropError::TooLarge {
            size: 6 * 1024 * 1024,
            limit: 5 * 1024 * 1024,
        };
        assert!(err.to_string().contains("6291456"));
        assert!(err.to_string().contains("5242880"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: FiledropError = io_err.into();
        assert!(matches!(err, FiledropError::Io(_)));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<u32> {
            Ok(7)
        }

        fn sample_err() -> Result<u32> {
            Err(FiledropError::MissingFile)
        }

        assert_eq!(sample_ok().unwrap(), 7);
        assert!(sample_err().is_err());
    }
}
