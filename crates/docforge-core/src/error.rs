//! Error types module
//!
//! This module provides the core error types used throughout docforge.
//! All errors are unified under the `AppError` enum, which covers the
//! ingestion validation taxonomy (decode, empty, unrecognized, unsupported),
//! enrichment and transform failures, and store/storage failures.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented.
/// This trait allows errors to self-describe their HTTP response characteristics.
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "UNSUPPORTED_MEDIA")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Malformed base64 payload: {0}")]
    Decode(String),

    #[error("Uploaded file is empty")]
    EmptyFile,

    #[error("Content signature not recognized and no filename given")]
    UnrecognizedContent,

    #[error("Unsupported file type: {extension}")]
    UnsupportedMedia { extension: String },

    #[error("Invalid rotation angle: {0}")]
    InvalidAngle(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Cannot decode stored image: {0}")]
    CorruptImage(String),

    #[error("Cannot parse stored PDF: {0}")]
    CorruptPdf(String),

    #[error("Page rendering failed: {0}")]
    Render(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Document store error: {0}")]
    Store(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::InvalidInput(format!("UUID parsing error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable,
/// suggested_action, sensitive, log_level). client_message stays per-variant
/// for dynamic content.
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::Decode(_) => (
            400,
            "DECODE_ERROR",
            false,
            Some("Check that the file field is valid base64"),
            false,
            LogLevel::Debug,
        ),
        AppError::EmptyFile => (
            400,
            "EMPTY_FILE",
            false,
            Some("Upload a non-empty file"),
            false,
            LogLevel::Debug,
        ),
        AppError::UnrecognizedContent => (
            400,
            "UNRECOGNIZED_CONTENT",
            false,
            Some("Provide a filename or upload a recognized file type"),
            false,
            LogLevel::Debug,
        ),
        AppError::UnsupportedMedia { .. } => (
            400,
            "UNSUPPORTED_MEDIA",
            false,
            Some("Upload one of the supported file types"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidAngle(_) => (
            400,
            "INVALID_ANGLE",
            false,
            Some("Provide rotation_angle as a real number"),
            false,
            LogLevel::Debug,
        ),
        AppError::NotFound(_) => (
            404,
            "NOT_FOUND",
            false,
            Some("Verify the document ID exists and has the right media type"),
            false,
            LogLevel::Debug,
        ),
        AppError::CorruptImage(_) => (
            400,
            "CORRUPT_IMAGE",
            false,
            Some("Re-upload the image; the stored bytes cannot be decoded"),
            false,
            LogLevel::Warn,
        ),
        AppError::CorruptPdf(_) => (
            400,
            "CORRUPT_PDF",
            false,
            Some("Re-upload the PDF; the stored bytes cannot be parsed"),
            false,
            LogLevel::Warn,
        ),
        AppError::Render(_) => (
            400,
            "RENDER_ERROR",
            false,
            Some("Check the PDF contents and try a different file"),
            false,
            LogLevel::Warn,
        ),
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::PayloadTooLarge(_) => (
            413,
            "PAYLOAD_TOO_LARGE",
            false,
            Some("Reduce file size"),
            false,
            LogLevel::Debug,
        ),
        AppError::Storage(_) => (
            500,
            "STORAGE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::Store(_) => (
            500,
            "STORE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::Internal(_) => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Decode(_) => "Decode",
            AppError::EmptyFile => "EmptyFile",
            AppError::UnrecognizedContent => "UnrecognizedContent",
            AppError::UnsupportedMedia { .. } => "UnsupportedMedia",
            AppError::InvalidAngle(_) => "InvalidAngle",
            AppError::NotFound(_) => "NotFound",
            AppError::CorruptImage(_) => "CorruptImage",
            AppError::CorruptPdf(_) => "CorruptPdf",
            AppError::Render(_) => "Render",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::Storage(_) => "Storage",
            AppError::Store(_) => "Store",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including the source chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Storage(_) => "Failed to access storage".to_string(),
            AppError::Store(_) => "Failed to access the document store".to_string(),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_unsupported_media() {
        let err = AppError::UnsupportedMedia {
            extension: "txt".to_string(),
        };
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "UNSUPPORTED_MEDIA");
        assert!(!err.is_recoverable());
        assert!(err.client_message().contains("txt"));
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_not_found() {
        let err = AppError::NotFound("Image not found".to_string());
        assert_eq!(err.http_status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert_eq!(err.client_message(), "Not found: Image not found");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_internal_hides_details() {
        let err = AppError::Internal("pdfium binding failed".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert!(err.is_sensitive());
        assert_eq!(err.client_message(), "Internal server error");
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_validation_errors_are_client_errors() {
        for err in [
            AppError::Decode("bad padding".into()),
            AppError::EmptyFile,
            AppError::UnrecognizedContent,
            AppError::InvalidAngle("abc".into()),
        ] {
            assert_eq!(err.http_status_code(), 400, "{:?}", err);
            assert!(!err.is_sensitive());
        }
    }

    #[test]
    fn test_detailed_message_includes_source_chain() {
        let source = anyhow::anyhow!("root cause");
        let err = AppError::InternalWithSource {
            message: "wrapper".to_string(),
            source,
        };
        assert!(err.detailed_message().contains("Caused by: root cause"));
    }
}
