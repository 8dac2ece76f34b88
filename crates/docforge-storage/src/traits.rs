//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// The ingestion pipeline and transform engine work against this trait so
/// they never couple to a concrete backend.
///
/// **Key format:** `documents/{filename}` where filename is a fresh
/// identifier plus the item's extension.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write a file and return (storage_key, storage_url).
    ///
    /// The storage_key is the internal identifier used to reference the file;
    /// the storage_url is the retrievable URL to the file.
    async fn upload(&self, filename: &str, data: Vec<u8>) -> StorageResult<(String, String)>;

    /// Read a file's full contents by its storage key.
    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>>;

    /// Delete a file by its storage key.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Check if a file exists.
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;
}
