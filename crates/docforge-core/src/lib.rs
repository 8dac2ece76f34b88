//! Docforge Core Library
//!
//! This crate provides the domain models, error types, and configuration
//! that are shared across all docforge components.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{Config, MediaKindTable, RasterFormat};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{Document, MediaKind, StorageLocation};
