//! Byte storage for document content.
//!
//! Defines the [`Storage`] trait and the local filesystem backend. Keys take
//! the form `documents/{filename}`; content is write-once, so uploads never
//! overwrite an existing key.

pub mod local;
pub mod traits;

pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
