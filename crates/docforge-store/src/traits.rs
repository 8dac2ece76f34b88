//! Document store abstraction trait

use async_trait::async_trait;
use docforge_core::models::{Document, MediaKind};
use thiserror::Error;
use uuid::Uuid;

/// Store operation errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Duplicate document id: {0}")]
    DuplicateId(Uuid),

    #[error("Store backend error: {0}")]
    BackendError(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Keyed store of document records.
///
/// Individual operations are atomic at the store level. `bulk_create` is
/// transactional: either every record in the batch is persisted or none is.
/// No cross-request ordering is guaranteed beyond that.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist a single document record.
    async fn create(&self, document: Document) -> StoreResult<Document>;

    /// Persist a batch of document records, all-or-nothing.
    ///
    /// Returns the created documents in input order.
    async fn bulk_create(&self, documents: Vec<Document>) -> StoreResult<Vec<Document>>;

    /// Fetch a document by id, constrained to the given kind.
    ///
    /// A kind mismatch yields `None`, same as an absent id.
    async fn get(&self, id: Uuid, kind: MediaKind) -> StoreResult<Option<Document>>;

    /// All documents of the given kind, in upload order.
    async fn list(&self, kind: MediaKind) -> StoreResult<Vec<Document>>;

    /// Hard-delete a document by id, constrained to the given kind.
    ///
    /// Returns the removed document, or `None` if the id was absent or of
    /// another kind (concurrent deletes race harmlessly to `None`).
    async fn delete(&self, id: Uuid, kind: MediaKind) -> StoreResult<Option<Document>>;

    /// Total number of stored records, all kinds.
    async fn count(&self) -> StoreResult<usize>;
}
