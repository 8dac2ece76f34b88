//! In-memory document store.
//!
//! Backs the record store with a RwLock'd map plus an insertion sequence so
//! kind-scoped lists come back in upload order. `bulk_create` validates the
//! whole batch and inserts under a single write lock, which gives it the
//! all-or-nothing semantics the ingestion pipeline requires.

use crate::traits::{DocumentStore, StoreError, StoreResult};
use async_trait::async_trait;
use docforge_core::models::{Document, MediaKind};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Inner {
    rows: HashMap<Uuid, (u64, Document)>,
    next_seq: u64,
}

/// In-process [`DocumentStore`] implementation.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create(&self, document: Document) -> StoreResult<Document> {
        let mut inner = self.inner.write().await;
        if inner.rows.contains_key(&document.id) {
            return Err(StoreError::DuplicateId(document.id));
        }
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.rows.insert(document.id, (seq, document.clone()));
        Ok(document)
    }

    async fn bulk_create(&self, documents: Vec<Document>) -> StoreResult<Vec<Document>> {
        let mut inner = self.inner.write().await;

        // Validate the whole batch before touching the map: no partial writes.
        for (i, doc) in documents.iter().enumerate() {
            if inner.rows.contains_key(&doc.id)
                || documents[..i].iter().any(|d| d.id == doc.id)
            {
                return Err(StoreError::DuplicateId(doc.id));
            }
        }

        for doc in &documents {
            let seq = inner.next_seq;
            inner.next_seq += 1;
            inner.rows.insert(doc.id, (seq, doc.clone()));
        }

        Ok(documents)
    }

    async fn get(&self, id: Uuid, kind: MediaKind) -> StoreResult<Option<Document>> {
        let inner = self.inner.read().await;
        Ok(inner
            .rows
            .get(&id)
            .filter(|(_, doc)| doc.media_type == kind)
            .map(|(_, doc)| doc.clone()))
    }

    async fn list(&self, kind: MediaKind) -> StoreResult<Vec<Document>> {
        let inner = self.inner.read().await;
        let mut rows: Vec<(u64, Document)> = inner
            .rows
            .values()
            .filter(|(_, doc)| doc.media_type == kind)
            .cloned()
            .collect();
        rows.sort_by_key(|(seq, _)| *seq);
        Ok(rows.into_iter().map(|(_, doc)| doc).collect())
    }

    async fn delete(&self, id: Uuid, kind: MediaKind) -> StoreResult<Option<Document>> {
        let mut inner = self.inner.write().await;
        let matches = inner
            .rows
            .get(&id)
            .map(|(_, doc)| doc.media_type == kind)
            .unwrap_or(false);
        if !matches {
            return Ok(None);
        }
        Ok(inner.rows.remove(&id).map(|(_, doc)| doc))
    }

    async fn count(&self) -> StoreResult<usize> {
        let inner = self.inner.read().await;
        Ok(inner.rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use docforge_core::models::StorageLocation;

    fn doc(kind: MediaKind) -> Document {
        let id = Uuid::new_v4();
        Document {
            id,
            media_type: kind,
            filename: format!("{}.bin", id),
            storage: StorageLocation {
                key: format!("documents/{}.bin", id),
                url: format!("http://localhost/media/documents/{}.bin", id),
            },
            uploaded_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_by_kind() {
        let store = MemoryStore::new();
        let image = store.create(doc(MediaKind::Image)).await.unwrap();

        assert!(store.get(image.id, MediaKind::Image).await.unwrap().is_some());
        // Kind mismatch behaves like an absent id.
        assert!(store.get(image.id, MediaKind::Pdf).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_preserves_upload_order() {
        let store = MemoryStore::new();
        let a = store.create(doc(MediaKind::Image)).await.unwrap();
        let _pdf = store.create(doc(MediaKind::Pdf)).await.unwrap();
        let b = store.create(doc(MediaKind::Image)).await.unwrap();

        let images = store.list(MediaKind::Image).await.unwrap();
        assert_eq!(
            images.iter().map(|d| d.id).collect::<Vec<_>>(),
            vec![a.id, b.id]
        );
    }

    #[tokio::test]
    async fn test_bulk_create_is_all_or_nothing() {
        let store = MemoryStore::new();
        let existing = store.create(doc(MediaKind::Image)).await.unwrap();

        let fresh = doc(MediaKind::Image);
        let conflicting = Document {
            id: existing.id,
            ..doc(MediaKind::Image)
        };

        let err = store
            .bulk_create(vec![fresh, conflicting])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(id) if id == existing.id));

        // Nothing from the failed batch was persisted.
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_decrements_count_and_loser_gets_none() {
        let store = MemoryStore::new();
        let image = store.create(doc(MediaKind::Image)).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 1);

        let removed = store.delete(image.id, MediaKind::Image).await.unwrap();
        assert_eq!(removed.map(|d| d.id), Some(image.id));
        assert_eq!(store.count().await.unwrap(), 0);

        // Second delete of the same id races to "not found".
        assert!(store.delete(image.id, MediaKind::Image).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_respects_kind_constraint() {
        let store = MemoryStore::new();
        let pdf = store.create(doc(MediaKind::Pdf)).await.unwrap();

        assert!(store.delete(pdf.id, MediaKind::Image).await.unwrap().is_none());
        assert_eq!(store.count().await.unwrap(), 1);
    }
}
