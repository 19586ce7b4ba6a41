use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use mongodb::bson::Document;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{check_field_names, path, DocumentStore, StoredDocument};
use crate::errors::{AppError, Result};

/// Process-local document store keyed by full document path.
///
/// Listing is in key order. Failures can be injected with
/// [`MemoryStore::fail_writes`] and [`MemoryStore::fail_reads`] to exercise
/// the error paths of callers.
#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<BTreeMap<String, Document>>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While enabled, every mutating call fails with a store error.
    pub fn fail_writes(&self, enabled: bool) {
        self.fail_writes.store(enabled, Ordering::SeqCst);
    }

    /// While enabled, listing and reading documents fail with a store error.
    pub fn fail_reads(&self, enabled: bool) {
        self.fail_reads.store(enabled, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    fn check_readable(&self, path: &str) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            tracing::warn!("Injected read failure for {}", path);
            return Err(AppError::store(format!("read of {} rejected", path)));
        }
        Ok(())
    }

    fn check_writable(&self, path: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            tracing::warn!("Injected write failure for {}", path);
            return Err(AppError::store(format!("write to {} rejected", path)));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_collection(&self, collection: &str) -> Result<Vec<StoredDocument>> {
        self.check_readable(collection)?;
        let prefix = format!("{}/", collection);
        let documents = self.documents.read().await;

        let listed = documents
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .filter_map(|(key, data)| {
                let id = &key[prefix.len()..];
                (!id.contains('/')).then(|| StoredDocument {
                    id: id.to_string(),
                    data: data.clone(),
                })
            })
            .collect();

        Ok(listed)
    }

    async fn get_document(&self, path: &str) -> Result<Option<Document>> {
        path::split(path)?;
        self.check_readable(path)?;
        Ok(self.documents.read().await.get(path).cloned())
    }

    async fn set_document(&self, path: &str, data: Document) -> Result<()> {
        path::split(path)?;
        self.check_writable(path)?;
        self.documents.write().await.insert(path.to_string(), data);
        Ok(())
    }

    async fn add_document(&self, collection: &str, data: Document) -> Result<String> {
        self.check_writable(collection)?;
        let id = Uuid::new_v4().simple().to_string();
        let path = format!("{}/{}", collection, id);
        self.documents.write().await.insert(path, data);
        Ok(id)
    }

    async fn update_document(&self, path: &str, partial: Document) -> Result<()> {
        check_field_names(&partial)?;
        self.check_writable(path)?;

        let mut documents = self.documents.write().await;
        let existing = documents
            .get_mut(path)
            .ok_or_else(|| AppError::not_found(path))?;
        for (key, value) in partial {
            existing.insert(key, value);
        }
        Ok(())
    }

    async fn delete_document(&self, path: &str) -> Result<()> {
        self.check_writable(path)?;
        self.documents.write().await.remove(path);
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn lists_only_direct_children() {
        let store = MemoryStore::new();
        store.set_document("grounds/g1", doc! { "name": "North" }).await.unwrap();
        store
            .set_document("grounds/g1/months/May", doc! { "created": "x" })
            .await
            .unwrap();
        store.set_document("grounds2/x", doc! {}).await.unwrap();

        let grounds = store.list_collection("grounds").await.unwrap();
        assert_eq!(grounds.len(), 1);
        assert_eq!(grounds[0].id, "g1");

        let months = store.list_collection("grounds/g1/months").await.unwrap();
        assert_eq!(months.len(), 1);
        assert_eq!(months[0].id, "May");
    }

    #[tokio::test]
    async fn update_merges_named_fields_only() {
        let store = MemoryStore::new();
        store
            .set_document("grounds/g1", doc! { "name": "North", "city": "Leeds" })
            .await
            .unwrap();

        store
            .update_document("grounds/g1", doc! { "name": "South" })
            .await
            .unwrap();

        let data = store.get_document("grounds/g1").await.unwrap().unwrap();
        assert_eq!(data, doc! { "name": "South", "city": "Leeds" });
    }

    #[tokio::test]
    async fn update_of_missing_document_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update_document("grounds/missing", doc! { "name": "x" })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DocumentNotFound(_)));
    }

    #[tokio::test]
    async fn injected_failures_leave_documents_untouched() {
        let store = MemoryStore::new();
        let id = store.add_document("grounds", doc! { "name": "North" }).await.unwrap();
        let path = format!("grounds/{}", id);

        store.fail_writes(true);
        assert!(store.update_document(&path, doc! { "name": "x" }).await.is_err());
        assert!(store.delete_document(&path).await.is_err());
        assert!(store.add_document("grounds", doc! {}).await.is_err());

        store.fail_writes(false);
        assert_eq!(store.len().await, 1);
        let data = store.get_document(&path).await.unwrap().unwrap();
        assert_eq!(data.get_str("name").unwrap(), "North");
    }
}
