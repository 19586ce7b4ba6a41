//! Minimal document-store boundary the roster is persisted through.

use async_trait::async_trait;
use mongodb::bson::Document;

use crate::errors::{AppError, Result};

pub mod memory;
pub mod mongo;
pub mod path;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// A document read back from a collection listing.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub data: Document,
}

/// Hierarchical document store addressed by slash-separated paths.
///
/// Collection paths have an odd number of segments, document paths an even
/// number. Implementations perform no validation of document contents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Lists every document directly under `collection`.
    async fn list_collection(&self, collection: &str) -> Result<Vec<StoredDocument>>;

    async fn get_document(&self, path: &str) -> Result<Option<Document>>;

    /// Creates or replaces the document at a caller-chosen key.
    async fn set_document(&self, path: &str, data: Document) -> Result<()>;

    /// Creates a document under a backend-assigned key and returns the key.
    async fn add_document(&self, collection: &str, data: Document) -> Result<String>;

    /// Merge-patch: only the fields present in `partial` are modified.
    /// Fails with [`AppError::DocumentNotFound`] when nothing exists at `path`.
    async fn update_document(&self, path: &str, partial: Document) -> Result<()>;

    async fn delete_document(&self, path: &str) -> Result<()>;

    /// Round-trip check used by the health endpoint.
    async fn ping(&self) -> Result<()>;
}

/// Rejects field names the backends cannot patch individually.
pub(crate) fn check_field_names(partial: &Document) -> Result<()> {
    for key in partial.keys() {
        if key.is_empty() || key.starts_with('$') || key.contains('.') {
            return Err(AppError::invalid_data(format!("invalid field name '{}'", key)));
        }
    }
    Ok(())
}
