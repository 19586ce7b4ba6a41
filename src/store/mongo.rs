use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    Collection, Database, IndexModel,
};

use super::{check_field_names, path, DocumentStore, StoredDocument};
use crate::errors::{AppError, Result};

/// Document store backed by a single MongoDB collection.
///
/// Every document is stored as
/// `{ _id: "<full path>", collection: "<parent collection path>", data: {..} }`
/// so the nested path layout survives unchanged.
#[derive(Clone)]
pub struct MongoStore {
    db: Database,
    documents: Collection<Document>,
}

impl MongoStore {
    pub async fn new(db: Database, collection_name: &str) -> Result<Self> {
        let documents: Collection<Document> = db.collection(collection_name);

        let index = IndexModel::builder()
            .keys(doc! { "collection": 1, "_id": 1 })
            .build();
        documents.create_index(index).await?;
        tracing::info!("Using MongoDB collection '{}' for documents", collection_name);

        Ok(MongoStore { db, documents })
    }

    fn envelope(path: &str, collection: &str, data: Document) -> Document {
        doc! {
            "_id": path,
            "collection": collection,
            "data": data,
        }
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn list_collection(&self, collection: &str) -> Result<Vec<StoredDocument>> {
        let cursor = self
            .documents
            .find(doc! { "collection": collection })
            .sort(doc! { "_id": 1 })
            .await?;
        let raw: Vec<Document> = cursor.try_collect().await?;

        let mut listed = Vec::with_capacity(raw.len());
        for envelope in raw {
            let full_path = envelope.get_str("_id").map_err(|e| AppError::store(e.to_string()))?;
            let (_, id) = path::split(full_path)?;
            let data = envelope_data(&envelope)?;
            listed.push(StoredDocument {
                id: id.to_string(),
                data,
            });
        }

        tracing::debug!("Listed {} documents under {}", listed.len(), collection);
        Ok(listed)
    }

    async fn get_document(&self, path: &str) -> Result<Option<Document>> {
        let found = self.documents.find_one(doc! { "_id": path }).await?;
        found.map(|envelope| envelope_data(&envelope)).transpose()
    }

    async fn set_document(&self, path: &str, data: Document) -> Result<()> {
        let (collection, _) = path::split(path)?;
        self.documents
            .replace_one(doc! { "_id": path }, Self::envelope(path, collection, data))
            .upsert(true)
            .await?;
        tracing::info!("Set document {}", path);
        Ok(())
    }

    async fn add_document(&self, collection: &str, data: Document) -> Result<String> {
        let id = ObjectId::new().to_hex();
        let full_path = format!("{}/{}", collection, id);
        self.documents
            .insert_one(Self::envelope(&full_path, collection, data))
            .await?;
        tracing::info!("Added document {}", full_path);
        Ok(id)
    }

    async fn update_document(&self, path: &str, partial: Document) -> Result<()> {
        check_field_names(&partial)?;

        let mut set = Document::new();
        for (key, value) in partial {
            set.insert(format!("data.{}", key), value);
        }

        let result = self
            .documents
            .update_one(doc! { "_id": path }, doc! { "$set": set })
            .await?;
        if result.matched_count == 0 {
            return Err(AppError::not_found(path));
        }
        tracing::info!("Updated document {}", path);
        Ok(())
    }

    async fn delete_document(&self, path: &str) -> Result<()> {
        self.documents.delete_one(doc! { "_id": path }).await?;
        tracing::info!("Deleted document {}", path);
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

fn envelope_data(envelope: &Document) -> Result<Document> {
    envelope
        .get_document("data")
        .cloned()
        .map_err(|e| AppError::store(format!("malformed document envelope: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_data_requires_a_data_document() {
        let envelope = doc! { "_id": "grounds/g1", "collection": "grounds", "data": { "name": "North" } };
        assert_eq!(envelope_data(&envelope).unwrap(), doc! { "name": "North" });

        let missing = doc! { "_id": "grounds/g1", "collection": "grounds" };
        assert!(matches!(envelope_data(&missing), Err(AppError::StoreError(_))));

        let wrong_type = doc! { "_id": "grounds/g1", "collection": "grounds", "data": "oops" };
        assert!(matches!(envelope_data(&wrong_type), Err(AppError::StoreError(_))));
    }
}
