use std::sync::Arc;

use mongodb::{Client, Database};

use crate::config::{AppConfig, StoreBackend};
use crate::errors::{AppError, Result};
use crate::store::{DocumentStore, MemoryStore, MongoStore};

pub async fn get_db_client(database_url: &str, db_name: &str) -> Result<Database> {
    let client = Client::with_uri_str(database_url).await?;
    let db = client.database(db_name);

    // Verify database is reachable by listing collections
    match db.list_collection_names().await {
        Ok(collections) => {
            tracing::info!("Connected to database: {}", db_name);
            tracing::debug!("Collections found: {:?}", collections);
        }
        Err(e) => {
            tracing::warn!("Database '{}' may not exist or is inaccessible: {}", db_name, e);
        }
    }

    Ok(db)
}

/// Builds the document store selected by the configuration.
pub async fn connect_store(config: &AppConfig) -> Result<Arc<dyn DocumentStore>> {
    match config.store_backend {
        StoreBackend::MongoDb => {
            let url = config
                .database_url
                .as_deref()
                .ok_or_else(|| AppError::configuration("DATABASE_URL must be set"))?;
            let db = get_db_client(url, &config.database_name).await?;
            let store = MongoStore::new(db, &config.documents_collection).await?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
