use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::core::config::{PersistenceBackend, Settings};
use crate::domain::types::Collection;
use crate::store::Snapshot;

pub(crate) mod local;
pub(crate) mod redis;

#[derive(Debug, Error)]
pub(crate) enum StorageError {
    #[error("storage i/o failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage codec failure: {0}")]
    Codec(#[from] serde_json::Error),
    #[error("redis failure: {0}")]
    Redis(#[from] ::redis::RedisError),
}

/// Persistence port: key-addressed documents grouped into one collection per
/// entity type. Two interchangeable backends, selected at composition time.
#[async_trait]
pub(crate) trait StorageBackend: Send + Sync {
    async fn load_collection(&self, collection: Collection) -> Result<Vec<Value>, StorageError>;

    async fn put(
        &self,
        collection: Collection,
        id: &str,
        record: Value,
    ) -> Result<(), StorageError>;

    async fn remove(&self, collection: Collection, id: &str) -> Result<(), StorageError>;

    /// Change feed naming collections touched by other sessions. Backends
    /// without cross-session sync return `None`.
    async fn subscribe(&self) -> Result<Option<mpsc::Receiver<Collection>>, StorageError>;

    async fn load(&self) -> Result<Snapshot, StorageError> {
        let mut snapshot = Snapshot::default();
        for collection in Collection::ALL {
            let rows = self.load_collection(*collection).await?;
            snapshot.replace_raw(*collection, rows);
        }
        Ok(snapshot)
    }
}

pub(crate) async fn from_settings(
    settings: &Settings,
) -> Result<Arc<dyn StorageBackend>, StorageError> {
    match settings.persistence().backend {
        PersistenceBackend::Local => {
            let store = local::LocalStore::new(settings.persistence().data_dir.clone());
            store.ensure_dir().await?;
            tracing::info!(data_dir = %settings.persistence().data_dir.display(), "Using local storage backend");
            Ok(Arc::new(store))
        }
        PersistenceBackend::Redis => {
            let store = redis::RedisStore::new(settings.redis().redis_url());
            store.connect().await?;
            tracing::info!("Using redis storage backend");
            Ok(Arc::new(store))
        }
    }
}
