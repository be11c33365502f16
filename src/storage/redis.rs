use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::StreamExt;
use redis::aio::ConnectionManager;
use redis::{cmd, Client, RedisError};
use serde_json::Value;
use tokio::sync::{mpsc, RwLock};

use crate::domain::types::Collection;
use crate::storage::{StorageBackend, StorageError};

const KEY_PREFIX: &str = "manguezal";
const CHANGES_CHANNEL: &str = "manguezal:changes";

/// Remote-durable backend: one hash per collection, field = document id,
/// value = JSON document. Every write publishes the collection name on a
/// pub/sub channel so other sessions can reload that slice. Last writer wins
/// at document granularity; there is no client-side merge.
pub(crate) struct RedisStore {
    url: String,
    manager: Arc<RwLock<Option<ConnectionManager>>>,
}

impl RedisStore {
    pub(crate) fn new(url: String) -> Self {
        Self { url, manager: Arc::new(RwLock::new(None)) }
    }

    pub(crate) async fn connect(&self) -> Result<(), RedisError> {
        let client = Client::open(self.url.clone())?;
        let manager = ConnectionManager::new(client).await?;
        let mut guard = self.manager.write().await;
        *guard = Some(manager);
        Ok(())
    }

    async fn connection(&self) -> Result<ConnectionManager, StorageError> {
        let guard = self.manager.read().await;
        guard.clone().ok_or_else(|| {
            StorageError::Redis(RedisError::from((
                redis::ErrorKind::IoError,
                "redis storage is not connected",
            )))
        })
    }

    fn key(collection: Collection) -> String {
        format!("{KEY_PREFIX}:{}", collection.name())
    }

    async fn publish_change(&self, collection: Collection) {
        // Fire-and-forget: a lost notification only delays convergence
        // until the next full reload.
        let Ok(mut connection) = self.connection().await else {
            return;
        };
        let result = cmd("PUBLISH")
            .arg(CHANGES_CHANNEL)
            .arg(collection.name())
            .query_async::<_, i64>(&mut connection)
            .await;
        if let Err(err) = result {
            tracing::warn!(collection = %collection, error = %err, "Failed to publish change event");
        }
    }
}

#[async_trait]
impl StorageBackend for RedisStore {
    async fn load_collection(&self, collection: Collection) -> Result<Vec<Value>, StorageError> {
        let mut connection = self.connection().await?;
        let rows: HashMap<String, String> = cmd("HGETALL")
            .arg(Self::key(collection))
            .query_async(&mut connection)
            .await
            .map_err(StorageError::Redis)?;

        Ok(rows
            .into_values()
            .filter_map(|raw| match serde_json::from_str(&raw) {
                Ok(value) => Some(value),
                Err(err) => {
                    tracing::warn!(collection = %collection, error = %err, "Dropping unparseable document");
                    None
                }
            })
            .collect())
    }

    async fn put(
        &self,
        collection: Collection,
        id: &str,
        record: Value,
    ) -> Result<(), StorageError> {
        let mut connection = self.connection().await?;
        let payload = serde_json::to_string(&record)?;
        cmd("HSET")
            .arg(Self::key(collection))
            .arg(id)
            .arg(payload)
            .query_async::<_, ()>(&mut connection)
            .await
            .map_err(StorageError::Redis)?;
        self.publish_change(collection).await;
        Ok(())
    }

    async fn remove(&self, collection: Collection, id: &str) -> Result<(), StorageError> {
        let mut connection = self.connection().await?;
        cmd("HDEL")
            .arg(Self::key(collection))
            .arg(id)
            .query_async::<_, ()>(&mut connection)
            .await
            .map_err(StorageError::Redis)?;
        self.publish_change(collection).await;
        Ok(())
    }

    async fn subscribe(&self) -> Result<Option<mpsc::Receiver<Collection>>, StorageError> {
        let client = Client::open(self.url.clone()).map_err(StorageError::Redis)?;
        let mut pubsub = client.get_async_pubsub().await.map_err(StorageError::Redis)?;
        pubsub.subscribe(CHANGES_CHANNEL).await.map_err(StorageError::Redis)?;

        let (tx, rx) = mpsc::channel(32);
        tokio::spawn(async move {
            let mut stream = pubsub.on_message();
            while let Some(message) = stream.next().await {
                let Ok(payload) = message.get_payload::<String>() else {
                    continue;
                };
                let Some(collection) = Collection::parse(&payload) else {
                    tracing::warn!(payload = %payload, "Unknown collection in change event");
                    continue;
                };
                if tx.send(collection).await.is_err() {
                    break;
                }
            }
            tracing::info!("Redis change feed closed");
        });

        Ok(Some(rx))
    }
}
