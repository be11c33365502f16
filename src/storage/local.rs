use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::domain::types::Collection;
use crate::storage::{StorageBackend, StorageError};

const STORAGE_PREFIX: &str = "manguezal_";

/// Local-durable backend: one JSON array file per collection under a data
/// directory. Owned by a single session; no change feed.
pub(crate) struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub(crate) fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub(crate) async fn ensure_dir(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    fn file_path(&self, collection: Collection) -> PathBuf {
        self.root.join(format!("{STORAGE_PREFIX}{}.json", collection.name()))
    }

    async fn read_rows(&self, path: &Path) -> Result<Vec<Value>, StorageError> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn write_rows(&self, path: &Path, rows: &[Value]) -> Result<(), StorageError> {
        // Write-then-rename so a crash mid-write cannot truncate a collection.
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(rows)?).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }
}

fn row_id(row: &Value) -> Option<&str> {
    row.get("id").and_then(Value::as_str)
}

#[async_trait]
impl StorageBackend for LocalStore {
    async fn load_collection(&self, collection: Collection) -> Result<Vec<Value>, StorageError> {
        self.read_rows(&self.file_path(collection)).await
    }

    async fn put(
        &self,
        collection: Collection,
        id: &str,
        record: Value,
    ) -> Result<(), StorageError> {
        let path = self.file_path(collection);
        let mut rows = self.read_rows(&path).await?;
        match rows.iter_mut().find(|row| row_id(row) == Some(id)) {
            Some(existing) => *existing = record,
            None => rows.push(record),
        }
        self.write_rows(&path, &rows).await
    }

    async fn remove(&self, collection: Collection, id: &str) -> Result<(), StorageError> {
        let path = self.file_path(collection);
        let mut rows = self.read_rows(&path).await?;
        rows.retain(|row| row_id(row) != Some(id));
        self.write_rows(&path, &rows).await
    }

    async fn subscribe(&self) -> Result<Option<mpsc::Receiver<Collection>>, StorageError> {
        Ok(None)
    }
}
