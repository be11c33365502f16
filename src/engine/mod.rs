use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::{RwLock, RwLockReadGuard};

use crate::domain::models::{PortalSettings, SETTINGS_DOC_ID};
use crate::domain::types::Collection;
use crate::schemas::settings::SettingsUpdate;
use crate::storage::{StorageBackend, StorageError};
use crate::store::{seed, Snapshot};

pub(crate) mod catalog;
pub(crate) mod certificates;
pub(crate) mod comments;
pub(crate) mod content;
pub(crate) mod enrollment;
pub(crate) mod grading;
pub(crate) mod notifications;
pub(crate) mod queries;

#[derive(Debug, Error)]
pub(crate) enum EngineError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("record encoding failure: {0}")]
    Codec(#[from] serde_json::Error),
}

impl EngineError {
    pub(crate) fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound { entity, id: id.into() }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Owns the current snapshot and the storage port. Every mutation funnels
/// through here under the write lock, so writes are serialized. Storage is
/// written first; a failed write leaves the in-memory snapshot untouched.
pub(crate) struct Engine {
    snapshot: RwLock<Snapshot>,
    storage: Arc<dyn StorageBackend>,
}

impl Engine {
    pub(crate) async fn bootstrap(storage: Arc<dyn StorageBackend>) -> Result<Self, EngineError> {
        let snapshot = storage.load().await?;
        tracing::info!(
            courses = snapshot.courses.len(),
            enrollments = snapshot.enrollments.len(),
            "Snapshot loaded"
        );
        Ok(Self { snapshot: RwLock::new(snapshot), storage })
    }

    pub(crate) async fn snapshot(&self) -> RwLockReadGuard<'_, Snapshot> {
        self.snapshot.read().await
    }

    /// Round-trips a read through the storage port, for health reporting.
    pub(crate) async fn probe_storage(&self) -> Result<(), StorageError> {
        self.storage.load_collection(Collection::Settings).await.map(|_| ())
    }

    /// Starts the change-feed listener for backends that have one. Events
    /// replace the named collection slice wholesale; callers never await
    /// convergence.
    pub(crate) async fn start_sync(self: &Arc<Self>) -> Result<(), EngineError> {
        let Some(mut changes) = self.storage.subscribe().await? else {
            return Ok(());
        };

        let engine = Arc::clone(self);
        tokio::spawn(async move {
            while let Some(collection) = changes.recv().await {
                match engine.storage.load_collection(collection).await {
                    Ok(rows) => {
                        let mut snapshot = engine.snapshot.write().await;
                        snapshot.replace_raw(collection, rows);
                    }
                    Err(err) => {
                        tracing::warn!(collection = %collection, error = %err, "Failed to refresh collection");
                    }
                }
            }
        });
        Ok(())
    }

    pub(crate) async fn update_settings(
        &self,
        patch: SettingsUpdate,
    ) -> Result<PortalSettings, EngineError> {
        let mut snapshot = self.snapshot.write().await;
        let mut settings = snapshot.settings.clone();
        if let Some(professor_name) = patch.professor_name {
            settings.professor_name = professor_name;
        }
        if let Some(professor_title) = patch.professor_title {
            settings.professor_title = professor_title;
        }
        if let Some(institution_name) = patch.institution_name {
            settings.institution_name = institution_name;
        }
        if let Some(course_name) = patch.course_name {
            settings.course_name = course_name;
        }
        if let Some(certificate_header) = patch.certificate_header {
            settings.certificate_header = certificate_header;
        }
        if let Some(certificate_body) = patch.certificate_body {
            settings.certificate_body = certificate_body;
        }
        settings.id = SETTINGS_DOC_ID.to_string();

        self.persist(Collection::Settings, SETTINGS_DOC_ID, &settings).await?;
        snapshot.settings = settings.clone();
        Ok(settings)
    }

    /// Applies the demonstration dataset. Fixed document ids make this an
    /// upsert, so repeated application cannot duplicate rows.
    pub(crate) async fn seed_demo_data(&self, owner_id: &str) -> Result<(), EngineError> {
        let data = seed::demo_data(owner_id);
        let mut snapshot = self.snapshot.write().await;

        for course in &data.courses {
            self.persist(Collection::Courses, &course.id, course).await?;
            upsert_by_id(&mut snapshot.courses, course.clone(), |row| row.id.clone());
        }
        for module in &data.modules {
            self.persist(Collection::Modules, &module.id, module).await?;
            upsert_by_id(&mut snapshot.modules, module.clone(), |row| row.id.clone());
        }
        for video in &data.videos {
            self.persist(Collection::Videos, &video.id, video).await?;
            upsert_by_id(&mut snapshot.videos, video.clone(), |row| row.id.clone());
        }
        for pdf in &data.pdfs {
            self.persist(Collection::Pdfs, &pdf.id, pdf).await?;
            upsert_by_id(&mut snapshot.pdfs, pdf.clone(), |row| row.id.clone());
        }
        for exercise in &data.exercises {
            self.persist(Collection::Exercises, &exercise.id, exercise).await?;
            upsert_by_id(&mut snapshot.exercises, exercise.clone(), |row| row.id.clone());
        }
        self.persist(Collection::Settings, SETTINGS_DOC_ID, &data.settings).await?;
        snapshot.settings = data.settings;

        tracing::info!("Demonstration dataset applied");
        Ok(())
    }

    /// Seeds at boot when the catalog is empty.
    pub(crate) async fn seed_if_empty(&self, owner_id: &str) -> Result<bool, EngineError> {
        let empty = { self.snapshot.read().await.courses.is_empty() };
        if !empty {
            return Ok(false);
        }
        self.seed_demo_data(owner_id).await?;
        Ok(true)
    }

    pub(super) async fn persist<T: Serialize>(
        &self,
        collection: Collection,
        id: &str,
        record: &T,
    ) -> Result<(), EngineError> {
        let value = serde_json::to_value(record)?;
        self.storage.put(collection, id, value).await?;
        Ok(())
    }

    pub(super) async fn discard(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<(), EngineError> {
        self.storage.remove(collection, id).await?;
        Ok(())
    }
}

fn upsert_by_id<T, F>(rows: &mut Vec<T>, record: T, id_of: F)
where
    F: Fn(&T) -> String,
{
    let id = id_of(&record);
    match rows.iter_mut().find(|row| id_of(row) == id) {
        Some(existing) => *existing = record,
        None => rows.push(record),
    }
}
