use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::models::{
    Certificate, Comment, Course, Enrollment, Exercise, Grade, Image, Module, Notification, Pdf,
    PortalSettings, Progress, Video, SETTINGS_DOC_ID,
};
use crate::domain::types::Collection;

pub(crate) mod seed;

/// In-memory snapshot of every collection; the single source of truth for
/// one session. Queries read it, mutations replace rows through the engine.
#[derive(Debug, Default, Clone)]
pub(crate) struct Snapshot {
    pub(crate) courses: Vec<Course>,
    pub(crate) modules: Vec<Module>,
    pub(crate) videos: Vec<Video>,
    pub(crate) pdfs: Vec<Pdf>,
    pub(crate) images: Vec<Image>,
    pub(crate) exercises: Vec<Exercise>,
    pub(crate) comments: Vec<Comment>,
    pub(crate) enrollments: Vec<Enrollment>,
    pub(crate) grades: Vec<Grade>,
    pub(crate) progress: Vec<Progress>,
    pub(crate) notifications: Vec<Notification>,
    pub(crate) certificates: Vec<Certificate>,
    pub(crate) settings: PortalSettings,
}

impl Snapshot {
    /// Replaces one collection slice wholesale from raw persisted documents.
    /// Rows that no longer decode are dropped with a warning instead of
    /// failing the whole load.
    pub(crate) fn replace_raw(&mut self, collection: Collection, rows: Vec<Value>) {
        match collection {
            Collection::Courses => self.courses = decode_rows(collection, rows),
            Collection::Modules => self.modules = decode_rows(collection, rows),
            Collection::Videos => self.videos = decode_rows(collection, rows),
            Collection::Pdfs => self.pdfs = decode_rows(collection, rows),
            Collection::Images => self.images = decode_rows(collection, rows),
            Collection::Exercises => self.exercises = decode_rows(collection, rows),
            Collection::Comments => self.comments = decode_rows(collection, rows),
            Collection::Enrollments => self.enrollments = decode_rows(collection, rows),
            Collection::Grades => self.grades = decode_rows(collection, rows),
            Collection::Progress => self.progress = decode_rows(collection, rows),
            Collection::Notifications => self.notifications = decode_rows(collection, rows),
            Collection::Certificates => self.certificates = decode_rows(collection, rows),
            Collection::Settings => {
                let docs: Vec<PortalSettings> = decode_rows(collection, rows);
                self.settings = docs
                    .into_iter()
                    .find(|doc| doc.id == SETTINGS_DOC_ID)
                    .unwrap_or_default();
            }
        }
    }
}

fn decode_rows<T: DeserializeOwned>(collection: Collection, rows: Vec<Value>) -> Vec<T> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value(row) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(collection = %collection, error = %err, "Dropping undecodable record");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Snapshot;
    use crate::domain::types::Collection;

    #[test]
    fn replace_raw_skips_undecodable_rows() {
        let mut snapshot = Snapshot::default();
        snapshot.replace_raw(
            Collection::Notifications,
            vec![
                json!({
                    "id": "n1",
                    "user_id": "student-1",
                    "kind": "system",
                    "message": "hello",
                    "is_read": false,
                    "created_at": "2026-01-02T10:20:30Z"
                }),
                json!({"id": "broken"}),
            ],
        );
        assert_eq!(snapshot.notifications.len(), 1);
        assert_eq!(snapshot.notifications[0].id, "n1");
    }

    #[test]
    fn settings_slice_picks_the_general_document() {
        let mut snapshot = Snapshot::default();
        snapshot.replace_raw(
            Collection::Settings,
            vec![
                json!({"id": "stray", "professor_name": "Nobody"}),
                json!({"id": "general", "professor_name": "Professor Responsável"}),
            ],
        );
        assert_eq!(snapshot.settings.professor_name, "Professor Responsável");
    }
}
