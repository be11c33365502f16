use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::types::{ContentKind, EnrollmentStatus, NotificationKind, QuestionKind};

/// Persisted record shapes. These are the effective wire format: every entity
/// is a flat JSON document keyed by its `id`, one collection per type.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Course {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) thumbnail: Option<String>,
    pub(crate) duration_hours: u32,
    /// Pass threshold in percent for certificate eligibility.
    pub(crate) min_grade: u32,
    pub(crate) owner_id: String,
    pub(crate) professor_name: Option<String>,
    pub(crate) is_active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub(crate) updated_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Module {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) order: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub(crate) updated_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Video {
    pub(crate) id: String,
    pub(crate) module_id: String,
    pub(crate) course_id: String,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) url: String,
    pub(crate) duration_minutes: u32,
    pub(crate) order: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub(crate) updated_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Pdf {
    pub(crate) id: String,
    pub(crate) module_id: String,
    pub(crate) course_id: String,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) file_name: String,
    pub(crate) file_size: u64,
    pub(crate) order: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub(crate) updated_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Image {
    pub(crate) id: String,
    pub(crate) module_id: String,
    pub(crate) course_id: String,
    pub(crate) title: String,
    pub(crate) url: String,
    pub(crate) caption: Option<String>,
    pub(crate) order: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct QuestionOption {
    pub(crate) id: String,
    pub(crate) text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Question {
    pub(crate) id: String,
    pub(crate) kind: QuestionKind,
    pub(crate) text: String,
    /// Empty for true/false questions.
    #[serde(default)]
    pub(crate) options: Vec<QuestionOption>,
    pub(crate) correct_answer: serde_json::Value,
    pub(crate) points: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Exercise {
    pub(crate) id: String,
    pub(crate) module_id: String,
    pub(crate) course_id: String,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) questions: Vec<Question>,
    pub(crate) total_points: u32,
    pub(crate) order: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub(crate) updated_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Comment {
    pub(crate) id: String,
    pub(crate) content_id: String,
    pub(crate) content_type: ContentKind,
    pub(crate) course_id: String,
    pub(crate) author_id: String,
    pub(crate) author_name: String,
    pub(crate) text: String,
    /// Replies carry the top-level comment id; nesting is one level deep.
    #[serde(default)]
    pub(crate) parent_id: Option<String>,
    pub(crate) is_pinned: bool,
    pub(crate) is_resolved: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub(crate) updated_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Enrollment {
    pub(crate) id: String,
    pub(crate) user_id: String,
    pub(crate) course_id: String,
    pub(crate) status: EnrollmentStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) enrolled_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Progress {
    pub(crate) id: String,
    pub(crate) user_id: String,
    pub(crate) course_id: String,
    pub(crate) module_id: String,
    pub(crate) content_id: String,
    pub(crate) content_type: ContentKind,
    pub(crate) completed: bool,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub(crate) completed_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Grade {
    pub(crate) id: String,
    pub(crate) user_id: String,
    pub(crate) exercise_id: String,
    pub(crate) course_id: String,
    pub(crate) module_id: String,
    /// question id -> submitted answer, kept verbatim for review screens.
    pub(crate) answers: HashMap<String, serde_json::Value>,
    pub(crate) score: u32,
    pub(crate) total_points: u32,
    pub(crate) percentage: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Certificate {
    pub(crate) id: String,
    pub(crate) user_id: String,
    pub(crate) course_id: String,
    /// Title snapshot taken at issuance; course renames do not rewrite it.
    pub(crate) course_name: String,
    pub(crate) validation_code: String,
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) issued_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Notification {
    pub(crate) id: String,
    pub(crate) user_id: String,
    pub(crate) kind: NotificationKind,
    pub(crate) message: String,
    pub(crate) is_read: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) created_at: OffsetDateTime,
}

pub(crate) const SETTINGS_DOC_ID: &str = "general";

/// Singleton document holding professor display info and certificate
/// template strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PortalSettings {
    #[serde(default = "default_settings_id")]
    pub(crate) id: String,
    #[serde(default)]
    pub(crate) professor_name: String,
    #[serde(default)]
    pub(crate) professor_title: String,
    #[serde(default)]
    pub(crate) institution_name: String,
    #[serde(default)]
    pub(crate) course_name: String,
    #[serde(default)]
    pub(crate) certificate_header: String,
    #[serde(default)]
    pub(crate) certificate_body: String,
}

fn default_settings_id() -> String {
    SETTINGS_DOC_ID.to_string()
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            id: default_settings_id(),
            professor_name: String::new(),
            professor_title: String::new(),
            institution_name: String::new(),
            course_name: String::new(),
            certificate_header: String::new(),
            certificate_body: String::new(),
        }
    }
}
