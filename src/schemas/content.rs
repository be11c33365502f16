use serde::{Deserialize, Serialize};

use crate::domain::models::{Exercise, Image, Pdf, Video};
use crate::domain::types::QuestionKind;

/// Everything under one module, each slice ordered by `order`.
#[derive(Debug, Serialize)]
pub(crate) struct ModuleContents {
    pub(crate) videos: Vec<Video>,
    pub(crate) pdfs: Vec<Pdf>,
    pub(crate) images: Vec<Image>,
    pub(crate) exercises: Vec<Exercise>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideoCreate {
    pub(crate) module_id: String,
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
    pub(crate) url: String,
    pub(crate) duration_minutes: u32,
    pub(crate) order: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideoUpdate {
    #[serde(default)]
    pub(crate) title: Option<String>,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default)]
    pub(crate) url: Option<String>,
    #[serde(default)]
    pub(crate) duration_minutes: Option<u32>,
    #[serde(default)]
    pub(crate) order: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PdfCreate {
    pub(crate) module_id: String,
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
    pub(crate) file_name: String,
    pub(crate) file_size: u64,
    pub(crate) order: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PdfUpdate {
    #[serde(default)]
    pub(crate) title: Option<String>,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default)]
    pub(crate) file_name: Option<String>,
    #[serde(default)]
    pub(crate) file_size: Option<u64>,
    #[serde(default)]
    pub(crate) order: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImageCreate {
    pub(crate) module_id: String,
    pub(crate) title: String,
    pub(crate) url: String,
    #[serde(default)]
    pub(crate) caption: Option<String>,
    pub(crate) order: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionCreate {
    /// Preserved when supplied so edits keep answer keys stable.
    #[serde(default)]
    pub(crate) id: Option<String>,
    pub(crate) kind: QuestionKind,
    pub(crate) text: String,
    #[serde(default)]
    pub(crate) options: Vec<QuestionOptionCreate>,
    pub(crate) correct_answer: serde_json::Value,
    pub(crate) points: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionOptionCreate {
    pub(crate) id: String,
    pub(crate) text: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExerciseCreate {
    pub(crate) module_id: String,
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
    pub(crate) questions: Vec<QuestionCreate>,
    pub(crate) order: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExerciseUpdate {
    #[serde(default)]
    pub(crate) title: Option<String>,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default)]
    pub(crate) questions: Option<Vec<QuestionCreate>>,
    #[serde(default)]
    pub(crate) order: Option<u32>,
}
