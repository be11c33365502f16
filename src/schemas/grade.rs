use std::collections::HashMap;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct GradeSubmit {
    pub(crate) exercise_id: String,
    #[serde(default)]
    pub(crate) answers: HashMap<String, serde_json::Value>,
    pub(crate) score: u32,
    pub(crate) total_points: u32,
}
