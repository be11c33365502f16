use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub(crate) struct EnrollRequest {
    pub(crate) course_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompleteRequest {
    pub(crate) content_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ProgressSummary {
    pub(crate) course_id: String,
    pub(crate) progress_percent: u32,
    pub(crate) average_grade: u32,
}
