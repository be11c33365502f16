use std::collections::HashMap;

use serde::Serialize;

pub(crate) mod certificate;
pub(crate) mod comment;
pub(crate) mod content;
pub(crate) mod course;
pub(crate) mod enrollment;
pub(crate) mod grade;
pub(crate) mod settings;

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    pub(crate) service: String,
    pub(crate) status: String,
    pub(crate) components: HashMap<String, String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RootResponse {
    pub(crate) message: String,
    pub(crate) version: String,
    pub(crate) api_prefix: String,
}
