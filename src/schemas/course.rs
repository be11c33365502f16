use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct CourseCreate {
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default)]
    pub(crate) thumbnail: Option<String>,
    pub(crate) duration_hours: u32,
    pub(crate) min_grade: u32,
    #[serde(default)]
    pub(crate) professor_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CourseUpdate {
    #[serde(default)]
    pub(crate) title: Option<String>,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default)]
    pub(crate) thumbnail: Option<String>,
    #[serde(default)]
    pub(crate) duration_hours: Option<u32>,
    #[serde(default)]
    pub(crate) min_grade: Option<u32>,
    #[serde(default)]
    pub(crate) professor_name: Option<String>,
    #[serde(default)]
    pub(crate) is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ModuleCreate {
    pub(crate) course_id: String,
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
    pub(crate) order: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ModuleUpdate {
    #[serde(default)]
    pub(crate) title: Option<String>,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default)]
    pub(crate) order: Option<u32>,
}
