use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct SettingsUpdate {
    #[serde(default)]
    pub(crate) professor_name: Option<String>,
    #[serde(default)]
    pub(crate) professor_title: Option<String>,
    #[serde(default)]
    pub(crate) institution_name: Option<String>,
    #[serde(default)]
    pub(crate) course_name: Option<String>,
    #[serde(default)]
    pub(crate) certificate_header: Option<String>,
    #[serde(default)]
    pub(crate) certificate_body: Option<String>,
}
