use serde::Deserialize;

use crate::domain::types::ContentKind;

#[derive(Debug, Deserialize)]
pub(crate) struct CommentCreate {
    pub(crate) content_id: String,
    pub(crate) content_type: ContentKind,
    pub(crate) text: String,
    #[serde(default)]
    pub(crate) parent_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentQuery {
    pub(crate) content_id: String,
    pub(crate) content_type: ContentKind,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentUpdate {
    pub(crate) text: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PinRequest {
    pub(crate) is_pinned: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResolveRequest {
    pub(crate) is_resolved: bool,
}
