use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::models::Comment;
use crate::domain::types::{Collection, ContentKind, NotificationKind};
use crate::engine::catalog::require_text;
use crate::engine::{Engine, EngineError};
use crate::schemas::comment::{CommentCreate, CommentUpdate};
use crate::store::Snapshot;

impl Engine {
    /// New comments always start unpinned and unresolved. A reply to someone
    /// else's comment notifies the parent's author.
    pub(crate) async fn add_comment(
        &self,
        author_id: &str,
        author_name: &str,
        payload: CommentCreate,
    ) -> Result<Comment, EngineError> {
        let text = require_text("text", &payload.text)?;

        let mut snapshot = self.snapshot.write().await;
        let course_id = owning_course(&snapshot, &payload.content_id, payload.content_type)?;

        let parent_author = match &payload.parent_id {
            Some(parent_id) => {
                let parent = snapshot
                    .comments
                    .iter()
                    .find(|row| row.id == *parent_id)
                    .ok_or_else(|| EngineError::not_found("comment", parent_id.clone()))?;
                if parent.parent_id.is_some() {
                    return Err(EngineError::validation("replies to replies are not supported"));
                }
                Some(parent.author_id.clone())
            }
            None => None,
        };

        let comment = Comment {
            id: Uuid::new_v4().to_string(),
            content_id: payload.content_id,
            content_type: payload.content_type,
            course_id,
            author_id: author_id.to_string(),
            author_name: author_name.to_string(),
            text,
            parent_id: payload.parent_id,
            is_pinned: false,
            is_resolved: false,
            created_at: OffsetDateTime::now_utc(),
            updated_at: None,
        };
        self.persist(Collection::Comments, &comment.id, &comment).await?;
        snapshot.comments.push(comment.clone());

        if let Some(parent_author) = parent_author {
            if parent_author != author_id {
                let message = format!("{author_name} respondeu ao seu comentário");
                self.push_notification(&mut snapshot, &parent_author, NotificationKind::Reply, message)
                    .await?;
            }
        }

        Ok(comment)
    }

    pub(crate) async fn update_comment(
        &self,
        comment_id: &str,
        patch: CommentUpdate,
    ) -> Result<Comment, EngineError> {
        let text = require_text("text", &patch.text)?;
        let mut snapshot = self.snapshot.write().await;
        let index = snapshot
            .comments
            .iter()
            .position(|row| row.id == comment_id)
            .ok_or_else(|| EngineError::not_found("comment", comment_id))?;

        let mut comment = snapshot.comments[index].clone();
        comment.text = text;
        comment.updated_at = Some(OffsetDateTime::now_utc());

        self.persist(Collection::Comments, comment_id, &comment).await?;
        snapshot.comments[index] = comment.clone();
        Ok(comment)
    }

    /// Deleting a top-level comment takes its replies with it.
    pub(crate) async fn delete_comment(&self, comment_id: &str) -> Result<(), EngineError> {
        let mut snapshot = self.snapshot.write().await;
        if !snapshot.comments.iter().any(|row| row.id == comment_id) {
            return Err(EngineError::not_found("comment", comment_id));
        }

        let reply_ids: Vec<String> = snapshot
            .comments
            .iter()
            .filter(|row| row.parent_id.as_deref() == Some(comment_id))
            .map(|row| row.id.clone())
            .collect();
        for reply_id in &reply_ids {
            self.discard(Collection::Comments, reply_id).await?;
        }
        self.discard(Collection::Comments, comment_id).await?;

        snapshot
            .comments
            .retain(|row| row.id != comment_id && row.parent_id.as_deref() != Some(comment_id));
        Ok(())
    }

    pub(crate) async fn pin_comment(
        &self,
        comment_id: &str,
        is_pinned: bool,
    ) -> Result<Comment, EngineError> {
        self.set_comment_flag(comment_id, |comment| comment.is_pinned = is_pinned).await
    }

    pub(crate) async fn resolve_comment(
        &self,
        comment_id: &str,
        is_resolved: bool,
    ) -> Result<Comment, EngineError> {
        self.set_comment_flag(comment_id, |comment| comment.is_resolved = is_resolved).await
    }

    async fn set_comment_flag<F>(&self, comment_id: &str, apply: F) -> Result<Comment, EngineError>
    where
        F: FnOnce(&mut Comment),
    {
        let mut snapshot = self.snapshot.write().await;
        let index = snapshot
            .comments
            .iter()
            .position(|row| row.id == comment_id)
            .ok_or_else(|| EngineError::not_found("comment", comment_id))?;

        let mut comment = snapshot.comments[index].clone();
        apply(&mut comment);
        comment.updated_at = Some(OffsetDateTime::now_utc());

        self.persist(Collection::Comments, comment_id, &comment).await?;
        snapshot.comments[index] = comment.clone();
        Ok(comment)
    }
}

fn owning_course(
    snapshot: &Snapshot,
    content_id: &str,
    content_type: ContentKind,
) -> Result<String, EngineError> {
    let course_id = match content_type {
        ContentKind::Video => snapshot
            .videos
            .iter()
            .find(|row| row.id == content_id)
            .map(|row| row.course_id.clone()),
        ContentKind::Pdf => {
            snapshot.pdfs.iter().find(|row| row.id == content_id).map(|row| row.course_id.clone())
        }
        ContentKind::Image => {
            snapshot.images.iter().find(|row| row.id == content_id).map(|row| row.course_id.clone())
        }
        ContentKind::Exercise => snapshot
            .exercises
            .iter()
            .find(|row| row.id == content_id)
            .map(|row| row.course_id.clone()),
    };
    course_id.ok_or_else(|| EngineError::not_found("content item", content_id))
}
