use axum::extract::Query;
use axum::{routing::get, routing::post, Json, Router};

use crate::api::errors::ApiError;
use crate::api::guards::{CurrentAdmin, CurrentUser, Identity};
use crate::core::state::AppState;
use crate::domain::models::Comment;
use crate::engine::queries;
use crate::schemas::comment::{
    CommentCreate, CommentQuery, CommentUpdate, PinRequest, ResolveRequest,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_comments).post(create_comment))
        .route("/:comment_id", axum::routing::patch(update_comment).delete(delete_comment))
        .route("/:comment_id/replies", get(list_replies))
        .route("/:comment_id/pin", post(pin_comment))
        .route("/:comment_id/resolve", post(resolve_comment))
}

async fn list_comments(
    CurrentUser(_user): CurrentUser,
    state: axum::extract::State<AppState>,
    Query(query): Query<CommentQuery>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let snapshot = state.engine().snapshot().await;
    Ok(Json(queries::comments_by_content(&snapshot, &query.content_id, query.content_type)))
}

async fn list_replies(
    axum::extract::Path(comment_id): axum::extract::Path<String>,
    CurrentUser(_user): CurrentUser,
    state: axum::extract::State<AppState>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let snapshot = state.engine().snapshot().await;
    if !snapshot.comments.iter().any(|comment| comment.id == comment_id) {
        return Err(ApiError::NotFound(format!("comment not found: {comment_id}")));
    }
    Ok(Json(queries::comment_replies(&snapshot, &comment_id)))
}

async fn create_comment(
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
    Json(payload): Json<CommentCreate>,
) -> Result<(axum::http::StatusCode, Json<Comment>), ApiError> {
    let comment = state.engine().add_comment(&user.id, &user.name, payload).await?;
    Ok((axum::http::StatusCode::CREATED, Json(comment)))
}

async fn update_comment(
    axum::extract::Path(comment_id): axum::extract::Path<String>,
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
    Json(payload): Json<CommentUpdate>,
) -> Result<Json<Comment>, ApiError> {
    require_author_or_admin(&state, &user, &comment_id).await?;
    let comment = state.engine().update_comment(&comment_id, payload).await?;
    Ok(Json(comment))
}

async fn delete_comment(
    axum::extract::Path(comment_id): axum::extract::Path<String>,
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
) -> Result<axum::http::StatusCode, ApiError> {
    require_author_or_admin(&state, &user, &comment_id).await?;
    state.engine().delete_comment(&comment_id).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

async fn pin_comment(
    axum::extract::Path(comment_id): axum::extract::Path<String>,
    CurrentAdmin(_admin): CurrentAdmin,
    state: axum::extract::State<AppState>,
    Json(payload): Json<PinRequest>,
) -> Result<Json<Comment>, ApiError> {
    let comment = state.engine().pin_comment(&comment_id, payload.is_pinned).await?;
    Ok(Json(comment))
}

async fn resolve_comment(
    axum::extract::Path(comment_id): axum::extract::Path<String>,
    CurrentAdmin(_admin): CurrentAdmin,
    state: axum::extract::State<AppState>,
    Json(payload): Json<ResolveRequest>,
) -> Result<Json<Comment>, ApiError> {
    let comment = state.engine().resolve_comment(&comment_id, payload.is_resolved).await?;
    Ok(Json(comment))
}

/// Comments can be edited by their author or by an admin; everyone else
/// gets a 403 even when the comment exists.
async fn require_author_or_admin(
    state: &AppState,
    user: &Identity,
    comment_id: &str,
) -> Result<(), ApiError> {
    let snapshot = state.engine().snapshot().await;
    let comment = snapshot
        .comments
        .iter()
        .find(|comment| comment.id == comment_id)
        .ok_or_else(|| ApiError::NotFound(format!("comment not found: {comment_id}")))?;

    if user.is_admin() || comment.author_id == user.id {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Only the author or an admin may modify this comment"))
    }
}

#[cfg(test)]
mod tests;
