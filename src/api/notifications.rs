use axum::{routing::get, routing::post, Json, Router};

use crate::api::errors::ApiError;
use crate::api::guards::CurrentUser;
use crate::core::state::AppState;
use crate::domain::models::Notification;
use crate::engine::queries;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_unread))
        .route("/:notification_id/read", post(mark_read))
}

async fn list_unread(
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let snapshot = state.engine().snapshot().await;
    Ok(Json(queries::unread_notifications(&snapshot, &user.id)))
}

async fn mark_read(
    axum::extract::Path(notification_id): axum::extract::Path<String>,
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
) -> Result<Json<Notification>, ApiError> {
    let notification =
        state.engine().mark_notification_read(&user.id, &notification_id).await?;
    Ok(Json(notification))
}
