use axum::{routing::get, routing::post, Json, Router};

use crate::api::errors::ApiError;
use crate::api::guards::CurrentUser;
use crate::core::state::AppState;
use crate::domain::models::{Enrollment, Progress};
use crate::engine::queries;
use crate::schemas::enrollment::{CompleteRequest, EnrollRequest};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_enrollments).post(enroll))
        .route("/progress", get(list_progress))
        .route("/complete", post(mark_completed))
}

async fn list_enrollments(
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
) -> Result<Json<Vec<Enrollment>>, ApiError> {
    let snapshot = state.engine().snapshot().await;
    Ok(Json(queries::enrollments_for(&snapshot, &user.id)))
}

async fn enroll(
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
    Json(payload): Json<EnrollRequest>,
) -> Result<(axum::http::StatusCode, Json<Enrollment>), ApiError> {
    let enrollment = state.engine().enroll_student(&user.id, &payload.course_id).await?;
    Ok((axum::http::StatusCode::CREATED, Json(enrollment)))
}

async fn list_progress(
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
) -> Result<Json<Vec<Progress>>, ApiError> {
    let snapshot = state.engine().snapshot().await;
    let rows =
        snapshot.progress.iter().filter(|row| row.user_id == user.id).cloned().collect::<Vec<_>>();
    Ok(Json(rows))
}

async fn mark_completed(
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
    Json(payload): Json<CompleteRequest>,
) -> Result<Json<Progress>, ApiError> {
    let progress = state.engine().mark_completed(&user.id, &payload.content_id).await?;
    Ok(Json(progress))
}

#[cfg(test)]
mod tests;
