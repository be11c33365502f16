use axum::{routing::get, Json, Router};

use crate::api::errors::ApiError;
use crate::api::guards::CurrentUser;
use crate::core::state::AppState;
use crate::domain::models::Grade;
use crate::engine::queries;
use crate::schemas::grade::GradeSubmit;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/", get(list_grades).post(submit_grade))
}

async fn list_grades(
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
) -> Result<Json<Vec<Grade>>, ApiError> {
    let snapshot = state.engine().snapshot().await;
    Ok(Json(queries::grades_for(&snapshot, &user.id)))
}

async fn submit_grade(
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
    Json(payload): Json<GradeSubmit>,
) -> Result<(axum::http::StatusCode, Json<Grade>), ApiError> {
    let grade = state.engine().submit_grade(&user.id, payload).await?;
    Ok((axum::http::StatusCode::CREATED, Json(grade)))
}
