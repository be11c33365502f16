use axum::{routing::get, Json, Router};

use crate::api::errors::ApiError;
use crate::api::guards::{CurrentAdmin, CurrentUser};
use crate::core::state::AppState;
use crate::domain::models::{Course, Module};
use crate::engine::queries;
use crate::schemas::course::{CourseCreate, CourseUpdate};
use crate::schemas::enrollment::ProgressSummary;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route("/:course_id", axum::routing::patch(update_course).delete(delete_course))
        .route("/:course_id/modules", get(list_modules))
        .route("/:course_id/progress", get(progress_summary))
}

async fn list_courses(
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
) -> Result<Json<Vec<Course>>, ApiError> {
    let snapshot = state.engine().snapshot().await;
    let courses = snapshot
        .courses
        .iter()
        .filter(|course| user.is_admin() || course.is_active)
        .cloned()
        .collect();
    Ok(Json(courses))
}

async fn create_course(
    CurrentAdmin(admin): CurrentAdmin,
    state: axum::extract::State<AppState>,
    Json(payload): Json<CourseCreate>,
) -> Result<(axum::http::StatusCode, Json<Course>), ApiError> {
    let course = state.engine().add_course(&admin.id, payload).await?;
    Ok((axum::http::StatusCode::CREATED, Json(course)))
}

async fn update_course(
    axum::extract::Path(course_id): axum::extract::Path<String>,
    CurrentAdmin(_admin): CurrentAdmin,
    state: axum::extract::State<AppState>,
    Json(payload): Json<CourseUpdate>,
) -> Result<Json<Course>, ApiError> {
    let course = state.engine().update_course(&course_id, payload).await?;
    Ok(Json(course))
}

async fn delete_course(
    axum::extract::Path(course_id): axum::extract::Path<String>,
    CurrentAdmin(admin): CurrentAdmin,
    state: axum::extract::State<AppState>,
) -> Result<axum::http::StatusCode, ApiError> {
    state.engine().delete_course(&course_id).await?;

    tracing::info!(
        admin_id = %admin.id,
        course_id = %course_id,
        action = "course_delete",
        "Admin deleted course"
    );

    Ok(axum::http::StatusCode::NO_CONTENT)
}

async fn list_modules(
    axum::extract::Path(course_id): axum::extract::Path<String>,
    CurrentUser(_user): CurrentUser,
    state: axum::extract::State<AppState>,
) -> Result<Json<Vec<Module>>, ApiError> {
    let snapshot = state.engine().snapshot().await;
    if !snapshot.courses.iter().any(|course| course.id == course_id) {
        return Err(ApiError::NotFound(format!("course not found: {course_id}")));
    }
    Ok(Json(queries::modules_by_course(&snapshot, &course_id)))
}

async fn progress_summary(
    axum::extract::Path(course_id): axum::extract::Path<String>,
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
) -> Result<Json<ProgressSummary>, ApiError> {
    let snapshot = state.engine().snapshot().await;
    if !snapshot.courses.iter().any(|course| course.id == course_id) {
        return Err(ApiError::NotFound(format!("course not found: {course_id}")));
    }
    Ok(Json(ProgressSummary {
        course_id: course_id.clone(),
        progress_percent: queries::course_progress(&snapshot, &user.id, &course_id),
        average_grade: queries::course_average_grade(&snapshot, &user.id, &course_id),
    }))
}

#[cfg(test)]
mod tests;
