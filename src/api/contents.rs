use axum::{routing::post, Json, Router};

use crate::api::errors::ApiError;
use crate::api::guards::CurrentAdmin;
use crate::core::state::AppState;
use crate::domain::models::{Exercise, Image, Pdf, Video};
use crate::schemas::content::{
    ExerciseCreate, ExerciseUpdate, ImageCreate, PdfCreate, PdfUpdate, VideoCreate, VideoUpdate,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/videos", post(create_video))
        .route("/videos/:video_id", axum::routing::patch(update_video).delete(delete_video))
        .route("/pdfs", post(create_pdf))
        .route("/pdfs/:pdf_id", axum::routing::patch(update_pdf).delete(delete_pdf))
        .route("/images", post(create_image))
        .route("/images/:image_id", axum::routing::delete(delete_image))
        .route("/exercises", post(create_exercise))
        .route(
            "/exercises/:exercise_id",
            axum::routing::patch(update_exercise).delete(delete_exercise),
        )
}

async fn create_video(
    CurrentAdmin(_admin): CurrentAdmin,
    state: axum::extract::State<AppState>,
    Json(payload): Json<VideoCreate>,
) -> Result<(axum::http::StatusCode, Json<Video>), ApiError> {
    let video = state.engine().add_video(payload).await?;
    Ok((axum::http::StatusCode::CREATED, Json(video)))
}

async fn update_video(
    axum::extract::Path(video_id): axum::extract::Path<String>,
    CurrentAdmin(_admin): CurrentAdmin,
    state: axum::extract::State<AppState>,
    Json(payload): Json<VideoUpdate>,
) -> Result<Json<Video>, ApiError> {
    let video = state.engine().update_video(&video_id, payload).await?;
    Ok(Json(video))
}

async fn delete_video(
    axum::extract::Path(video_id): axum::extract::Path<String>,
    CurrentAdmin(_admin): CurrentAdmin,
    state: axum::extract::State<AppState>,
) -> Result<axum::http::StatusCode, ApiError> {
    state.engine().delete_video(&video_id).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

async fn create_pdf(
    CurrentAdmin(_admin): CurrentAdmin,
    state: axum::extract::State<AppState>,
    Json(payload): Json<PdfCreate>,
) -> Result<(axum::http::StatusCode, Json<Pdf>), ApiError> {
    let pdf = state.engine().add_pdf(payload).await?;
    Ok((axum::http::StatusCode::CREATED, Json(pdf)))
}

async fn update_pdf(
    axum::extract::Path(pdf_id): axum::extract::Path<String>,
    CurrentAdmin(_admin): CurrentAdmin,
    state: axum::extract::State<AppState>,
    Json(payload): Json<PdfUpdate>,
) -> Result<Json<Pdf>, ApiError> {
    let pdf = state.engine().update_pdf(&pdf_id, payload).await?;
    Ok(Json(pdf))
}

async fn delete_pdf(
    axum::extract::Path(pdf_id): axum::extract::Path<String>,
    CurrentAdmin(_admin): CurrentAdmin,
    state: axum::extract::State<AppState>,
) -> Result<axum::http::StatusCode, ApiError> {
    state.engine().delete_pdf(&pdf_id).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

async fn create_image(
    CurrentAdmin(_admin): CurrentAdmin,
    state: axum::extract::State<AppState>,
    Json(payload): Json<ImageCreate>,
) -> Result<(axum::http::StatusCode, Json<Image>), ApiError> {
    let image = state.engine().add_image(payload).await?;
    Ok((axum::http::StatusCode::CREATED, Json(image)))
}

async fn delete_image(
    axum::extract::Path(image_id): axum::extract::Path<String>,
    CurrentAdmin(_admin): CurrentAdmin,
    state: axum::extract::State<AppState>,
) -> Result<axum::http::StatusCode, ApiError> {
    state.engine().delete_image(&image_id).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

async fn create_exercise(
    CurrentAdmin(_admin): CurrentAdmin,
    state: axum::extract::State<AppState>,
    Json(payload): Json<ExerciseCreate>,
) -> Result<(axum::http::StatusCode, Json<Exercise>), ApiError> {
    let exercise = state.engine().add_exercise(payload).await?;
    Ok((axum::http::StatusCode::CREATED, Json(exercise)))
}

async fn update_exercise(
    axum::extract::Path(exercise_id): axum::extract::Path<String>,
    CurrentAdmin(_admin): CurrentAdmin,
    state: axum::extract::State<AppState>,
    Json(payload): Json<ExerciseUpdate>,
) -> Result<Json<Exercise>, ApiError> {
    let exercise = state.engine().update_exercise(&exercise_id, payload).await?;
    Ok(Json(exercise))
}

async fn delete_exercise(
    axum::extract::Path(exercise_id): axum::extract::Path<String>,
    CurrentAdmin(_admin): CurrentAdmin,
    state: axum::extract::State<AppState>,
) -> Result<axum::http::StatusCode, ApiError> {
    state.engine().delete_exercise(&exercise_id).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}
