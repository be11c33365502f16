use axum::{routing::get, routing::post, Json, Router};

use crate::api::errors::ApiError;
use crate::api::guards::{CurrentAdmin, CurrentUser};
use crate::core::state::AppState;
use crate::domain::models::Certificate;
use crate::engine::queries;
use crate::schemas::certificate::CertificateGrant;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_certificates).post(grant_certificate))
        .route("/check", post(check_completion))
}

async fn list_certificates(
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
) -> Result<Json<Vec<Certificate>>, ApiError> {
    let snapshot = state.engine().snapshot().await;
    Ok(Json(queries::certificates_for(&snapshot, &user.id)))
}

/// Re-evaluates every active enrollment of the caller and returns the
/// certificates issued by this pass (empty when nothing newly qualifies).
async fn check_completion(
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
) -> Result<Json<Vec<Certificate>>, ApiError> {
    let issued = state.engine().check_course_completion(&user.id).await?;
    Ok(Json(issued))
}

async fn grant_certificate(
    CurrentAdmin(admin): CurrentAdmin,
    state: axum::extract::State<AppState>,
    Json(payload): Json<CertificateGrant>,
) -> Result<(axum::http::StatusCode, Json<Certificate>), ApiError> {
    let certificate =
        state.engine().generate_certificate(&payload.user_id, &payload.course_id).await?;

    tracing::info!(
        admin_id = %admin.id,
        user_id = %payload.user_id,
        course_id = %payload.course_id,
        action = "certificate_grant",
        "Admin issued certificate"
    );

    Ok((axum::http::StatusCode::CREATED, Json(certificate)))
}
