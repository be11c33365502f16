use axum::{routing::post, Json, Router};
use serde::Serialize;

use crate::api::errors::ApiError;
use crate::api::guards::CurrentAdmin;
use crate::core::state::AppState;

#[derive(Debug, Serialize)]
pub(crate) struct SeedResponse {
    pub(crate) seeded: bool,
}

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/seed", post(seed_demo_data))
}

/// Applies the demonstration dataset on demand. Fixed document ids make
/// repeated calls harmless.
async fn seed_demo_data(
    CurrentAdmin(admin): CurrentAdmin,
    state: axum::extract::State<AppState>,
) -> Result<Json<SeedResponse>, ApiError> {
    state.engine().seed_demo_data(&admin.id).await?;

    tracing::info!(admin_id = %admin.id, action = "seed", "Admin applied demo dataset");

    Ok(Json(SeedResponse { seeded: true }))
}

#[cfg(test)]
mod tests;
