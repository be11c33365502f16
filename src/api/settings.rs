use axum::{routing::get, Json, Router};

use crate::api::errors::ApiError;
use crate::api::guards::{CurrentAdmin, CurrentUser};
use crate::core::state::AppState;
use crate::domain::models::PortalSettings;
use crate::schemas::settings::SettingsUpdate;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/", get(get_settings).put(update_settings))
}

async fn get_settings(
    CurrentUser(_user): CurrentUser,
    state: axum::extract::State<AppState>,
) -> Result<Json<PortalSettings>, ApiError> {
    let snapshot = state.engine().snapshot().await;
    Ok(Json(snapshot.settings.clone()))
}

async fn update_settings(
    CurrentAdmin(admin): CurrentAdmin,
    state: axum::extract::State<AppState>,
    Json(payload): Json<SettingsUpdate>,
) -> Result<Json<PortalSettings>, ApiError> {
    let settings = state.engine().update_settings(payload).await?;

    tracing::info!(admin_id = %admin.id, action = "settings_update", "Admin updated settings");

    Ok(Json(settings))
}

#[cfg(test)]
mod tests;
