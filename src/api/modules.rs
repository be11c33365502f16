use axum::{routing::get, routing::post, Json, Router};

use crate::api::errors::ApiError;
use crate::api::guards::{CurrentAdmin, CurrentUser};
use crate::core::state::AppState;
use crate::domain::models::Module;
use crate::engine::queries;
use crate::schemas::content::ModuleContents;
use crate::schemas::course::{ModuleCreate, ModuleUpdate};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_module))
        .route("/:module_id", axum::routing::patch(update_module).delete(delete_module))
        .route("/:module_id/contents", get(list_contents))
}

async fn create_module(
    CurrentAdmin(_admin): CurrentAdmin,
    state: axum::extract::State<AppState>,
    Json(payload): Json<ModuleCreate>,
) -> Result<(axum::http::StatusCode, Json<Module>), ApiError> {
    let module = state.engine().add_module(payload).await?;
    Ok((axum::http::StatusCode::CREATED, Json(module)))
}

async fn update_module(
    axum::extract::Path(module_id): axum::extract::Path<String>,
    CurrentAdmin(_admin): CurrentAdmin,
    state: axum::extract::State<AppState>,
    Json(payload): Json<ModuleUpdate>,
) -> Result<Json<Module>, ApiError> {
    let module = state.engine().update_module(&module_id, payload).await?;
    Ok(Json(module))
}

async fn delete_module(
    axum::extract::Path(module_id): axum::extract::Path<String>,
    CurrentAdmin(admin): CurrentAdmin,
    state: axum::extract::State<AppState>,
) -> Result<axum::http::StatusCode, ApiError> {
    state.engine().delete_module(&module_id).await?;

    tracing::info!(
        admin_id = %admin.id,
        module_id = %module_id,
        action = "module_delete",
        "Admin deleted module"
    );

    Ok(axum::http::StatusCode::NO_CONTENT)
}

async fn list_contents(
    axum::extract::Path(module_id): axum::extract::Path<String>,
    CurrentUser(_user): CurrentUser,
    state: axum::extract::State<AppState>,
) -> Result<Json<ModuleContents>, ApiError> {
    let snapshot = state.engine().snapshot().await;
    if !snapshot.modules.iter().any(|module| module.id == module_id) {
        return Err(ApiError::NotFound(format!("module not found: {module_id}")));
    }
    Ok(Json(ModuleContents {
        videos: queries::videos_by_module(&snapshot, &module_id),
        pdfs: queries::pdfs_by_module(&snapshot, &module_id),
        images: queries::images_by_module(&snapshot, &module_id),
        exercises: queries::exercises_by_module(&snapshot, &module_id),
    }))
}

#[cfg(test)]
mod tests;
