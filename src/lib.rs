pub(crate) mod api;
pub(crate) mod core;
pub(crate) mod domain;
pub(crate) mod engine;
pub(crate) mod schemas;
pub(crate) mod storage;
pub(crate) mod store;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use crate::core::{config::Settings, state::AppState, telemetry};
use crate::engine::Engine;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    telemetry::init_tracing(&settings)?;
    core::metrics::init(&settings)?;

    let storage = storage::from_settings(&settings).await?;
    let engine = Arc::new(Engine::bootstrap(storage).await?);

    if settings.seed().seed_on_empty {
        match engine.seed_if_empty(&settings.seed().seed_owner_id).await {
            Ok(true) => tracing::info!("Empty catalog seeded with demo dataset"),
            Ok(false) => {}
            Err(err) => tracing::error!(error = %err, "Failed to seed demo dataset"),
        }
    }

    engine.start_sync().await?;

    let state = AppState::new(settings, engine);
    let app = api::router::router(state.clone());
    let listener = tokio::net::TcpListener::bind(state.settings().server_addr()).await?;

    tracing::info!(
        host = %state.settings().server_host(),
        port = state.settings().server_port(),
        environment = %state.settings().runtime().environment.as_str(),
        "Manguezal API listening"
    );

    axum::serve(listener, app).with_graceful_shutdown(core::shutdown::shutdown_signal()).await?;

    Ok(())
}
