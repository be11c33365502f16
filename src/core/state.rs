use std::sync::Arc;

use crate::core::config::Settings;
use crate::engine::Engine;

#[derive(Clone)]
pub(crate) struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    settings: Settings,
    engine: Arc<Engine>,
}

impl AppState {
    pub(crate) fn new(settings: Settings, engine: Arc<Engine>) -> Self {
        Self { inner: Arc::new(InnerState { settings, engine }) }
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    pub(crate) fn engine(&self) -> &Engine {
        &self.inner.engine
    }
}
