//! Application state for the HTTP server.

use std::sync::Arc;

use crate::services::ConstellationService;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ConstellationService>,
}

impl AppState {
    pub fn new(service: Arc<ConstellationService>) -> Self {
        Self { service }
    }
}
