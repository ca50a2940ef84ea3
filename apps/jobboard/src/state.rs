use std::sync::Arc;

use crate::config::Config;
use crate::jobs_api::JobSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Job listings. `JobsApiClient` in production, swappable in tests.
    pub jobs: Arc<dyn JobSource>,
    pub config: Config,
}
