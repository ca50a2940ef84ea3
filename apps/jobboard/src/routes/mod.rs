pub mod health;

use axum::{extract::State, routing::get, Router};

use crate::pages::handlers;
use crate::pages::landing::Landing;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(handlers::home))
        .route("/classified-jobs/:slug", get(handlers::job_detail))
        .route("/api/sliders/:key", get(handlers::slider_json));

    for landing in Landing::ALL {
        router = router.route(
            landing.path(),
            get(move |State(state): State<AppState>| handlers::landing_page(state, landing)),
        );
    }

    router.fallback(handlers::not_found).with_state(state)
}
