//! HTTP API: router assembly and request plumbing.

pub mod handlers;
pub mod params;

use crate::state::AppState;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(health))
        // Categories
        .route("/categories", get(handlers::categories::index))
        .route("/categories/counts", get(handlers::categories::counts))
        .route("/categories/featured", get(handlers::categories::featured))
        .route("/categories/tree", get(handlers::categories::tree))
        .route("/categories/:id", get(handlers::categories::show))
        .route(
            "/categories/:id/children",
            get(handlers::categories::children),
        )
        // Services
        .route("/services", get(handlers::services::index))
        .route("/services/featured", get(handlers::services::featured))
        .route("/services/pending", get(handlers::services::pending))
        .route("/services/count", get(handlers::services::count))
        .route(
            "/services/:id",
            get(handlers::services::show).delete(handlers::services::destroy),
        )
        .route("/services/:id/approve", post(handlers::services::approve))
        .route("/services/:id/reject", post(handlers::services::reject))
        .route("/services/:id/certify", post(handlers::services::certify))
        // Batch creation under the owning resource
        .route(
            "/resources/:resource_id/services",
            post(handlers::services::create),
        );

    // Texting routes exist only when a provider is configured.
    if state.texting.is_some() {
        router = router.route("/textings", post(handlers::textings::create));
    }

    router
        .layer(cors_layer(&state))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let origins: Vec<HeaderValue> = state
        .config
        .server
        .cors_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(tower_http::cors::Any)
}
