//! Stateless HTTP API over the gallery layout core.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod routes;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    /// Gap between artworks and the wall surface
    pub wall_clearance: f64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            wall_clearance: shared::DEFAULT_WALL_CLEARANCE,
        }
    }
}

/// All routes with permissive CORS (the editor front end runs on another port)
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/layout/wall", post(routes::layout_wall))
        .route("/api/layout/custom-wall", post(routes::layout_custom_wall))
        .route("/api/layout/merge", post(routes::layout_merge))
        .route("/api/templates/normalize", post(routes::normalize_template))
        .route("/api/templates/validate", post(routes::validate_template))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
