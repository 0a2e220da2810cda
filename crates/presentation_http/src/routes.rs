//! Route definitions

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Chat API (v1)
        .route("/v1/chat", post(handlers::chat::chat))
        // Model catalog
        .route("/v1/models", get(handlers::models::list_models))
        // Voice catalog
        .route("/v1/voices", get(handlers::voices::list_voices))
        // Session API (v1)
        .route("/v1/sessions/{id}/extract", post(handlers::extraction::extract))
        .route(
            "/v1/sessions/{id}/text",
            get(handlers::session::get_text).put(handlers::session::put_text),
        )
        .route("/v1/sessions/{id}/narrate", post(handlers::narration::narrate))
        .route("/v1/sessions/{id}", delete(handlers::session::end_session))
        // Attach state
        .with_state(state)
}
