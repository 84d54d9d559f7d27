use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Protected Router Module
///
/// Endpoints that require the configured API key. `create_router` wraps this router
/// (plus any collaborator routes, such as invoice CRUD) in `api_key_middleware`.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        // GET /api/verify
        // Returns {"valid": true} when the presented key matches.
        .route("/api/verify", get(handlers::verify_api_key))
}
