//! Axum router configuration with middleware.
//!
//! Flat route surface, no versioning prefix. Middleware: permissive CORS
//! (the presentation client is an independently served browser app) and
//! request tracing.

use axum::Router;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/chat", post(handlers::chat::chat))
        .route("/history", get(handlers::history::history))
        .route("/reset", post(handlers::chat::reset))
        .route("/delete_chat", delete(handlers::history::delete_chat))
        .route("/", get(home))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - liveness/info route.
async fn home() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "message": "Welcome to the Parley chat relay.",
    }))
}
