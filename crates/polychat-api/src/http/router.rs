//! Axum router configuration with middleware.
//!
//! All routes are under `/api/`.
//! Middleware: CORS (the browser dashboard calls from another origin),
//! request tracing.

use axum::Router;
use axum::routing::{get, post, put};
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

    let api_routes = Router::new()
        // Chat exchange
        .route("/chat", post(handlers::chat::exchange))
        // Model catalog
        .route("/models", get(handlers::model::list_models))
        // Message history
        .route(
            "/users/{user_id}/messages",
            get(handlers::message::list_messages)
                .post(handlers::message::save_message)
                .delete(handlers::message::clear_messages),
        )
        .route(
            "/messages/{id}/feedback",
            put(handlers::message::record_feedback),
        )
        // Payments collaborator
        .route("/checkout", post(handlers::checkout::create_checkout));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
