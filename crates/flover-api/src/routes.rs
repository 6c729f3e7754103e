//! # Routes
//!
//! Axum router configuration for the checkout API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /health                   - Health check (204)
/// - POST /create-checkout-session  - Create a Stripe checkout session
/// - GET  /session?id=...           - Read a session back after payment
pub fn create_router(state: AppState) -> Router {
    // The frontend is served from a different origin, so blanket CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/create-checkout-session",
            post(handlers::create_checkout_session),
        )
        .route("/session", get(handlers::get_session))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
