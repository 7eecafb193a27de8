//! Router configuration for the web server.

use axum::{Router, middleware, routing::get};

use super::AppState;
use super::auth;
use super::handlers;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::health))
        .route("/", get(handlers::index))
        // Only the scraper is behind the API key
        .route(
            "/scraper",
            get(handlers::scraper).route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth::require_api_key,
            )),
        )
        .with_state(state)
}
