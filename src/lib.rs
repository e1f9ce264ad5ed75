//! Classifieds API library.
//!
//! A minimal classifieds-ad backend: create, delete, and list ads behind a
//! shared API key gate, with ad records in PostgreSQL and uploaded images
//! on a filesystem blob store. The router is built here so integration
//! tests can drive the exact same application the binary serves.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use state::AppState;

/// Build the application router.
///
/// # Routes
///
/// - `POST /api/v1/ads`, `GET /api/v1/ads`, `DELETE /api/v1/ads/{id}` -
///   behind the API key middleware
/// - `GET /health` - public
/// - `GET /images/*` - public static serving of the image store directory,
///   so the URLs returned on ad records resolve
pub fn app(state: AppState) -> Router {
    // Create authenticated routes (API endpoints)
    let authenticated_routes = Router::new()
        .route("/api/v1/ads", post(handlers::ads::create_ad))
        .route("/api/v1/ads", get(handlers::ads::list_ads))
        .route("/api/v1/ads/{id}", delete(handlers::ads::delete_ad))
        // Apply authorization middleware to all routes in this group
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_api_key,
        ));

    Router::new()
        // Public routes (no API key required)
        .route("/health", get(handlers::health::health_check))
        .nest_service("/images", ServeDir::new(state.images.root()))
        // Merge authenticated routes
        .merge(authenticated_routes)
        // Add request tracing middleware for observability
        .layer(TraceLayer::new_for_http())
        // The API is consumed from browsers on other origins
        .layer(CorsLayer::permissive())
        // Share state with all handlers via State extraction
        .with_state(state)
}
