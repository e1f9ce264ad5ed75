//! Classifieds API - Main Application Entry Point
//!
//! This is a REST API server for a minimal classifieds board. It provides
//! API-key-gated endpoints for creating, deleting, and listing ads.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Authorization**: single shared API key resolved from a secret store
//!   and cached for the process lifetime
//! - **Images**: filesystem blob store served as static files
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Run database migrations
//! 4. Build the authorization gate over the secret store client
//! 5. Build HTTP router with routes and middleware
//! 6. Start server on configured port

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use url::Url;

use classifieds_api::{
    auth::{AuthGate, secret::HttpSecretSource},
    config, db,
    services::images::ImageStore,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Create database pool
    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    // Run migrations
    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    // Secret store client and authorization gate. A missing
    // API_KEY_SECRET_NAME is not fatal here: the gate denies every request
    // until it is configured.
    let secrets_url = Url::parse(&config.secrets_url)?;
    let secret_source = HttpSecretSource::new(secrets_url)?;
    let gate = Arc::new(AuthGate::new(
        config.api_key_secret_name.clone(),
        Arc::new(secret_source),
    ));
    if config.api_key_secret_name.is_none() {
        tracing::warn!("API_KEY_SECRET_NAME is not set; all API requests will be denied");
    }

    // Image blob store
    let public_base_url = Url::parse(&config.public_base_url)?;
    let images = Arc::new(ImageStore::new(&config.images_dir, public_base_url));

    let state = AppState { pool, gate, images };
    let app = classifieds_api::app(state);

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Start serving HTTP requests
    // This blocks forever, handling requests concurrently with tokio
    axum::serve(listener, app).await?;

    Ok(())
}
