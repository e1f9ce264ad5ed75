//! Shared application state.

use std::sync::Arc;

use crate::{auth::AuthGate, db::DbPool, services::images::ImageStore};

/// State shared with every handler via Axum's `State` extractor.
///
/// Cloning is cheap: the pool is internally reference-counted and the gate
/// and image store are behind `Arc`s. The gate owns the credential cache,
/// so its lifetime is the lifetime of this state (one per process in the
/// binary, one per test in the integration tests).
#[derive(Clone)]
pub struct AppState {
    /// Record store for ads
    pub pool: DbPool,

    /// API key authorization gate
    pub gate: Arc<AuthGate>,

    /// Blob store for uploaded ad images
    pub images: Arc<ImageStore>,
}
