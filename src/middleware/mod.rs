//! HTTP middleware components.
//!
//! Middleware are functions that run before route handlers.
//! They can:
//! - Authorize requests
//! - Log requests
//! - Short-circuit requests (reject unauthorized)

/// API key authorization middleware
pub mod auth;
