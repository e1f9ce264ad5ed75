//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, etc.)
//! 2. Performs business logic (storage calls, validation)
//! 3. Returns HTTP response (JSON, status code)

/// Classified ad endpoints
pub mod ads;
/// Health check endpoint
pub mod health;
