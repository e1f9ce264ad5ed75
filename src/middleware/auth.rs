//! API key authorization middleware.
//!
//! This middleware intercepts every protected request, hands its headers to
//! the authorization gate, and rejects denied requests with HTTP 401 before
//! any handler runs. Handlers behind it never see an unauthorized request,
//! so no storage read or write can happen without a valid key.

use axum::{extract::Request, extract::State, middleware::Next, response::Response};

use crate::{error::AppError, state::AppState};

/// Authorization middleware function.
///
/// # Flow
///
/// 1. Pass the request headers to [`crate::auth::AuthGate::is_authorized`]
/// 2. If the gate allows, call the next handler
/// 3. If it denies, return 401 Unauthorized
///
/// The gate folds every internal failure (missing configuration, secret
/// store down, malformed secret) into a denial, so the response here is the
/// same generic 401 regardless of the cause.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !state.gate.is_authorized(request.headers()).await {
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}
