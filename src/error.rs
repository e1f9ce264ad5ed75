//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and error message.
///
/// # Error Categories
///
/// - **Database Errors**: Any sqlx::Error from record-store operations
/// - **Authorization Errors**: Missing or rejected API key
/// - **Validation Errors**: Invalid request data
/// - **Image Store Errors**: Failures writing uploaded images to disk
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    ///
    /// This wraps any sqlx::Error using the `#[from]` attribute, which
    /// automatically implements `From<sqlx::Error> for AppError`.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The request was not authorized by the API key gate.
    ///
    /// Returns HTTP 401 Unauthorized. This is the only authorization
    /// outcome the API ever reports: a missing key, a wrong key, and a
    /// secret-store failure all produce this same response, so callers
    /// learn nothing about secret-store health.
    #[error("Unauthorized")]
    Unauthorized,

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("Invalid request")]
    InvalidRequest(String),

    /// Writing an uploaded image to the blob store failed.
    ///
    /// Returns HTTP 500 Internal Server Error (details hidden from client).
    #[error("Image store error: {0}")]
    ImageStore(#[from] std::io::Error),

    /// Building the public image URL failed (misconfigured base URL).
    ///
    /// Returns HTTP 500 Internal Server Error.
    #[error("Invalid image URL: {0}")]
    BadImageUrl(#[from] url::ParseError),
}

/// Convert AppError into an HTTP response.
///
/// This implementation allows Axum handlers to return `Result<T, AppError>`
/// and have errors automatically converted to proper HTTP responses.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `Unauthorized` → 401 Unauthorized
/// - `InvalidRequest` → 400 Bad Request
/// - `Database` / `ImageStore` / `BadImageUrl` → 500 Internal Server Error
///   (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map each error variant to (HTTP status, error code, message)
        let (status, code, message) = match self {
            AppError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "unauthorized", self.to_string())
            }
            AppError::InvalidRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            AppError::Database(_) | AppError::ImageStore(_) | AppError::BadImageUrl(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred".to_string(),
            ),
        };

        // Build JSON response body
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        // Return the response with status code and JSON body
        (status, body).into_response()
    }
}
