//! Ad data model and API request/response types.
//!
//! This module defines:
//! - `Ad`: Database entity representing a classified ad
//! - `CreateAdRequest`: Request body for creating ads
//! - `CreateAdResponse`: Response body returned after creation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents an ad record from the database.
///
/// # Database Table
///
/// Maps to the `ads` table. Prices are stored as `i64` cents to avoid
/// floating-point precision issues:
/// - $10.50 is stored as 1050 cents
/// - $100.00 is stored as 10000 cents
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Ad {
    /// Unique identifier for this ad
    pub ad_id: Uuid,

    /// Listing title, at least 3 characters
    pub title: String,

    /// Asking price in cents (not dollars)
    ///
    /// Must be >= 0 (enforced by database CHECK constraint).
    pub price_cents: i64,

    /// Public URL of the uploaded image, if one was provided
    pub image_url: Option<String>,

    /// Timestamp when the ad was created
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a new ad.
///
/// # JSON Example
///
/// ```json
/// {
///   "title": "Vintage bicycle",
///   "price_cents": 12500,
///   "image_base64": "<base64-encoded JPEG>"
/// }
/// ```
///
/// # Validation
///
/// - `title`: Required, at least 3 characters
/// - `price_cents`: Required, must be >= 0
/// - `image_base64`: Optional, standard base64 encoding of a JPEG
#[derive(Debug, Deserialize)]
pub struct CreateAdRequest {
    /// Title for the new ad
    pub title: String,

    /// Asking price in cents
    pub price_cents: i64,

    /// Optional base64-encoded JPEG image
    pub image_base64: Option<String>,
}

/// Response body after creating an ad.
///
/// Only the generated identifier is returned; clients fetch the full record
/// through the list endpoint.
#[derive(Debug, Serialize)]
pub struct CreateAdResponse {
    /// Identifier of the newly created ad
    pub ad_id: Uuid,
}
