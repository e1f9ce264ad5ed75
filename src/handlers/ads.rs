//! Classified ad HTTP handlers.
//!
//! This module implements the ad-related API endpoints:
//! - POST /api/v1/ads - Create a new ad
//! - DELETE /api/v1/ads/:id - Delete an ad by id
//! - GET /api/v1/ads - List all ads
//!
//! All three routes sit behind the API key middleware; by the time a
//! handler runs, the request has already been authorized.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::ad::{Ad, CreateAdRequest, CreateAdResponse},
    services,
    state::AppState,
};

/// Minimum accepted title length, in characters.
const MIN_TITLE_CHARS: usize = 3;

/// Create a new ad.
///
/// # Endpoint
///
/// `POST /api/v1/ads`
///
/// # Request Body
///
/// ```json
/// {
///   "title": "Vintage bicycle",
///   "price_cents": 12500,
///   "image_base64": "..."  // optional
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: `{"ad_id": "<uuid>"}`
/// - **Error (400)**: title shorter than 3 characters, negative price,
///   or undecodable image
/// - **Error (401)**: missing or invalid API key
/// - **Error (500)**: storage failure
///
/// # Flow
///
/// Validation runs before any storage call; an invalid request performs no
/// write. If an image is supplied it is stored first so the record carries
/// its public URL.
pub async fn create_ad(
    State(state): State<AppState>,
    Json(request): Json<CreateAdRequest>,
) -> Result<(StatusCode, Json<CreateAdResponse>), AppError> {
    // Title must be at least 3 characters, price must be non-negative
    if request.title.chars().count() < MIN_TITLE_CHARS {
        return Err(AppError::InvalidRequest(
            "title must be at least 3 characters".to_string(),
        ));
    }
    if request.price_cents < 0 {
        return Err(AppError::InvalidRequest(
            "price_cents must not be negative".to_string(),
        ));
    }

    let ad_id = Uuid::new_v4();

    // Upload image if provided
    let image_url = match &request.image_base64 {
        Some(encoded) => Some(state.images.store_image(ad_id, encoded).await?),
        None => None,
    };

    services::ads::put_ad(
        &state.pool,
        ad_id,
        &request.title,
        request.price_cents,
        image_url.as_deref(),
        Utc::now(),
    )
    .await?;

    tracing::info!(%ad_id, "ad created");

    Ok((StatusCode::CREATED, Json(CreateAdResponse { ad_id })))
}

/// Delete an ad by id.
///
/// # Endpoint
///
/// `DELETE /api/v1/ads/{id}`
///
/// # Response
///
/// - **Success (200 OK)**: `{"message": "Ad deleted successfully"}`
/// - **Error (400)**: id is not a valid UUID
/// - **Error (401)**: missing or invalid API key
///
/// Deletion is idempotent: deleting an id with no matching record still
/// returns 200, matching key-value delete semantics.
pub async fn delete_ad(
    State(state): State<AppState>,
    Path(ad_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let removed = services::ads::delete_ad(&state.pool, ad_id).await?;

    tracing::info!(%ad_id, removed, "ad deleted");

    Ok(Json(json!({ "message": "Ad deleted successfully" })))
}

/// List all ads.
///
/// # Endpoint
///
/// `GET /api/v1/ads`
///
/// # Response
///
/// - **Success (200 OK)**: array of all ads (may be empty), newest first.
///   Unfiltered and unpaginated.
/// - **Error (401)**: missing or invalid API key
pub async fn list_ads(State(state): State<AppState>) -> Result<Json<Vec<Ad>>, AppError> {
    let ads = services::ads::get_all_ads(&state.pool).await?;

    Ok(Json(ads))
}
