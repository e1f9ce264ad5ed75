//! Record-store operations for ads.
//!
//! Thin data-access layer over the `ads` table so handlers stay focused on
//! request shaping and validation.

use crate::db::DbPool;
use crate::error::AppError;
use crate::models::ad::Ad;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Insert a new ad record.
pub async fn put_ad(
    pool: &DbPool,
    ad_id: Uuid,
    title: &str,
    price_cents: i64,
    image_url: Option<&str>,
    created_at: DateTime<Utc>,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO ads (ad_id, title, price_cents, image_url, created_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(ad_id)
    .bind(title)
    .bind(price_cents)
    .bind(image_url)
    .bind(created_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete an ad by id.
///
/// Idempotent: deleting an id that does not exist is not an error, matching
/// the delete semantics of a key-value store. Returns the number of rows
/// removed for logging.
pub async fn delete_ad(pool: &DbPool, ad_id: Uuid) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM ads WHERE ad_id = $1")
        .bind(ad_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Fetch every ad, newest first. Unfiltered and unpaginated.
pub async fn get_all_ads(pool: &DbPool) -> Result<Vec<Ad>, AppError> {
    let ads = sqlx::query_as::<_, Ad>(
        r#"
        SELECT ad_id, title, price_cents, image_url, created_at
        FROM ads
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(ads)
}
