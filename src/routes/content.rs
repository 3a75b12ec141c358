//! Festival, hotel and testimonial routes

use axum::{extract::State, response::IntoResponse};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::{types::Json as SqlJson, PgPool};
use std::future::Future;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::DataResponse;
use crate::app::AppState;
use crate::domain::{Festival, Hotel, Testimonial};
use crate::error::ApiResult;
use crate::services::cache::keys;

#[derive(Debug, sqlx::FromRow)]
struct FestivalRow {
    id: Uuid,
    name: String,
    description: String,
    location: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    highlights: SqlJson<Vec<String>>,
    image_url: Option<String>,
}

impl From<FestivalRow> for Festival {
    fn from(row: FestivalRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            location: row.location,
            start_date: row.start_date,
            end_date: row.end_date,
            highlights: row.highlights.0,
            image_url: row.image_url,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct HotelRow {
    id: Uuid,
    name: String,
    description: String,
    location: Option<String>,
    star_rating: Option<i16>,
    price_per_night: Option<Decimal>,
    amenities: SqlJson<Vec<String>>,
    image_url: Option<String>,
}

impl From<HotelRow> for Hotel {
    fn from(row: HotelRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            location: row.location,
            star_rating: row.star_rating,
            price_per_night: row.price_per_night,
            amenities: row.amenities.0,
            image_url: row.image_url,
        }
    }
}

/// Cache-aside read of a whole list.
async fn cached_list<T, F, Fut>(state: &AppState, key: &str, load: F) -> ApiResult<Vec<T>>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<T>, sqlx::Error>>,
{
    if let Some(cached) = state.cache.get::<Vec<T>>(key).await {
        return Ok(cached);
    }

    let items = load().await?;

    if let Err(e) = state.cache.set(key, &items).await {
        tracing::warn!(key = key, error = %e, "Failed to cache list");
    }

    Ok(items)
}

async fn fetch_festivals(db: &PgPool) -> Result<Vec<Festival>, sqlx::Error> {
    let rows = sqlx::query_as::<_, FestivalRow>(
        r#"
        SELECT id, name, description, location, start_date, end_date, highlights, image_url
        FROM festivals
        ORDER BY start_date ASC NULLS LAST, name ASC
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows.into_iter().map(Festival::from).collect())
}

async fn fetch_hotels(db: &PgPool) -> Result<Vec<Hotel>, sqlx::Error> {
    let rows = sqlx::query_as::<_, HotelRow>(
        r#"
        SELECT id, name, description, location, star_rating, price_per_night, amenities, image_url
        FROM hotels
        ORDER BY star_rating DESC NULLS LAST, name ASC
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows.into_iter().map(Hotel::from).collect())
}

async fn fetch_testimonials(db: &PgPool) -> Result<Vec<Testimonial>, sqlx::Error> {
    let rows: Vec<(Uuid, String, Option<String>, String, Option<f64>, Option<String>)> =
        sqlx::query_as(
            r#"
            SELECT id, author, country, content, rating, tour_name
            FROM testimonials
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(id, author, country, content, rating, tour_name)| Testimonial {
            id,
            author,
            country,
            content,
            rating,
            tour_name,
        })
        .collect())
}

/// GET /api/festivals
///
/// Ordered by start date; undated festivals last.
pub async fn list_festivals(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let festivals = cached_list(&state, keys::festivals(), || fetch_festivals(&state.db)).await?;
    Ok(DataResponse::new(festivals))
}

/// GET /api/hotels
pub async fn list_hotels(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let hotels = cached_list(&state, keys::hotels(), || fetch_hotels(&state.db)).await?;
    Ok(DataResponse::new(hotels))
}

/// GET /api/testimonials
pub async fn list_testimonials(
    State(state): State<Arc<AppState>>,
) -> ApiResult<impl IntoResponse> {
    let testimonials =
        cached_list(&state, keys::testimonials(), || fetch_testimonials(&state.db)).await?;
    Ok(DataResponse::new(testimonials))
}
