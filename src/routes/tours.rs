//! Tour catalog routes
//!
//! The catalog is small and read-only, so the full ordered list is loaded
//! (from Redis when warm) and every listing is derived from it in memory.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use rust_decimal::Decimal;
use sqlx::types::Json as SqlJson;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::{DataResponse, Preview};
use crate::app::AppState;
use crate::catalog::{run_listing, TourListQuery};
use crate::domain::{Difficulty, Tour, TourCard, TourCategory};
use crate::error::{ApiError, ApiResult};
use crate::services::cache::keys;

/// Database row for tour
#[derive(Debug, sqlx::FromRow)]
struct TourRow {
    id: Uuid,
    name: String,
    description: String,
    category: String,
    price: Option<Decimal>,
    duration: Option<i32>,
    difficulty: Option<String>,
    rating: Option<f64>,
    max_group_size: Option<i32>,
    group_size: Option<String>,
    highlights: SqlJson<Vec<String>>,
    image_url: Option<String>,
    best_season: Option<String>,
}

impl From<TourRow> for Tour {
    fn from(row: TourRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            category: TourCategory::from(row.category),
            price: row.price,
            // Negative values are rejected by a CHECK constraint
            duration: row.duration.and_then(|d| u32::try_from(d).ok()),
            difficulty: row.difficulty.as_deref().and_then(Difficulty::parse),
            rating: row.rating,
            max_group_size: row.max_group_size.and_then(|n| u32::try_from(n).ok()),
            group_size: row.group_size,
            highlights: row.highlights.0,
            image_url: row.image_url,
            best_season: row.best_season,
        }
    }
}

/// Full tour list in catalog order, cache first.
pub(crate) async fn load_tours(state: &AppState) -> ApiResult<Vec<Tour>> {
    if let Some(cached) = state.cache.get::<Vec<Tour>>(keys::tours()).await {
        return Ok(cached);
    }

    let rows = sqlx::query_as::<_, TourRow>(
        r#"
        SELECT id, name, description, category, price, duration, difficulty, rating,
               max_group_size, group_size, highlights, image_url, best_season
        FROM tours
        ORDER BY display_order ASC, created_at ASC
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    let tours: Vec<Tour> = rows.into_iter().map(Into::into).collect();
    tracing::debug!(count = tours.len(), "Loaded tours from database");

    if let Err(e) = state.cache.set(keys::tours(), &tours).await {
        tracing::warn!(error = %e, "Failed to cache tour list");
    }

    Ok(tours)
}

/// GET /api/tours
///
/// Filtered, sorted and previewed tour cards.
pub async fn list_tours(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TourListQuery>,
) -> ApiResult<impl IntoResponse> {
    let tours = load_tours(&state).await?;
    let listing = run_listing(&tours, &query, state.settings.catalog_preview_len);

    tracing::debug!(
        category = ?query.category,
        matched = listing.matched,
        shown = listing.cards.len(),
        "Listing tours"
    );

    Ok(Preview::new(listing.cards, listing.matched, listing.show_all))
}

/// GET /api/tours/:tour_id
pub async fn get_tour(
    State(state): State<Arc<AppState>>,
    Path(tour_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let tour = load_tours(&state)
        .await?
        .into_iter()
        .find(|t| t.id == tour_id)
        .ok_or_else(|| ApiError::not_found("Tour not found"))?;

    Ok(DataResponse::new(TourCard::from(tour)))
}
