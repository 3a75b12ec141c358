//! Listing query parameters (`GET /api/tours?...`)

use serde::Deserialize;

use super::filter::{
    derive_visible_tours, scope_to_category, visible_slice, DifficultyFilter, DurationFilter,
    FilterConfig, PriceRange, SortBy,
};
use crate::domain::{Tour, TourCard};

/// Query string of a tour listing request.
///
/// Every field is optional; unknown enum values are rejected by the
/// extractor before a handler runs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourListQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub duration: Option<DurationFilter>,
    #[serde(default)]
    pub price_range: Option<PriceRange>,
    #[serde(default)]
    pub difficulty: Option<DifficultyFilter>,
    #[serde(default)]
    pub sort_by: Option<SortBy>,
    #[serde(default)]
    pub show_all: Option<bool>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl TourListQuery {
    /// Maximum preview length a caller may ask for
    pub const MAX_LIMIT: usize = 100;

    pub fn filter(&self) -> FilterConfig {
        FilterConfig {
            duration: self.duration.unwrap_or_default(),
            price_range: self.price_range.unwrap_or_default(),
            difficulty: self.difficulty.unwrap_or_default(),
            sort_by: self.sort_by.unwrap_or_default(),
        }
    }

    pub fn show_all(&self) -> bool {
        self.show_all.unwrap_or(false)
    }

    /// Returns the clamped preview length
    pub fn preview_len(&self, default_len: usize) -> usize {
        self.limit.unwrap_or(default_len).clamp(1, Self::MAX_LIMIT)
    }
}

/// Result of running a listing query over the catalog
#[derive(Debug, Clone)]
pub struct TourListing {
    pub cards: Vec<TourCard>,
    /// Number of tours that matched before slicing
    pub matched: usize,
    pub show_all: bool,
}

/// Scope, filter, sort and slice `all_tours` for one listing request.
pub fn run_listing(all_tours: &[Tour], query: &TourListQuery, default_len: usize) -> TourListing {
    let scoped;
    let candidates = match query.category.as_deref().filter(|c| !c.trim().is_empty()) {
        Some(category) => {
            scoped = scope_to_category(all_tours, category);
            scoped.as_slice()
        }
        None => all_tours,
    };

    let visible = derive_visible_tours(candidates, &query.filter());
    let shown = visible_slice(&visible, query.show_all(), query.preview_len(default_len));

    TourListing {
        cards: shown.iter().cloned().map(TourCard::from).collect(),
        matched: visible.len(),
        show_all: query.show_all(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TourCategory;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn catalog() -> Vec<Tour> {
        (1..=8u128)
            .map(|n| {
                let category = if n % 2 == 0 {
                    TourCategory::Adventure
                } else {
                    TourCategory::Cultural
                };
                let mut t = Tour::new(Uuid::from_u128(n), format!("Tour {}", n), category);
                t.price = Some(Decimal::from(1000 * n as i64));
                t
            })
            .collect()
    }

    #[test]
    fn empty_query_uses_defaults() {
        let query = TourListQuery::default();
        assert!(query.filter().is_default());
        assert!(!query.show_all());
        assert_eq!(query.preview_len(6), 6);
    }

    #[test]
    fn limit_is_clamped() {
        let query = TourListQuery {
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(query.preview_len(6), 1);

        let query = TourListQuery {
            limit: Some(5000),
            ..Default::default()
        };
        assert_eq!(query.preview_len(6), TourListQuery::MAX_LIMIT);
    }

    #[test]
    fn listing_previews_until_show_all() {
        let tours = catalog();

        let preview = run_listing(&tours, &TourListQuery::default(), 6);
        assert_eq!(preview.cards.len(), 6);
        assert_eq!(preview.matched, 8);

        let everything = run_listing(
            &tours,
            &TourListQuery {
                show_all: Some(true),
                ..Default::default()
            },
            6,
        );
        assert_eq!(everything.cards.len(), 8);
    }

    #[test]
    fn listing_scopes_category_before_filtering() {
        let tours = catalog();
        let query = TourListQuery {
            category: Some("Cultural".to_string()),
            price_range: Some(PriceRange::Budget),
            sort_by: Some(SortBy::PriceHigh),
            ..Default::default()
        };
        let listing = run_listing(&tours, &query, 6);
        let ids: Vec<u128> = listing.cards.iter().map(|c| c.tour.id.as_u128()).collect();
        assert_eq!(ids, vec![1]);
    }
}
