//! Tour filter/sort engine
//!
//! Listing pages scope the catalog to a category, then hand the scoped list
//! and the user's [`FilterConfig`] to [`derive_visible_tours`]. Stages run in
//! a fixed order (duration, price, difficulty) and are ANDed; sorting runs
//! last and is stable, so tours that compare equal keep their catalog order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::domain::{Difficulty, Tour};

/// Number of cards shown before "show all" is requested
pub const DEFAULT_PREVIEW_LEN: usize = 6;

/// Duration bucket filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DurationFilter {
    #[default]
    All,
    /// Up to 3 days
    Short,
    /// 4 to 7 days
    Medium,
    /// 8 days or more
    Long,
}

impl DurationFilter {
    pub fn matches(&self, days: u32) -> bool {
        match self {
            Self::All => true,
            Self::Short => days <= 3,
            Self::Medium => (4..=7).contains(&days),
            Self::Long => days >= 8,
        }
    }
}

/// Price bucket filter, USD per person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriceRange {
    #[default]
    All,
    /// Below 2000
    Budget,
    /// 2000 up to (not including) 4000
    Mid,
    /// 4000 and above
    Luxury,
}

impl PriceRange {
    pub fn matches(&self, price: Decimal) -> bool {
        let mid_floor = Decimal::from(2000);
        let luxury_floor = Decimal::from(4000);
        match self {
            Self::All => true,
            Self::Budget => price < mid_floor,
            Self::Mid => price >= mid_floor && price < luxury_floor,
            Self::Luxury => price >= luxury_floor,
        }
    }
}

/// Difficulty filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DifficultyFilter {
    #[default]
    All,
    Easy,
    Moderate,
    Challenging,
}

impl DifficultyFilter {
    /// A tour without a difficulty only passes `All`.
    pub fn matches(&self, difficulty: Option<Difficulty>) -> bool {
        match self {
            Self::All => true,
            Self::Easy => difficulty == Some(Difficulty::Easy),
            Self::Moderate => difficulty == Some(Difficulty::Moderate),
            Self::Challenging => difficulty == Some(Difficulty::Challenging),
        }
    }
}

/// Sort key for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    /// Catalog order
    #[default]
    Featured,
    PriceLow,
    PriceHigh,
    DurationShort,
    DurationLong,
    /// Highest rated first
    Rating,
}

impl SortBy {
    fn compare(&self, a: &Tour, b: &Tour) -> Ordering {
        match self {
            Self::Featured => Ordering::Equal,
            Self::PriceLow => a.price_or_zero().cmp(&b.price_or_zero()),
            Self::PriceHigh => b.price_or_zero().cmp(&a.price_or_zero()),
            Self::DurationShort => a.duration_or_zero().cmp(&b.duration_or_zero()),
            Self::DurationLong => b.duration_or_zero().cmp(&a.duration_or_zero()),
            Self::Rating => b.rating_or_zero().total_cmp(&a.rating_or_zero()),
        }
    }

    /// Stable in-place sort
    pub fn sort(&self, tours: &mut [Tour]) {
        if *self == Self::Featured {
            return;
        }
        tours.sort_by(|a, b| self.compare(a, b));
    }
}

/// Filter configuration for one listing page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterConfig {
    pub duration: DurationFilter,
    pub price_range: PriceRange,
    pub difficulty: DifficultyFilter,
    pub sort_by: SortBy,
}

impl FilterConfig {
    /// Restore every field to its default in one step.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Number of narrowing filters in effect (sorting is not counted).
    pub fn active_filter_count(&self) -> usize {
        [
            self.duration != DurationFilter::All,
            self.price_range != PriceRange::All,
            self.difficulty != DifficultyFilter::All,
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}

/// Keep only the tours of one category.
pub fn scope_to_category(all_tours: &[Tour], category: &str) -> Vec<Tour> {
    all_tours
        .iter()
        .filter(|t| t.category.matches(category))
        .cloned()
        .collect()
}

/// Derive the visible, ordered subset of `all_tours` for `config`.
///
/// Never invents tours, never panics on missing price, duration or rating
/// (they count as 0), and returns `all_tours` unchanged for the default
/// configuration.
pub fn derive_visible_tours(all_tours: &[Tour], config: &FilterConfig) -> Vec<Tour> {
    let mut visible: Vec<Tour> = all_tours
        .iter()
        .filter(|t| config.duration.matches(t.duration_or_zero()))
        .filter(|t| config.price_range.matches(t.price_or_zero()))
        .filter(|t| config.difficulty.matches(t.difficulty))
        .cloned()
        .collect();

    config.sort_by.sort(&mut visible);
    visible
}

/// The part of a derived listing that is rendered.
pub fn visible_slice(tours: &[Tour], show_all: bool, preview_len: usize) -> &[Tour] {
    if show_all {
        tours
    } else {
        &tours[..tours.len().min(preview_len)]
    }
}
