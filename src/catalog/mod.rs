//! Tour catalog: filtering, sorting and listing of the read-only tour list.

pub mod filter;
pub mod query;

pub use filter::{
    derive_visible_tours, scope_to_category, visible_slice, DifficultyFilter, DurationFilter,
    FilterConfig, PriceRange, SortBy, DEFAULT_PREVIEW_LEN,
};
pub use query::{run_listing, TourListQuery, TourListing};
