pub mod content;
pub mod forms;
pub mod health;
pub mod tours;

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::app::AppState;

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        // Catalog
        .route("/api/tours", get(tours::list_tours))
        .route("/api/tours/:tour_id", get(tours::get_tour))
        .route("/api/festivals", get(content::list_festivals))
        .route("/api/hotels", get(content::list_hotels))
        .route("/api/testimonials", get(content::list_testimonials))
        // Lead intake
        .merge(forms::lead_intake_router::<Arc<AppState>>())
        // Form metadata
        .merge(forms::forms_meta_router::<Arc<AppState>>())
}
