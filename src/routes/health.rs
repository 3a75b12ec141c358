use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::app::AppState;
use crate::db;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: ServiceHealth,
}

#[derive(Serialize)]
pub struct ServiceHealth {
    pub database: String,
    pub redis: String,
}

/// Overall status; the database is critical, the cache is not.
fn overall_status(db_ok: bool, redis_ok: bool) -> &'static str {
    match (db_ok, redis_ok) {
        (true, true) => "healthy",
        (true, false) => "degraded",
        (false, _) => "unhealthy",
    }
}

fn service_status(ok: bool) -> String {
    let status = if ok { "ok" } else { "error" };
    status.to_string()
}

/// Health check endpoint - public
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let (db_ok, redis_result) = tokio::join!(
        db::health_check(&state.db),
        state.cache.health_check(),
    );
    let redis_ok = redis_result.is_ok();

    let status = overall_status(db_ok, redis_ok);

    // Return 503 if unhealthy (critical service down)
    let status_code = if status == "unhealthy" {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    (
        status_code,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            services: ServiceHealth {
                database: service_status(db_ok),
                redis: service_status(redis_ok),
            },
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_outage_only_degrades() {
        assert_eq!(overall_status(true, true), "healthy");
        assert_eq!(overall_status(true, false), "degraded");
        assert_eq!(overall_status(false, true), "unhealthy");
    }
}
