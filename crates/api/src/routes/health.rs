use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Key read by the cache check; it never needs to exist.
const CACHE_CHECK_KEY: &str = "health:check";

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when every backing store answers, `degraded` otherwise.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
    /// Whether the key-value cache is reachable.
    pub cache_healthy: bool,
}

/// GET /health -- database and cache health.
///
/// Always 200. A cache outage only degrades location reads, so it is
/// reported rather than failing the check.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = ridehail_db::health_check(&state.pool).await.is_ok();
    let cache_healthy = state.store.get(CACHE_CHECK_KEY).await.is_ok();
    let status = if db_healthy && cache_healthy {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        cache_healthy,
    })
}

/// Mounted at the root, not under `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
