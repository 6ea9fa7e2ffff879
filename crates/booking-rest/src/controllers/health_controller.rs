//! Health check controller.

use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status.
    pub status: String,
    /// Time the check ran.
    pub timestamp: DateTime<Utc>,
    /// Application version.
    pub version: String,
    /// Active cache backend (`memory` or `redis`).
    pub cache_backend: String,
    /// Entries held after the purge; `None` when the store cannot tell.
    pub cache_size: Option<usize>,
}

/// Creates the health router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Health check endpoint.
///
/// Drops expired cache entries before reporting the cache size.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    match state.cache.purge_expired().await {
        Ok(purged) => debug!("Health check purged {} expired cache entries", purged),
        Err(e) => warn!("Health check could not purge cache: {}", e),
    }

    let cache_size = state
        .cache
        .entry_count()
        .await
        .map_err(|e| warn!("Health check could not size cache: {}", e))
        .ok();

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cache_backend: state.cache.backend().to_string(),
        cache_size,
    })
}
