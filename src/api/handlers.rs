//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::cache::{CacheSnapshot, PerformanceCache};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    DeleteResponse, GetResponse, HealthResponse, ImportResponse, RemovedResponse, SetRequest,
    SetResponse, StatsResponse, TagResponse,
};

/// Cache type served over HTTP
pub type JsonCache = PerformanceCache<Value>;

/// Application state shared across all handlers.
///
/// The cache is owned here and shared behind `Arc<RwLock<>>`.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<RwLock<JsonCache>>,
}

impl AppState {
    pub fn new(cache: JsonCache) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(PerformanceCache::new(config.cache_config()))
    }
}

/// Handler for PUT /set
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let (key, value, options) = req.into_parts();
    state.cache.write().await.set(key.clone(), value, options);

    Ok(Json(SetResponse::new(key)))
}

/// Handler for GET /get/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    // Write lock: a hit updates access order and counters
    let mut cache = state.cache.write().await;
    let value = cache
        .get(&key)
        .cloned()
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if !state.cache.write().await.delete(&key) {
        return Err(CacheError::NotFound(key));
    }

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for DELETE /clear
pub async fn clear_handler(State(state): State<AppState>) -> Json<RemovedResponse> {
    let mut cache = state.cache.write().await;
    let removed = cache.len();
    cache.clear();

    Json(RemovedResponse { removed })
}

/// Handler for POST /cleanup
pub async fn cleanup_handler(State(state): State<AppState>) -> Json<RemovedResponse> {
    let removed = state.cache.write().await.cleanup();
    Json(RemovedResponse { removed })
}

/// Handler for GET /tags/:tag
pub async fn tag_handler(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Json<TagResponse> {
    let entries = state.cache.read().await.get_by_tag(&tag);
    Json(TagResponse::new(tag, entries))
}

/// Handler for DELETE /tags/:tag
pub async fn invalidate_tag_handler(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Json<RemovedResponse> {
    let removed = state.cache.write().await.invalidate_by_tag(&tag);
    Json(RemovedResponse { removed })
}

/// Handler for GET /export
pub async fn export_handler(State(state): State<AppState>) -> Json<CacheSnapshot<Value>> {
    Json(state.cache.read().await.export())
}

/// Handler for POST /import
pub async fn import_handler(
    State(state): State<AppState>,
    Json(snapshot): Json<CacheSnapshot<Value>>,
) -> Json<ImportResponse> {
    let total = snapshot.entries.len();
    let imported = state.cache.write().await.import(snapshot);

    Json(ImportResponse {
        imported,
        skipped: total - imported,
    })
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.read().await.stats();
    Json(StatsResponse::from(stats))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
