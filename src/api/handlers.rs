//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{BoundedExpiringCache, Clock, SystemClock};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    EntryResponse, ExpireRequest, ExpireResponse, HealthResponse, PutRequest, PutResponse,
    ResetResponse, StatsResponse, ViewResponse,
};
use crate::tasks::SharedCache;

/// Application state shared across all handlers.
///
/// Holds the one cache instance built at startup, wrapped in
/// Arc<RwLock<>> so handlers and the sweep task share it.
pub struct AppState<C = SystemClock> {
    /// Shared cache
    pub cache: SharedCache<C>,
    /// Age limit used by POST /expire when the request names none
    pub max_age: Duration,
}

impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            max_age: self.max_age,
        }
    }
}

impl<C: Clock> AppState<C> {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: BoundedExpiringCache<String, String, C>, max_age: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            max_age,
        }
    }
}

impl AppState<SystemClock> {
    /// Creates a new AppState from configuration.
    ///
    /// # Errors
    /// `CacheError::InvalidCapacity` if the configured capacity is zero.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = BoundedExpiringCache::new(config.capacity)?;
        Ok(Self::new(cache, config.max_age()))
    }
}

/// Handler for PUT /put
///
/// Stores a key-value pair as the most recently used entry.
pub async fn put_handler<C: Clock>(
    State(state): State<AppState<C>>,
    Json(req): Json<PutRequest>,
) -> Result<Json<PutResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let mut cache = state.cache.write().await;
    cache.put(req.key.clone(), req.value);

    Ok(Json(PutResponse::new(req.key)))
}

/// Handler for GET /get/:key
///
/// Retrieves an entry by key.
pub async fn get_handler<C: Clock>(
    State(state): State<AppState<C>>,
    Path(key): Path<String>,
) -> Result<Json<EntryResponse>> {
    // Write lock: a hit reorders the recency list
    let mut cache = state.cache.write().await;
    let entry = cache.get(key.as_str())?;

    Ok(Json(entry.into()))
}

/// Handler for GET /view
///
/// Lists every entry, most recently used first.
pub async fn view_handler<C: Clock>(State(state): State<AppState<C>>) -> Json<ViewResponse> {
    let cache = state.cache.read().await;
    Json(ViewResponse::new(cache.view()))
}

/// Handler for POST /expire
///
/// Removes entries older than `max_age_seconds`, or than the configured
/// maximum age when the body is empty or omits the field.
pub async fn expire_handler<C: Clock>(
    State(state): State<AppState<C>>,
    body: Bytes,
) -> Result<Json<ExpireResponse>> {
    let req: ExpireRequest = if body.is_empty() {
        ExpireRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| CacheError::InvalidRequest(format!("Malformed expire request: {e}")))?
    };

    let mut cache = state.cache.write().await;
    let removed = match req.max_age_seconds {
        Some(secs) => cache.remove_expired_secs(secs)?,
        None => cache.remove_expired(state.max_age),
    };
    let remaining = cache.len();
    debug!(removed, remaining, "Manual expiry sweep");

    Ok(Json(ExpireResponse { removed, remaining }))
}

/// Handler for POST /reset
///
/// Drops every entry.
pub async fn reset_handler<C: Clock>(State(state): State<AppState<C>>) -> Json<ResetResponse> {
    state.cache.write().await.reset();
    Json(ResetResponse::new())
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler<C: Clock>(State(state): State<AppState<C>>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::new(&cache.stats(), cache.capacity()))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
