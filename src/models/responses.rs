//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheStats, EntryInfo};

/// One cache entry as returned by GET /get/:key and inside GET /view
#[derive(Debug, Clone, Serialize)]
pub struct EntryResponse {
    pub key: String,
    pub value: String,
    /// Creation time in ISO 8601 format
    pub created_at: String,
}

impl From<EntryInfo<String, String>> for EntryResponse {
    fn from(info: EntryInfo<String, String>) -> Self {
        Self {
            created_at: info.created_at_iso(),
            key: info.key,
            value: info.value,
        }
    }
}

/// Response body for the PUT operation (PUT /put)
#[derive(Debug, Clone, Serialize)]
pub struct PutResponse {
    /// Success message
    pub message: String,
    /// The key that was stored
    pub key: String,
}

impl PutResponse {
    /// Creates a new PutResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' stored successfully", key),
            key,
        }
    }
}

/// Response body for GET /view, most recently used entry first
#[derive(Debug, Clone, Serialize)]
pub struct ViewResponse {
    pub entries: Vec<EntryResponse>,
    pub count: usize,
}

impl ViewResponse {
    pub fn new(entries: Vec<EntryInfo<String, String>>) -> Self {
        let entries: Vec<EntryResponse> = entries.into_iter().map(EntryResponse::from).collect();
        Self {
            count: entries.len(),
            entries,
        }
    }
}

/// Response body for POST /expire
#[derive(Debug, Clone, Serialize)]
pub struct ExpireResponse {
    /// Entries removed by this sweep
    pub removed: usize,
    /// Entries left afterwards
    pub remaining: usize,
}

/// Response body for POST /reset
#[derive(Debug, Clone, Serialize)]
pub struct ResetResponse {
    pub message: String,
}

impl ResetResponse {
    pub fn new() -> Self {
        Self {
            message: "Cache reset successfully".to_string(),
        }
    }
}

impl Default for ResetResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of LRU evictions
    pub evictions: u64,
    /// Number of entries removed by expiry sweeps
    pub expirations: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Configured capacity
    pub capacity: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(stats: &CacheStats, capacity: usize) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
            capacity,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
