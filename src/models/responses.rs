//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::{Deserialize, Serialize};

use crate::cache::CacheStats;

/// Response body for value reads (get, lindex, hget)
///
/// Generic so the GET handler can return a whole [`crate::cache::Value`]
/// while lindex and hget return a single payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueResponse<T> {
    pub value: T,
}

impl<T> ValueResponse<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

/// Response body for the KEYS operation (GET /v1/keys)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeysResponse {
    pub keys: Vec<String>,
}

/// Response body for successful writes (set, rpush, hset)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteResponse {
    /// Success message
    pub message: String,
    /// The key that was written
    pub key: String,
}

impl WriteResponse {
    /// Creates a new WriteResponse for `operation` on `key`
    pub fn new(operation: &str, key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("{} '{}' succeeded", operation, key),
            key,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    /// Reads that found a live key
    pub hits: u64,
    /// Reads that found nothing
    pub misses: u64,
    /// Entries removed by the eviction task
    pub evictions: u64,
    /// Entries currently in the map
    pub stored_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            stored_entries: stats.stored_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize, Deserialize)]
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

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}
