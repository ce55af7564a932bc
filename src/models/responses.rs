//! Response DTOs for the record service API
//!
//! Defines the structure of outgoing HTTP response bodies. Records themselves
//! are serialized straight from `Parent` / `Child`.

use serde::Serialize;

use crate::cache::ListCacheStats;

/// Response body for DELETE /parents/:id and DELETE /children/:id
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub detail: String,
}

impl DeleteResponse {
    pub fn parent(id: i64) -> Self {
        Self {
            detail: format!("Parent with ID {} deleted successfully", id),
        }
    }

    pub fn child(id: i64) -> Self {
        Self {
            detail: format!("Child with ID {} deleted successfully", id),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// List reads served from the cache
    pub hits: u64,
    /// List reads that went to the store
    pub misses: u64,
    /// Pages written back after a miss
    pub write_backs: u64,
    /// Per-kind invalidations performed
    pub invalidations: u64,
    /// Cache failures absorbed by the cache layer
    pub cache_errors: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<ListCacheStats> for StatsResponse {
    fn from(stats: ListCacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            write_backs: stats.write_backs,
            invalidations: stats.invalidations,
            cache_errors: stats.cache_errors,
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

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
