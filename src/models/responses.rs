//! Response DTOs for the download gate API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::ledger::DownloadStatus;
use crate::limiter::LimiterStats;

/// Response body for a granted download (POST /downloads/:user_id)
#[derive(Debug, Clone, Serialize)]
pub struct DownloadResponse {
    /// Success message
    pub message: String,
    /// The user the download was recorded for
    pub user_id: String,
    /// Downloads left in the user's daily allowance
    pub downloads_remaining: u32,
    /// Requests left before the client is throttled
    pub requests_remaining: u32,
    /// When the tightest throttle window resets (Unix milliseconds)
    pub window_resets_at_ms: u64,
}

impl DownloadResponse {
    /// Creates a new DownloadResponse
    pub fn new(
        user_id: impl Into<String>,
        downloads_remaining: u32,
        requests_remaining: u32,
        window_resets_at_ms: u64,
    ) -> Self {
        let user_id = user_id.into();
        Self {
            message: format!("Download recorded for '{}'", user_id),
            user_id,
            downloads_remaining,
            requests_remaining,
            window_resets_at_ms,
        }
    }
}

/// Response body for the status endpoint
/// (GET /downloads/:user_id/status)
#[derive(Debug, Clone, Serialize)]
pub struct DownloadStatusResponse {
    /// The user the status describes
    pub user_id: String,
    /// Downloads consumed in the current window
    pub used: u32,
    /// The user's allowance per window
    pub limit: u32,
    /// Downloads left in the current window
    pub remaining: u32,
    /// When the allowance window resets; null if no live window
    pub resets_at_ms: Option<u64>,
}

impl DownloadStatusResponse {
    /// Creates a response from a ledger status view.
    pub fn from_status(user_id: impl Into<String>, status: &DownloadStatus) -> Self {
        Self {
            user_id: user_id.into(),
            used: status.used,
            limit: status.limit,
            remaining: status.remaining,
            resets_at_ms: status.resets_at_ms,
        }
    }
}

/// Response body for cache invalidation endpoints
/// (DELETE /cache, DELETE /cache/status)
#[derive(Debug, Clone, Serialize)]
pub struct FlushResponse {
    /// Success message
    pub message: String,
    /// Number of entries removed
    pub removed: usize,
}

impl FlushResponse {
    /// Creates a new FlushResponse
    pub fn new(what: &str, removed: usize) -> Self {
        Self {
            message: format!("Flushed {} {} entries", removed, what),
            removed,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Status-cache counters
    pub cache: CacheStats,
    /// Derived cache hit rate
    pub cache_hit_rate: f64,
    /// Throttle counters
    pub limiter: LimiterStats,
    /// Users with a tracked allowance window
    pub ledger_users: usize,
}

impl StatsResponse {
    /// Creates a new StatsResponse from component statistics
    pub fn new(cache: CacheStats, limiter: LimiterStats, ledger_users: usize) -> Self {
        let cache_hit_rate = cache.hit_rate();
        Self {
            cache,
            cache_hit_rate,
            limiter,
            ledger_users,
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
