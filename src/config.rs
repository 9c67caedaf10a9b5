//! Configuration Module
//!
//! Handles loading and managing service configuration from environment
//! variables.

use std::env;

use crate::limiter::RateTier;

// == Window Constants ==
/// Length of the per-minute throttle window.
pub const MINUTE_WINDOW_MS: u64 = 60_000;

/// Length of the per-hour throttle window.
pub const HOUR_WINDOW_MS: u64 = 3_600_000;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults. The two window lengths are fixed; only the request ceilings,
/// TTLs and intervals are tunable.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Requests admitted per client per minute
    pub minute_limit: u32,
    /// Requests admitted per client per hour
    pub hour_limit: u32,
    /// TTL for memoized download-status payloads, in milliseconds
    pub status_cache_ttl_ms: u64,
    /// Background sweep interval in seconds
    pub sweep_interval_secs: u64,
    /// Downloads granted per user per day
    pub daily_download_limit: u32,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `MINUTE_LIMIT` - Requests per client per minute (default: 20)
    /// - `HOUR_LIMIT` - Requests per client per hour (default: 100)
    /// - `STATUS_CACHE_TTL_MS` - Status memoization TTL (default: 30000)
    /// - `SWEEP_INTERVAL_SECS` - Sweep frequency in seconds (default: 60)
    /// - `DAILY_DOWNLOAD_LIMIT` - Downloads per user per day (default: 50)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            minute_limit: env::var("MINUTE_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20),
            hour_limit: env::var("HOUR_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
            status_cache_ttl_ms: env::var("STATUS_CACHE_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30_000),
            sweep_interval_secs: env::var("SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            daily_download_limit: env::var("DAILY_DOWNLOAD_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(50),
        }
    }

    // == Download Tiers ==
    /// The ordered throttle tiers for the download endpoints: the minute
    /// tier is checked first, the hour tier only if it passes.
    pub fn download_tiers(&self) -> Vec<RateTier> {
        vec![
            RateTier {
                name: "minute",
                max_requests: self.minute_limit,
                window_ms: MINUTE_WINDOW_MS,
            },
            RateTier {
                name: "hour",
                max_requests: self.hour_limit,
                window_ms: HOUR_WINDOW_MS,
            },
        ]
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            minute_limit: 20,
            hour_limit: 100,
            status_cache_ttl_ms: 30_000,
            sweep_interval_secs: 60,
            daily_download_limit: 50,
        }
    }
}
