//! API Handlers
//!
//! HTTP request handlers for each download gate endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use tracing::{debug, warn};

use crate::api::identity::client_identifier;
use crate::cache::{limit_key, status_key, TtlCache, STATUS_KEY_PREFIX};
use crate::clock::Clock;
use crate::config::Config;
use crate::error::{GateError, Result};
use crate::ledger::{DownloadLedger, DownloadStatus};
use crate::limiter::{RateLimitDecision, TieredLimiter};
use crate::models::{
    validate_user_id, DownloadResponse, DownloadStatusResponse, FlushResponse, HealthResponse,
    StatsResponse, StatusQuery,
};

// == Cached Value ==
/// Payloads the status cache holds, one variant per key shape.
#[derive(Debug, Clone)]
pub enum CachedValue {
    /// `download_status:<userId>` entries
    Status(DownloadStatus),
    /// `download_limit:<userId>` entries
    Limit(u32),
}

/// Application state shared across all handlers.
///
/// Each store sits behind its own `Arc<RwLock<_>>`; handlers take at most
/// one lock at a time. Compound read-modify-write sequences inside the
/// stores run under a single write-lock acquisition, which preserves the
/// stores' single-writer invariants on the multi-threaded runtime.
#[derive(Clone)]
pub struct AppState {
    /// Memoized download-status payloads
    pub cache: Arc<RwLock<TtlCache<CachedValue>>>,
    /// Per-client request throttle
    pub limiter: Arc<RwLock<TieredLimiter>>,
    /// Per-user daily allowance
    pub ledger: Arc<RwLock<DownloadLedger>>,
    /// TTL for memoized status payloads
    pub status_ttl_ms: u64,
}

impl AppState {
    /// Creates a new AppState from already-built stores.
    pub fn new(
        cache: TtlCache<CachedValue>,
        limiter: TieredLimiter,
        ledger: DownloadLedger,
        status_ttl_ms: u64,
    ) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            limiter: Arc::new(RwLock::new(limiter)),
            ledger: Arc::new(RwLock::new(ledger)),
            status_ttl_ms,
        }
    }

    /// Creates a new AppState from configuration, reading time from
    /// `clock`. All three stores share the clock.
    pub fn with_clock(config: &Config, clock: Clock) -> Self {
        Self::new(
            TtlCache::new(clock.clone()),
            TieredLimiter::new(config.download_tiers(), clock.clone()),
            DownloadLedger::new(config.daily_download_limit, clock),
            config.status_cache_ttl_ms,
        )
    }

    /// Creates a new AppState from configuration on the system clock.
    pub fn from_config(config: &Config) -> Self {
        Self::with_clock(config, Clock::System)
    }
}

// == Limit Resolution ==
/// Resolves a user's effective allowance through the `download_limit:`
/// cache key, recomputing from the ledger on a miss.
async fn resolve_limit(state: &AppState, user_id: &str) -> u32 {
    let key = limit_key(user_id);

    if let Some(CachedValue::Limit(limit)) = state.cache.write().await.get(&key) {
        return limit;
    }

    let limit = state.ledger.read().await.limit_for(user_id);
    state
        .cache
        .write()
        .await
        .insert(key, CachedValue::Limit(limit), state.status_ttl_ms);
    limit
}

/// Handler for POST /downloads/:user_id
///
/// The gate itself: throttles by client identity first, then charges the
/// user's daily allowance, then invalidates the memoized status so the
/// next poll sees the new count.
pub async fn download_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<DownloadResponse>> {
    if let Some(error_msg) = validate_user_id(&user_id) {
        return Err(GateError::InvalidRequest(error_msg));
    }

    let client = client_identifier(&headers);

    // Reject early on the request-rate tiers.
    let decision = state.limiter.write().await.check(&client);
    let (requests_remaining, window_resets_at_ms) = match decision {
        RateLimitDecision::Rejected {
            retry_after_secs, ..
        } => {
            warn!(client = %client, retry_after_secs, "request throttled");
            return Err(GateError::Throttled { retry_after_secs });
        }
        RateLimitDecision::Allowed {
            remaining,
            reset_at_ms,
        } => (remaining, reset_at_ms),
    };

    // Charge the daily allowance.
    let limit = resolve_limit(&state, &user_id).await;
    let downloads_remaining = match state.ledger.write().await.record(&user_id, limit) {
        RateLimitDecision::Rejected {
            retry_after_secs, ..
        } => {
            debug!(user_id = %user_id, "daily allowance exhausted");
            return Err(GateError::QuotaExhausted { retry_after_secs });
        }
        RateLimitDecision::Allowed { remaining, .. } => remaining,
    };

    // The memoized status is stale as of this download.
    state.cache.write().await.remove(&status_key(&user_id));

    Ok(Json(DownloadResponse::new(
        user_id,
        downloads_remaining,
        requests_remaining,
        window_resets_at_ms,
    )))
}

/// Handler for GET /downloads/:user_id/status
///
/// Serves the memoized status when fresh; otherwise recomputes from the
/// ledger and stores the result for the configured TTL. A `t` query
/// parameter drops the memoized entry before the lookup.
pub async fn status_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<DownloadStatusResponse>> {
    if let Some(error_msg) = validate_user_id(&user_id) {
        return Err(GateError::InvalidRequest(error_msg));
    }

    let key = status_key(&user_id);

    {
        let mut cache = state.cache.write().await;
        if query.forces_refresh() {
            cache.remove(&key);
        } else if let Some(CachedValue::Status(status)) = cache.get(&key) {
            return Ok(Json(DownloadStatusResponse::from_status(&user_id, &status)));
        }
    }

    let limit = resolve_limit(&state, &user_id).await;
    let status = state.ledger.read().await.status(&user_id, limit);
    state
        .cache
        .write()
        .await
        .insert(key, CachedValue::Status(status.clone()), state.status_ttl_ms);

    Ok(Json(DownloadStatusResponse::from_status(&user_id, &status)))
}

/// Handler for DELETE /cache/status
///
/// Drops every memoized `download_status:` entry.
pub async fn flush_status_handler(State(state): State<AppState>) -> Json<FlushResponse> {
    let removed = state.cache.write().await.remove_prefix(STATUS_KEY_PREFIX);
    Json(FlushResponse::new("download_status", removed))
}

/// Handler for DELETE /cache
///
/// Clears the whole status cache.
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<FlushResponse> {
    let mut cache = state.cache.write().await;
    let removed = cache.len();
    cache.clear();
    Json(FlushResponse::new("cache", removed))
}

/// Handler for GET /stats
///
/// Returns cache, limiter and ledger statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache_stats = state.cache.read().await.stats();
    let limiter_stats = state.limiter.read().await.stats();
    let ledger_users = state.ledger.read().await.tracked_users();

    Json(StatsResponse::new(cache_stats, limiter_stats, ledger_users))
}

/// Handler for GET /health
///
/// Returns health status of the service.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
