//! Expiry Sweep Task
//!
//! Background task that periodically reclaims expired cache entries and
//! elapsed throttle windows. Correctness never depends on it — lazy
//! eviction on lookup is authoritative — the sweep only bounds memory
//! held by keys that are never touched again.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::AppState;

/// Spawns the periodic sweep over all three stores.
///
/// Each pass takes the stores' write locks one at a time, never across
/// the sleep. The returned handle is aborted during graceful shutdown.
///
/// # Arguments
/// * `state` - Shared application state holding the stores
/// * `sweep_interval_secs` - Interval in seconds between passes
pub fn spawn_sweep_task(state: AppState, sweep_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(sweep_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting expiry sweep task with interval of {} seconds",
            sweep_interval_secs
        );

        loop {
            // Sleep for the configured interval
            tokio::time::sleep(interval).await;

            let cache_removed = state.cache.write().await.purge_expired();
            let windows_removed = state.limiter.write().await.purge_expired();
            let ledger_removed = state.ledger.write().await.purge_expired();

            let total = cache_removed + windows_removed + ledger_removed;
            if total > 0 {
                info!(
                    cache_removed,
                    windows_removed, ledger_removed, "expiry sweep reclaimed entries"
                );
            } else {
                debug!("expiry sweep found nothing to reclaim");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::CachedValue;
    use crate::clock::Clock;
    use crate::config::Config;

    fn manual_state() -> (AppState, Clock) {
        let clock = Clock::manual(0);
        (
            AppState::with_clock(&Config::default(), clock.clone()),
            clock,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_reclaims_expired_entries() {
        let (state, clock) = manual_state();

        state
            .cache
            .write()
            .await
            .insert("download_limit:alice", CachedValue::Limit(50), 30_000);
        state.limiter.write().await.check("1.2.3.4");
        clock.advance(3_600_000);

        let handle = spawn_sweep_task(state.clone(), 60);

        // One paused-clock minute triggers a sweep pass.
        tokio::time::sleep(Duration::from_secs(61)).await;

        assert!(state.cache.read().await.is_empty());
        assert_eq!(state.limiter.read().await.stats().tracked_windows, 0);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_preserves_live_entries() {
        let (state, clock) = manual_state();

        state
            .cache
            .write()
            .await
            .insert("download_limit:alice", CachedValue::Limit(50), 30_000);
        clock.advance(1_000);

        let handle = spawn_sweep_task(state.clone(), 60);
        tokio::time::sleep(Duration::from_secs(61)).await;

        assert_eq!(state.cache.read().await.len(), 1);

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_can_be_aborted() {
        let (state, _clock) = manual_state();

        let handle = spawn_sweep_task(state, 60);

        handle.abort();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
