//! Cache Store Module
//!
//! Main TTL cache engine: HashMap storage with absolute-expiry entries,
//! lazy reclamation on lookup and a full-scan purge driven by the
//! background sweep task.

use std::collections::HashMap;

use crate::cache::{CacheEntry, CacheStats};
use crate::clock::Clock;

// == TTL Cache ==
/// In-memory key/value store with per-entry time-to-live.
///
/// All operations are total: a lookup that finds nothing (or something
/// expired) is a miss, not an error. Lazy eviction on `get` is the
/// authoritative reclamation path; [`TtlCache::purge_expired`] only exists
/// to bound memory between lookups.
#[derive(Debug)]
pub struct TtlCache<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Performance statistics
    stats: CacheStats,
    /// Time source for expiry decisions
    clock: Clock,
}

impl<V: Clone> TtlCache<V> {
    // == Constructor ==
    /// Creates an empty cache reading time from `clock`.
    pub fn new(clock: Clock) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            clock,
        }
    }

    // == Insert ==
    /// Stores `value` under `key` for `ttl_ms` milliseconds.
    ///
    /// An existing entry for the key is silently superseded (last write
    /// wins). A zero TTL is accepted and yields an entry that is expired
    /// on its next read.
    pub fn insert(&mut self, key: impl Into<String>, value: V, ttl_ms: u64) {
        let now = self.clock.now_ms();
        self.entries
            .insert(key.into(), CacheEntry::new(value, now, ttl_ms));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Returns the stored value if present and not expired.
    ///
    /// Finding an expired entry removes it before reporting the miss, so
    /// no value is ever served past its expiry even if the sweep has not
    /// run. A clean hit has no side effect beyond the hit counter.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();
        match self.entries.get(key) {
            Some(entry) if entry.is_expired(now) => {
                self.entries.remove(key);
                self.stats.record_expirations(1);
                self.stats.set_total_entries(self.entries.len());
                self.stats.record_miss();
                None
            }
            Some(entry) => {
                let value = entry.value.clone();
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Remove ==
    /// Removes an entry, returning whether it was present. Idempotent.
    pub fn remove(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Remove By Prefix ==
    /// Removes every key starting with `prefix`, returning the count.
    ///
    /// Full scan, no index; the store holds tens to low hundreds of
    /// entries.
    pub fn remove_prefix(&mut self, prefix: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before - self.entries.len();
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Clear ==
    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats.set_total_entries(0);
    }

    // == Purge Expired ==
    /// Removes every expired entry, returning the number reclaimed.
    ///
    /// Called by the periodic sweep. Races benignly with foreground
    /// lookups: a `get` may reclaim the same entry first.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before - self.entries.len();
        self.stats.record_expirations(removed as u64);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
