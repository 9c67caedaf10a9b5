//! Tiered Limiter Module
//!
//! Composes independent fixed windows into one ordered check: tiers are
//! evaluated in sequence and the first rejection wins. When every tier
//! admits the request, the reported view is the most conservative one —
//! the smallest remaining count and the earliest reset.

use serde::Serialize;

use crate::clock::Clock;
use crate::limiter::{FixedWindowLimiter, RateLimitDecision, WindowSlot};

// == Rate Tier ==
/// One enforced window: a label, a request ceiling and a window length.
///
/// The label namespaces the tier's slots inside the shared window store,
/// producing keys of the form `<identifier>:<label>`.
#[derive(Debug, Clone, Copy)]
pub struct RateTier {
    /// Tier label, e.g. "minute"
    pub name: &'static str,
    /// Maximum requests admitted per window
    pub max_requests: u32,
    /// Window length in milliseconds
    pub window_ms: u64,
}

// == Limiter Stats ==
/// Composite-level counters for the stats endpoint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LimiterStats {
    /// Requests admitted by every tier
    pub allowed: u64,
    /// Requests refused by some tier
    pub throttled: u64,
    /// Windows currently tracked across all tiers
    pub tracked_windows: usize,
}

// == Tiered Limiter ==
/// Ordered fixed-window tiers over one shared slot store.
#[derive(Debug)]
pub struct TieredLimiter {
    windows: FixedWindowLimiter,
    tiers: Vec<RateTier>,
    allowed: u64,
    throttled: u64,
}

impl TieredLimiter {
    // == Constructor ==
    /// Creates a limiter enforcing `tiers` in the given order.
    pub fn new(tiers: Vec<RateTier>, clock: Clock) -> Self {
        Self {
            windows: FixedWindowLimiter::new(clock),
            tiers,
            allowed: 0,
            throttled: 0,
        }
    }

    // == Check ==
    /// Runs one request through every tier in order.
    ///
    /// Stops at the first rejection and returns that tier's result
    /// verbatim; the request is not charged against later tiers, so a
    /// minute-level rejection leaves the hour counter untouched.
    pub fn check(&mut self, identifier: &str) -> RateLimitDecision {
        let mut min_remaining = u32::MAX;
        let mut earliest_reset = u64::MAX;

        for tier in &self.tiers {
            let key = format!("{identifier}:{}", tier.name);
            match self.windows.check(&key, tier.max_requests, tier.window_ms) {
                rejected @ RateLimitDecision::Rejected { .. } => {
                    self.throttled += 1;
                    return rejected;
                }
                RateLimitDecision::Allowed {
                    remaining,
                    reset_at_ms,
                } => {
                    min_remaining = min_remaining.min(remaining);
                    earliest_reset = earliest_reset.min(reset_at_ms);
                }
            }
        }

        self.allowed += 1;
        RateLimitDecision::Allowed {
            remaining: min_remaining,
            reset_at_ms: earliest_reset,
        }
    }

    // == Snapshot ==
    /// The live window for one tier of `identifier`, without consuming a
    /// request.
    pub fn snapshot(&self, identifier: &str, tier_name: &str) -> Option<&WindowSlot> {
        self.windows.snapshot(&format!("{identifier}:{tier_name}"))
    }

    // == Purge Expired ==
    /// Drops elapsed windows across all tiers, returning the count.
    pub fn purge_expired(&mut self) -> usize {
        self.windows.purge_expired()
    }

    // == Stats ==
    /// Returns composite counters plus the tracked-window count.
    pub fn stats(&self) -> LimiterStats {
        LimiterStats {
            allowed: self.allowed,
            throttled: self.throttled,
            tracked_windows: self.windows.len(),
        }
    }
}
