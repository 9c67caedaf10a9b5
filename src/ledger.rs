//! Download Ledger Module
//!
//! Per-user daily download allowance. Built on the same fixed-window
//! counter as the IP limiter, with a 24-hour window: recording a download
//! consumes one unit, and the status read reports usage without consuming.
//!
//! The effective limit is resolved separately (and memoized by callers
//! under its own cache key) and passed in, so a user's plan can change
//! without touching recorded usage.

use serde::Serialize;

use crate::clock::Clock;
use crate::limiter::{FixedWindowLimiter, RateLimitDecision};

// == Constants ==
/// Allowance window length: one day in milliseconds.
pub const DAY_MS: u64 = 86_400_000;

// == Download Status ==
/// Point-in-time view of a user's allowance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadStatus {
    /// Downloads consumed in the current window
    pub used: u32,
    /// The user's allowance per window
    pub limit: u32,
    /// Downloads left in the current window
    pub remaining: u32,
    /// When the window resets; None if the user has no live window
    pub resets_at_ms: Option<u64>,
}

// == Download Ledger ==
/// Tracks per-user download counts against a daily allowance.
#[derive(Debug)]
pub struct DownloadLedger {
    windows: FixedWindowLimiter,
    default_limit: u32,
}

impl DownloadLedger {
    // == Constructor ==
    /// Creates a ledger with `default_limit` downloads per user per day.
    pub fn new(default_limit: u32, clock: Clock) -> Self {
        Self {
            windows: FixedWindowLimiter::new(clock),
            default_limit,
        }
    }

    // == Limit For ==
    /// Resolves the effective allowance for `user_id`.
    ///
    /// Uniform today; this is the seam where per-plan limits from the
    /// marketplace backend plug in.
    pub fn limit_for(&self, _user_id: &str) -> u32 {
        self.default_limit
    }

    // == Record ==
    /// Consumes one download for `user_id` against `limit`, refusing once
    /// the daily allowance is spent.
    pub fn record(&mut self, user_id: &str, limit: u32) -> RateLimitDecision {
        self.windows.check(user_id, limit, DAY_MS)
    }

    // == Status ==
    /// Reports usage for `user_id` against `limit` without consuming a
    /// download.
    ///
    /// This is the computation the status cache memoizes; in the full
    /// marketplace it also folds in subscription data from the backend.
    pub fn status(&self, user_id: &str, limit: u32) -> DownloadStatus {
        match self.windows.snapshot(user_id) {
            Some(slot) => DownloadStatus {
                used: slot.count,
                limit,
                remaining: limit.saturating_sub(slot.count),
                resets_at_ms: Some(slot.reset_at_ms),
            },
            None => DownloadStatus {
                used: 0,
                limit,
                remaining: limit,
                resets_at_ms: None,
            },
        }
    }

    // == Purge Expired ==
    /// Drops elapsed allowance windows, returning the count.
    pub fn purge_expired(&mut self) -> usize {
        self.windows.purge_expired()
    }

    // == Tracked Users ==
    /// Number of users with a tracked window, elapsed or not.
    pub fn tracked_users(&self) -> usize {
        self.windows.len()
    }
}
