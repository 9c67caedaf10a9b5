//! Fixed Window Module
//!
//! Per-identifier fixed-window request counters. A window is a count plus
//! the absolute instant it resets; once that instant passes the slot is
//! treated as absent and the next request opens a fresh window.

use std::collections::HashMap;

use crate::clock::Clock;

// == Window Slot ==
/// Request count for one identifier's current window.
#[derive(Debug, Clone)]
pub struct WindowSlot {
    /// Requests observed in the current window
    pub count: u32,
    /// Absolute instant the window ends (Unix milliseconds)
    pub reset_at_ms: u64,
}

impl WindowSlot {
    /// A window is elapsed once `now >= reset_at_ms`.
    pub fn is_elapsed(&self, now_ms: u64) -> bool {
        now_ms >= self.reset_at_ms
    }
}

// == Rate Limit Decision ==
/// Outcome of a rate-limit check.
///
/// Throttling is a normal result, not an error; callers branch on the
/// variant and translate `Rejected` into an HTTP 429 with the retry hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// Request admitted.
    Allowed {
        /// Requests left in the window after this one
        remaining: u32,
        /// Absolute instant the window ends
        reset_at_ms: u64,
    },
    /// Request refused; retry once the window resets.
    Rejected {
        /// Whole seconds until the window resets, rounded up
        retry_after_secs: u64,
        /// Absolute instant the window ends
        reset_at_ms: u64,
    },
}

impl RateLimitDecision {
    /// True for the `Allowed` variant.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// The window-end instant carried by either variant.
    pub fn reset_at_ms(&self) -> u64 {
        match self {
            Self::Allowed { reset_at_ms, .. } | Self::Rejected { reset_at_ms, .. } => *reset_at_ms,
        }
    }

    /// Requests left in the window; 0 once rejected.
    pub fn remaining(&self) -> u32 {
        match self {
            Self::Allowed { remaining, .. } => *remaining,
            Self::Rejected { .. } => 0,
        }
    }
}

// == Fixed Window Limiter ==
/// Map of identifier → current window, with fixed-window admission.
///
/// Fixed windows reset at absolute boundaries rather than rolling, so a
/// client can burst up to twice the limit across one boundary. That is a
/// documented property of this limiter, kept as-is.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    /// Identifier-keyed window storage
    windows: HashMap<String, WindowSlot>,
    /// Time source for window decisions
    clock: Clock,
}

impl FixedWindowLimiter {
    // == Constructor ==
    /// Creates an empty limiter reading time from `clock`.
    pub fn new(clock: Clock) -> Self {
        Self {
            windows: HashMap::new(),
            clock,
        }
    }

    // == Check ==
    /// Admits or refuses one request for `identifier`.
    ///
    /// A fresh window starts at count 1 when no live window exists. A
    /// refused request does not touch the slot, so sustained overload
    /// cannot extend the window.
    pub fn check(
        &mut self,
        identifier: &str,
        max_requests: u32,
        window_ms: u64,
    ) -> RateLimitDecision {
        let now = self.clock.now_ms();

        match self.windows.get_mut(identifier) {
            Some(slot) if !slot.is_elapsed(now) => {
                if slot.count >= max_requests {
                    RateLimitDecision::Rejected {
                        retry_after_secs: (slot.reset_at_ms - now).div_ceil(1000),
                        reset_at_ms: slot.reset_at_ms,
                    }
                } else {
                    slot.count += 1;
                    RateLimitDecision::Allowed {
                        remaining: max_requests - slot.count,
                        reset_at_ms: slot.reset_at_ms,
                    }
                }
            }
            _ => {
                let reset_at_ms = now.saturating_add(window_ms);
                self.windows.insert(
                    identifier.to_string(),
                    WindowSlot {
                        count: 1,
                        reset_at_ms,
                    },
                );
                RateLimitDecision::Allowed {
                    remaining: max_requests.saturating_sub(1),
                    reset_at_ms,
                }
            }
        }
    }

    // == Snapshot ==
    /// The live window for `identifier`, if any, without consuming a
    /// request. Elapsed windows read as absent.
    pub fn snapshot(&self, identifier: &str) -> Option<&WindowSlot> {
        let now = self.clock.now_ms();
        self.windows
            .get(identifier)
            .filter(|slot| !slot.is_elapsed(now))
    }

    // == Purge Expired ==
    /// Removes every elapsed window, returning the number reclaimed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let before = self.windows.len();
        self.windows.retain(|_, slot| !slot.is_elapsed(now));
        before - self.windows.len()
    }

    // == Length ==
    /// Number of tracked windows, elapsed or not.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    // == Is Empty ==
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}
