//! Limiter Module
//!
//! Fixed-window request throttling for the download endpoints: a single
//! window store plus the ordered two-tier composition enforced per client.

mod tiered;
mod window;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use tiered::{LimiterStats, RateTier, TieredLimiter};
pub use window::{FixedWindowLimiter, RateLimitDecision, WindowSlot};
