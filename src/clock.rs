//! Clock Module
//!
//! Millisecond wall-clock source shared by the cache and limiter stores.
//! Stores read time through a `Clock` handle so tests can drive expiry
//! deterministically instead of sleeping.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

// == Clock ==
/// Source of the current time in Unix milliseconds.
///
/// `System` reads the OS clock. `Manual` holds a shared counter that only
/// moves when told to; clones observe the same instant.
#[derive(Debug, Clone, Default)]
pub enum Clock {
    /// Wall clock via `SystemTime`.
    #[default]
    System,
    /// Manually advanced clock for deterministic tests.
    Manual(Arc<AtomicU64>),
}

impl Clock {
    // == Constructor ==
    /// Creates a manual clock starting at `start_ms`.
    pub fn manual(start_ms: u64) -> Self {
        Self::Manual(Arc::new(AtomicU64::new(start_ms)))
    }

    // == Now ==
    /// Returns the current time in Unix milliseconds.
    pub fn now_ms(&self) -> u64 {
        match self {
            Self::System => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("Time went backwards")
                .as_millis() as u64,
            Self::Manual(instant) => instant.load(Ordering::Relaxed),
        }
    }

    // == Advance ==
    /// Moves a manual clock forward by `ms`. No-op on the system clock.
    pub fn advance(&self, ms: u64) {
        if let Self::Manual(instant) = self {
            instant.fetch_add(ms, Ordering::Relaxed);
        }
    }

    // == Set ==
    /// Pins a manual clock to an absolute instant. No-op on the system clock.
    pub fn set(&self, ms: u64) {
        if let Self::Manual(instant) = self {
            instant.store(ms, Ordering::Relaxed);
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_plausible() {
        let clock = Clock::System;
        // Any instant after 2020-01-01 counts as sane here.
        assert!(clock.now_ms() > 1_577_836_800_000);
    }

    #[test]
    fn test_manual_clock_starts_at_given_instant() {
        let clock = Clock::manual(1_000);
        assert_eq!(clock.now_ms(), 1_000);
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = Clock::manual(0);
        clock.advance(30_000);
        assert_eq!(clock.now_ms(), 30_000);
        clock.advance(1);
        assert_eq!(clock.now_ms(), 30_001);
    }

    #[test]
    fn test_manual_clock_set() {
        let clock = Clock::manual(500);
        clock.set(42);
        assert_eq!(clock.now_ms(), 42);
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = Clock::manual(0);
        let other = clock.clone();
        clock.advance(60_000);
        assert_eq!(other.now_ms(), 60_000);
    }

    #[test]
    fn test_advance_on_system_clock_is_noop() {
        let clock = Clock::System;
        let before = clock.now_ms();
        clock.advance(1_000_000);
        // The system clock only moves with real time.
        assert!(clock.now_ms() < before + 1_000_000);
    }
}
