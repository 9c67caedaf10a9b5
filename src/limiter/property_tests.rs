//! Property-Based Tests for Limiter Module
//!
//! Uses proptest to verify the fixed-window admission bound over arbitrary
//! limits and request volumes.

use proptest::prelude::*;

use crate::clock::Clock;
use crate::limiter::FixedWindowLimiter;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Within one window, exactly `max` of any request volume is admitted,
    // and `remaining` decreases strictly to zero.
    #[test]
    fn prop_admission_bound(max in 1u32..50, extra in 0u32..50) {
        let mut limiter = FixedWindowLimiter::new(Clock::manual(0));
        let mut admitted = 0u32;
        let mut last_remaining: Option<u32> = None;

        for _ in 0..(max + extra) {
            let decision = limiter.check("client", max, 60_000);
            if decision.is_allowed() {
                admitted += 1;
                if let Some(prev) = last_remaining {
                    prop_assert_eq!(decision.remaining(), prev - 1, "remaining must step down by 1");
                }
                last_remaining = Some(decision.remaining());
            }
        }

        prop_assert_eq!(admitted, max);
        prop_assert_eq!(last_remaining, Some(0));
    }

    // After the window elapses, the same identifier starts over at a full
    // window regardless of how hard it was throttled before.
    #[test]
    fn prop_reset_restores_full_window(max in 1u32..50, window_ms in 1u64..100_000) {
        let clock = Clock::manual(0);
        let mut limiter = FixedWindowLimiter::new(clock.clone());

        for _ in 0..(max * 2) {
            limiter.check("client", max, window_ms);
        }
        clock.advance(window_ms);

        let decision = limiter.check("client", max, window_ms);
        prop_assert!(decision.is_allowed());
        prop_assert_eq!(decision.remaining(), max - 1);
    }

    // Rejections never change the window: the reset instant observed on
    // the first rejection holds for all later ones in the same window.
    #[test]
    fn prop_rejections_do_not_extend_window(max in 1u32..20, rejections in 1usize..30) {
        let mut limiter = FixedWindowLimiter::new(Clock::manual(0));

        for _ in 0..max {
            limiter.check("client", max, 60_000);
        }

        let first = limiter.check("client", max, 60_000);
        prop_assert!(!first.is_allowed());
        for _ in 0..rejections {
            let next = limiter.check("client", max, 60_000);
            prop_assert_eq!(next.reset_at_ms(), first.reset_at_ms());
        }
    }
}
