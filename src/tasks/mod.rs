//! Background Tasks Module
//!
//! Contains background tasks that run periodically during service
//! operation.
//!
//! # Tasks
//! - Expiry sweep: reclaims expired cache entries and elapsed throttle
//!   windows at configured intervals

mod sweep;

pub use sweep::spawn_sweep_task;
