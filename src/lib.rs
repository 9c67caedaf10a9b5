//! Download Gate - request throttling and status caching for a
//! digital-assets marketplace
//!
//! Provides a two-tier fixed-window rate limiter keyed by client IP and a
//! TTL cache memoizing per-user download-status lookups, behind a small
//! HTTP API.

pub mod api;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod ledger;
pub mod limiter;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use clock::Clock;
pub use config::Config;
pub use tasks::spawn_sweep_task;
