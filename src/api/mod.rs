//! API Module
//!
//! HTTP handlers and routing for the download gate REST API.
//!
//! # Endpoints
//! - `POST /downloads/:user_id` - Record a download through the gate
//! - `GET /downloads/:user_id/status` - Memoized allowance status
//! - `DELETE /cache/status` - Drop all memoized status entries
//! - `DELETE /cache` - Clear the whole cache
//! - `GET /stats` - Cache, limiter and ledger statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod identity;
pub mod routes;

pub use handlers::*;
pub use identity::{client_identifier, UNKNOWN_CLIENT};
pub use routes::create_router;
