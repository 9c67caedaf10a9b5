//! Request and Response models for the download gate API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{validate_user_id, StatusQuery};
pub use responses::{
    DownloadResponse, DownloadStatusResponse, FlushResponse, HealthResponse, StatsResponse,
};
