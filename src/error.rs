//! Error types for the download gate
//!
//! Provides unified error handling using thiserror. Throttling outcomes
//! surface here only at the HTTP boundary; the store APIs themselves are
//! total and return decisions, not errors.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Gate Error Enum ==
/// Unified error type for the download gate service.
#[derive(Error, Debug)]
pub enum GateError {
    /// Client exceeded a request-rate tier
    #[error("Rate limit exceeded, retry in {retry_after_secs}s")]
    Throttled {
        /// Whole seconds until the rejecting window resets
        retry_after_secs: u64,
    },

    /// User spent the daily download allowance
    #[error("Download limit reached, retry in {retry_after_secs}s")]
    QuotaExhausted {
        /// Whole seconds until the allowance window resets
        retry_after_secs: u64,
    },

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        let (status, retry_after) = match &self {
            GateError::Throttled { retry_after_secs }
            | GateError::QuotaExhausted { retry_after_secs } => {
                (StatusCode::TOO_MANY_REQUESTS, Some(*retry_after_secs))
            }
            GateError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, None),
            GateError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, None),
        };

        let body = Json(json!({
            "error": self.to_string(),
            "retry_after_secs": retry_after,
        }));

        let mut response = (status, body).into_response();
        if let Some(secs) = retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}

// == Result Type Alias ==
/// Convenience Result type for the download gate.
pub type Result<T> = std::result::Result<T, GateError>;
