//! Request DTOs for the download gate API
//!
//! Defines the structure of incoming query parameters and path-level
//! validation.

use serde::Deserialize;

// == Constants ==
/// Maximum accepted user-id length in characters
pub const MAX_USER_ID_LENGTH: usize = 128;

/// Query parameters for the status endpoint
/// (GET /downloads/:user_id/status)
///
/// The `t` parameter is a cache-buster: its mere presence forces the
/// memoized status to be dropped and recomputed. Its value is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusQuery {
    /// Cache-bypass marker; any value forces a fresh computation
    #[serde(default)]
    pub t: Option<String>,
}

impl StatusQuery {
    /// True when the caller asked for a fresh computation.
    pub fn forces_refresh(&self) -> bool {
        self.t.is_some()
    }
}

// == User Id Validation ==
/// Validates a path-supplied user id.
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_user_id(user_id: &str) -> Option<String> {
    if user_id.is_empty() {
        return Some("User id cannot be empty".to_string());
    }
    if user_id.len() > MAX_USER_ID_LENGTH {
        return Some(format!(
            "User id exceeds maximum length of {} characters",
            MAX_USER_ID_LENGTH
        ));
    }
    None
}
