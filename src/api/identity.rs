//! Client Identity Module
//!
//! Derives the throttling identifier for a request from proxy headers.
//! The order is fixed: first address in `x-forwarded-for`, then
//! `x-real-ip`, then the shared `"unknown"` sentinel. Clients arriving
//! without either header are throttled as one bucket.

use axum::http::HeaderMap;

// == Constants ==
/// Identifier assigned to requests carrying no usable client headers.
pub const UNKNOWN_CLIENT: &str = "unknown";

// == Client Identifier ==
/// Extracts the throttling identifier from request headers.
pub fn client_identifier(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }

    UNKNOWN_CLIENT.to_string()
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn test_forwarded_for_single_address() {
        let map = headers(&[("x-forwarded-for", "1.2.3.4")]);
        assert_eq!(client_identifier(&map), "1.2.3.4");
    }

    #[test]
    fn test_forwarded_for_takes_first_of_chain() {
        let map = headers(&[("x-forwarded-for", "1.2.3.4, 10.0.0.1, 10.0.0.2")]);
        assert_eq!(client_identifier(&map), "1.2.3.4");
    }

    #[test]
    fn test_forwarded_for_trims_whitespace() {
        let map = headers(&[("x-forwarded-for", "  1.2.3.4 , 10.0.0.1")]);
        assert_eq!(client_identifier(&map), "1.2.3.4");
    }

    #[test]
    fn test_real_ip_fallback() {
        let map = headers(&[("x-real-ip", "5.6.7.8")]);
        assert_eq!(client_identifier(&map), "5.6.7.8");
    }

    #[test]
    fn test_forwarded_for_wins_over_real_ip() {
        let map = headers(&[("x-forwarded-for", "1.2.3.4"), ("x-real-ip", "5.6.7.8")]);
        assert_eq!(client_identifier(&map), "1.2.3.4");
    }

    #[test]
    fn test_empty_forwarded_for_falls_through() {
        let map = headers(&[("x-forwarded-for", "  "), ("x-real-ip", "5.6.7.8")]);
        assert_eq!(client_identifier(&map), "5.6.7.8");
    }

    #[test]
    fn test_no_headers_shares_unknown_bucket() {
        let map = HeaderMap::new();
        assert_eq!(client_identifier(&map), UNKNOWN_CLIENT);
    }
}
