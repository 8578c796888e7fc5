//! PSK guard for the diagnostics endpoint.
//!
//! Implements constant-time comparison to mitigate timing attacks.

use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;

use crate::errors::AppError;

/// Header name for the diagnostics key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// PSK authentication layer function that takes the expected PSK as a parameter.
pub async fn psk_auth_layer(
    expected_psk: Option<String>,
    request: Request,
    next: Next,
) -> Response {
    // No PSK configured: open access (startup already warned)
    let Some(expected) = expected_psk else {
        return next.run(request).await;
    };

    match provided_key(&request) {
        Some(provided) if constant_time_compare(&provided, &expected) => next.run(request).await,
        Some(_) => AppError::Unauthorized("Invalid API key".to_string()).into_response(),
        None => AppError::Unauthorized("Missing or invalid API key".to_string()).into_response(),
    }
}

/// Key from `x-api-key`, falling back to a bearer token.
fn provided_key(request: &Request) -> Option<String> {
    let headers = request.headers();
    headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.strip_prefix("Bearer "))
        })
        .map(str::to_string)
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_compare_equal() {
        assert!(constant_time_compare("diag-key-123", "diag-key-123"));
    }

    #[test]
    fn test_constant_time_compare_not_equal() {
        assert!(!constant_time_compare("diag-key-123", "diag-key-124"));
    }

    #[test]
    fn test_constant_time_compare_different_lengths() {
        assert!(!constant_time_compare("short", "much-longer-key"));
    }

    #[test]
    fn test_provided_key_prefers_header_then_bearer() {
        let request = Request::builder()
            .header(API_KEY_HEADER, "from-header")
            .header(header::AUTHORIZATION, "Bearer from-bearer")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(provided_key(&request).as_deref(), Some("from-header"));

        let request = Request::builder()
            .header(header::AUTHORIZATION, "Bearer from-bearer")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(provided_key(&request).as_deref(), Some("from-bearer"));

        let request = Request::builder()
            .header(header::AUTHORIZATION, "Basic abc")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(provided_key(&request), None);
    }
}
