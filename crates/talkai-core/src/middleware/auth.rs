//! Inbound bearer authentication.

use std::sync::Arc;

use axum::{
    extract::Request,
    extract::State,
    http::header,
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;
use talkai_types::{GatewayConfig, GatewayError};

use crate::handlers::ApiError;

fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

fn is_health_check(path: &str) -> bool {
    path == "/health" || path == "/healthz"
}

/// Gate every request behind the configured inbound key set.
///
/// With an empty key set the gateway runs open and everything passes.
/// Health checks and CORS preflights are always exempt. The credential must
/// arrive as `Authorization: Bearer <key>` and is compared in constant time
/// against each configured key.
pub async fn auth_middleware(
    State(config): State<Arc<GatewayConfig>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let method = request.method().clone();
    let path = request.uri().path();

    let health = is_health_check(path);
    if health {
        tracing::trace!("Health: {} {}", method, path);
    } else {
        tracing::info!("Request: {} {}", method, path);
    }

    if config.auth.open_mode() || health || method == axum::http::Method::OPTIONS {
        return Ok(next.run(request).await);
    }

    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "));

    let authorized = presented.is_some_and(|candidate| {
        config.auth.inbound_keys.iter().any(|key| constant_time_compare(candidate, key))
    });

    if authorized {
        Ok(next.run(request).await)
    } else {
        tracing::warn!("Rejected request to {} with missing or unknown API key", path);
        Err(ApiError::from(GatewayError::Unauthorized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("abc", "abc"));
        assert!(!constant_time_compare("abc", "abd"));
        assert!(!constant_time_compare("ab", "abc"));
    }

    #[test]
    fn test_health_paths() {
        assert!(is_health_check("/health"));
        assert!(is_health_check("/healthz"));
        assert!(!is_health_check("/v1/models"));
    }
}
