//! API Middleware
//!
//! The request pipeline stages: CORS, method allowlist, authentication, and
//! request logging. Stages run outermost-first in exactly that order and each
//! may short-circuit with an enveloped error; CORS headers are applied to
//! every response, including errors produced further in.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::bearer_token;
use crate::error::AppError;
use crate::state::AppState;

pub const CORS_ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const CORS_ALLOW_HEADERS: &str = "Content-Type, Authorization, X-Requested-With";

/// Headers that should be masked in logs
const SENSITIVE_HEADERS: &[&str] = &["authorization", "cookie", "set-cookie"];

// =========================================================================
// CORS
// =========================================================================

/// CORS stage: headers on every response; preflight terminates with 200.
pub async fn cors_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !state.config.cors_enabled {
        return next.run(request).await;
    }

    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(request).await
    };

    apply_cors_headers(response.headers_mut(), &state.config.cors_allow_origin);
    response
}

fn apply_cors_headers(headers: &mut HeaderMap, origin: &str) {
    let origin = HeaderValue::from_str(origin).unwrap_or_else(|_| HeaderValue::from_static("*"));
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(CORS_ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(CORS_ALLOW_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
}

// =========================================================================
// Method allowlist
// =========================================================================

/// Allowed-verb stage: anything outside the route's set is rejected with 405
/// and the allowed verbs in the error details.
pub async fn method_guard(
    State(allowed): State<&'static [&'static str]>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if allowed.iter().any(|verb| request.method().as_str() == *verb) {
        next.run(request).await
    } else {
        AppError::MethodNotAllowed { allowed }.into_response()
    }
}

// =========================================================================
// Authentication
// =========================================================================

/// Authentication stage: resolves the bearer credential through the
/// configured resolver and attaches the caller identity to the request.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let resolved = bearer_token(request.headers())
        .and_then(|token| state.credentials.resolve(token));

    let user = match resolved {
        Ok(user) => user,
        Err(reason) => {
            tracing::debug!(%reason, "rejecting unauthenticated request");
            return Err(AppError::Unauthorized(reason).into_response());
        }
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

// =========================================================================
// Request logging
// =========================================================================

/// Mask sensitive headers for logging
pub fn mask_headers_for_logging(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let name_lower = name.as_str().to_lowercase();
            let masked_value = if SENSITIVE_HEADERS.contains(&name_lower.as_str()) {
                "[REDACTED]".to_string()
            } else {
                value.to_str().unwrap_or("[invalid utf8]").to_string()
            };
            (name.to_string(), masked_value)
        })
        .collect()
}

/// Request logging middleware
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let headers = mask_headers_for_logging(request.headers());

    let start = std::time::Instant::now();

    tracing::info!(
        method = %method,
        uri = %uri,
        headers = ?headers,
        "Incoming request"
    );

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %status,
        duration_ms = %duration.as_millis(),
        "Request completed"
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_headers_for_logging() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", "application/json".parse().unwrap());
        headers.insert("authorization", "Bearer secret-token".parse().unwrap());

        let masked = mask_headers_for_logging(&headers);

        let auth = masked.iter().find(|(k, _)| k == "authorization");
        let content_type = masked.iter().find(|(k, _)| k == "content-type");

        assert_eq!(auth.unwrap().1, "[REDACTED]");
        assert_eq!(content_type.unwrap().1, "application/json");
    }

    #[test]
    fn test_sensitive_headers_list() {
        assert!(SENSITIVE_HEADERS.contains(&"authorization"));
        assert!(SENSITIVE_HEADERS.contains(&"cookie"));
        assert!(!SENSITIVE_HEADERS.contains(&"content-type"));
    }

    #[test]
    fn test_apply_cors_headers() {
        let mut headers = HeaderMap::new();
        apply_cors_headers(&mut headers, "*");

        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], CORS_ALLOW_METHODS);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    }

    #[test]
    fn test_apply_cors_headers_with_explicit_origin() {
        let mut headers = HeaderMap::new();
        apply_cors_headers(&mut headers, "https://app.example.com");
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://app.example.com"
        );
    }
}
