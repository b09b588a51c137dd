use std::sync::Arc;

use axum::{
    extract::{Query, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use sha2::{Digest, Sha256};

use crate::app::services::AppServices;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Shared-key check settings for protected routes.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub api_key: Option<Arc<str>>,
    pub dev_mode: bool,
}

impl AuthState {
    pub fn new(api_key: Option<String>, dev_mode: bool) -> Self {
        Self {
            api_key: api_key.map(Arc::from),
            dev_mode,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiKeyQuery {
    #[serde(rename = "apiKey")]
    api_key: Option<String>,
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(json!({ "error": message }))).into_response()
}

/// Require a matching API key on every request.
///
/// Without a configured key the routes stay closed unless dev mode is on.
pub async fn api_key_middleware(
    State(auth): State<AuthState>,
    req: Request,
    next: Next,
) -> Response {
    let Some(expected) = auth.api_key.as_deref() else {
        if auth.dev_mode {
            return next.run(req).await;
        }
        tracing::warn!(path = %req.uri().path(), "rejected request: API key not configured");
        return error_body(
            StatusCode::SERVICE_UNAVAILABLE,
            "API key authentication is not configured",
        );
    };

    let query_key = Query::<ApiKeyQuery>::try_from_uri(req.uri())
        .ok()
        .and_then(|Query(q)| q.api_key);
    let Some(provided) = extract_api_key(req.headers(), query_key) else {
        return error_body(
            StatusCode::UNAUTHORIZED,
            "API key required. Provide via X-API-Key header.",
        );
    };

    if !keys_match(&provided, expected) {
        tracing::warn!(path = %req.uri().path(), "rejected request: invalid API key");
        return error_body(StatusCode::FORBIDDEN, "Invalid API key");
    }

    next.run(req).await
}

/// Header first, then the `apiKey` query parameter.
pub fn extract_api_key(headers: &HeaderMap, query_key: Option<String>) -> Option<String> {
    headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| query_key.filter(|s| !s.is_empty()))
}

/// Constant-time comparison over fixed-length digests.
pub fn keys_match(provided: &str, expected: &str) -> bool {
    let a = Sha256::digest(provided.as_bytes());
    let b = Sha256::digest(expected.as_bytes());
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// 503 on payment routes when no gateway is configured.
pub async fn require_gateway(
    State(services): State<Arc<AppServices>>,
    req: Request,
    next: Next,
) -> Response {
    if services.gateway.is_none() {
        return error_body(
            StatusCode::SERVICE_UNAVAILABLE,
            "Stripe is not configured. Set STRIPE_SECRET_KEY or STRIPE_API environment variable.",
        );
    }
    next.run(req).await
}
