use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use zeroerp_payments::{construct_event, handle_event};

use crate::app::services::AppServices;

pub const SIGNATURE_HEADER: &str = "stripe-signature";

/// Verify and log a gateway event delivery. Nothing else reacts to it.
pub async fn stripe_webhook(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    body: Bytes,
) -> axum::response::Response {
    let Some(secret) = services
        .webhook_secret
        .as_deref()
        .filter(|_| services.gateway.is_some())
    else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "Stripe not configured" })),
        )
            .into_response();
    };

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let now = chrono::Utc::now().timestamp();

    match construct_event(&body, signature, secret, now) {
        Ok(event) => {
            handle_event(&event);
            Json(json!({ "received": true })).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "webhook signature verification failed");
            (StatusCode::BAD_REQUEST, format!("Webhook Error: {e}")).into_response()
        }
    }
}
