use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use zeroerp_core::{DomainError, EntityKind, PrefixedId};
use zeroerp_payments::GatewayError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(fields) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            axum::Json(json!({
                "error": "validation_error",
                "message": "one or more fields are invalid",
                "fields": fields,
            })),
        )
            .into_response(),
        e @ DomainError::NotFound { .. } => {
            json_error(StatusCode::NOT_FOUND, "not_found", e.to_string())
        }
        e @ DomainError::InvalidTransition { .. } => {
            json_error(StatusCode::CONFLICT, "invalid_transition", e.to_string())
        }
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
    }
}

/// Gateway failures carry the provider's own message as `error`.
pub fn gateway_error_to_response(err: GatewayError) -> axum::response::Response {
    let status = match &err {
        GatewayError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        GatewayError::Api { .. } | GatewayError::Transport(_) | GatewayError::Decode(_) => {
            tracing::error!(error = %err, "payment gateway call failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, axum::Json(json!({ "error": err.to_string() }))).into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Parse a path identifier. A malformed id names nothing, so it is a 404.
pub fn parse_id<I>(kind: EntityKind, raw: &str) -> Result<I, axum::response::Response>
where
    I: PrefixedId + core::str::FromStr,
{
    raw.parse()
        .map_err(|_| domain_error_to_response(DomainError::not_found(kind, raw.to_string())))
}

/// Unwrap a JSON body, turning a decode failure into the usual error shape.
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, axum::response::Response> {
    body.map(|Json(value)| value).map_err(|rejection| {
        json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "invalid_body",
            rejection.body_text(),
        )
    })
}
