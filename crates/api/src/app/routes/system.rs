use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::app::services::AppServices;

pub async fn health(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "stripe": services.gateway.is_some(),
        "environment": services.environment.as_str(),
    }))
}

pub async fn dashboard(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(services.with_erp(|erp| erp.dashboard()))
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}
