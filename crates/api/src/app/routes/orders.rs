use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use zeroerp_core::{DomainError, EntityKind, OrderId};
use zeroerp_sales::{Order, OrderDraft};

use crate::app::{errors, routes::csv_response};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/export", get(export_orders))
        .route("/:id", get(get_order))
        .route("/:id/fulfill", post(fulfill_order))
        .route("/:id/deliver", post(deliver_order))
}

pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    Json(services.with_erp(|erp| erp.orders.list().to_vec())).into_response()
}

pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let order_id: OrderId = match errors::parse_id(EntityKind::Order, &id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.with_erp(|erp| erp.orders.get(&order_id).cloned()) {
        Some(order) => Json(order).into_response(),
        None => errors::domain_error_to_response(DomainError::not_found(EntityKind::Order, id)),
    }
}

pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<OrderDraft>, JsonRejection>,
) -> axum::response::Response {
    let body = match errors::json_body(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.with_erp(|erp| erp.orders.add(body)) {
        Ok(order) => (StatusCode::CREATED, Json(order)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn fulfill_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let order_id: OrderId = match errors::parse_id(EntityKind::Order, &id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.with_erp(|erp| erp.fulfill_order(&order_id)) {
        Ok(order) => Json(order).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn deliver_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let order_id: OrderId = match errors::parse_id(EntityKind::Order, &id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.with_erp(|erp| erp.mark_delivered(&order_id)) {
        Ok(order) => Json(order).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn export_orders(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let orders: Vec<Order> = services.with_erp(|erp| erp.orders.list().to_vec());
    csv_response(&orders)
}
