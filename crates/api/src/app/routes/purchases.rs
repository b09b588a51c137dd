use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use zeroerp_core::{DomainError, EntityKind, PurchaseOrderId};
use zeroerp_purchasing::{PurchaseOrder, PurchaseOrderDraft};

use crate::app::{errors, routes::csv_response};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_purchase_orders).post(create_purchase_order))
        .route("/export", get(export_purchase_orders))
        .route("/:id", get(get_purchase_order))
        .route("/:id/receive", post(receive_purchase_order))
}

pub async fn list_purchase_orders(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    Json(services.with_erp(|erp| erp.purchase_orders.list().to_vec())).into_response()
}

pub async fn get_purchase_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let po_id: PurchaseOrderId = match errors::parse_id(EntityKind::PurchaseOrder, &id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.with_erp(|erp| erp.purchase_orders.get(&po_id).cloned()) {
        Some(po) => Json(po).into_response(),
        None => errors::domain_error_to_response(DomainError::not_found(
            EntityKind::PurchaseOrder,
            id,
        )),
    }
}

pub async fn create_purchase_order(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<PurchaseOrderDraft>, JsonRejection>,
) -> axum::response::Response {
    let body = match errors::json_body(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.with_erp(|erp| erp.purchase_orders.add(body)) {
        Ok(po) => (StatusCode::CREATED, Json(po)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Ordered → Received. Stock levels are left alone.
pub async fn receive_purchase_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let po_id: PurchaseOrderId = match errors::parse_id(EntityKind::PurchaseOrder, &id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.with_erp(|erp| erp.receive_purchase_order(&po_id)) {
        Ok(po) => Json(po).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn export_purchase_orders(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let pos: Vec<PurchaseOrder> = services.with_erp(|erp| erp.purchase_orders.list().to_vec());
    csv_response(&pos)
}
