use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use zeroerp_core::{EntityKind, Sku};
use zeroerp_inventory::{InventoryDraft, InventoryItem, low_stock_items, recommendations, search};

use crate::app::dto::{InventoryItemView, SearchQuery};
use crate::app::{errors, routes::csv_response};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/export", get(export_items))
        .route("/low-stock", get(list_low_stock))
        .route("/replenishment", get(replenishment))
        .route("/:id", get(get_item).put(update_item).delete(delete_item))
        .route("/:id/reorder", post(reorder_item))
}

pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<SearchQuery>,
) -> axum::response::Response {
    let items: Vec<InventoryItemView> = services.with_erp(|erp| {
        search(erp.inventory.list(), query.search.as_deref().unwrap_or(""))
            .into_iter()
            .map(InventoryItemView::from)
            .collect()
    });
    Json(items).into_response()
}

pub async fn list_low_stock(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items: Vec<InventoryItemView> = services.with_erp(|erp| {
        low_stock_items(erp.inventory.list())
            .into_iter()
            .map(InventoryItemView::from)
            .collect()
    });
    Json(items).into_response()
}

pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let sku: Sku = match errors::parse_id(EntityKind::Inventory, &id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.with_erp(|erp| erp.inventory.get(&sku).map(InventoryItemView::from)) {
        Some(view) => Json(view).into_response(),
        None => errors::domain_error_to_response(zeroerp_core::DomainError::not_found(
            EntityKind::Inventory,
            id,
        )),
    }
}

pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<InventoryDraft>, JsonRejection>,
) -> axum::response::Response {
    let body = match errors::json_body(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.with_erp(|erp| erp.inventory.add(body)) {
        Ok(item) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<InventoryDraft>, JsonRejection>,
) -> axum::response::Response {
    let sku: Sku = match errors::parse_id(EntityKind::Inventory, &id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let body = match errors::json_body(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.with_erp(|erp| erp.inventory.update(&sku, body)) {
        Ok(item) => Json(item).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let sku: Sku = match errors::parse_id(EntityKind::Inventory, &id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.with_erp(|erp| erp.inventory.remove(&sku)) {
        Ok(removed) => Json(removed).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn export_items(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items: Vec<InventoryItem> = services.with_erp(|erp| erp.inventory.list().to_vec());
    csv_response(&items)
}

pub async fn replenishment(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    Json(services.with_erp(|erp| recommendations(erp.inventory.list()))).into_response()
}

/// Place a purchase order for the item's suggested quantity.
pub async fn reorder_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let sku: Sku = match errors::parse_id(EntityKind::Inventory, &id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.with_erp(|erp| erp.reorder(&sku)) {
        Ok(po) => {
            tracing::info!(sku = %sku, po = %po.id, "reorder placed");
            (StatusCode::CREATED, Json(po)).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}
