use axum::{
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};

use zeroerp_infra::{CsvRecord, encode_csv};

pub mod inventory;
pub mod orders;
pub mod payments;
pub mod purchases;
pub mod system;
pub mod webhooks;

/// Router for the ERP collections (API key required).
pub fn router() -> Router {
    Router::new()
        .route("/dashboard", get(system::dashboard))
        .nest("/inventory", inventory::router())
        .nest("/orders", orders::router())
        .nest("/purchase-orders", purchases::router())
}

/// CSV download of a collection snapshot.
pub fn csv_response<T: CsvRecord>(records: &[T]) -> axum::response::Response {
    let disposition = format!("attachment; filename=\"{}\"", T::FILE_NAME);
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        encode_csv(records),
    )
        .into_response()
}
