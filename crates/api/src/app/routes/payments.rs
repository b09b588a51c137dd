//! Payment gateway pass-through. Responses are relayed as the gateway shaped them.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::json;

use zeroerp_payments::{
    CancelSubscription, GatewayError, NewCustomer, NewPaymentIntent, NewPortalSession,
    NewSetupIntent, NewSubscription, PaymentGateway,
};

use crate::app::dto::{DEFAULT_INVOICE_LIMIT, InvoiceQuery};
use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/customers", post(create_customer))
        .route("/customers/:id", get(get_customer))
        .route("/customers/:id/subscriptions", get(list_subscriptions))
        .route("/customers/:id/invoices", get(list_invoices))
        .route("/customers/:id/payment-methods", get(list_payment_methods))
        .route("/payment-intents", post(create_payment_intent))
        .route("/payment-intents/:id", get(get_payment_intent))
        .route("/subscriptions", post(create_subscription))
        .route("/subscriptions/:id", get(get_subscription))
        .route("/subscriptions/:id/cancel", post(cancel_subscription))
        .route("/subscriptions/:id/resume", post(resume_subscription))
        .route("/products", get(list_products))
        .route("/products/:id/prices", get(list_prices))
        .route("/invoices/:id/pdf", get(invoice_pdf))
        .route("/setup-intents", post(create_setup_intent))
        .route("/payment-methods/:id", delete(detach_payment_method))
        .route("/billing-portal", post(create_portal_session))
}

fn gateway(services: &AppServices) -> Result<Arc<dyn PaymentGateway>, axum::response::Response> {
    services
        .gateway
        .clone()
        .ok_or_else(|| errors::gateway_error_to_response(GatewayError::NotConfigured))
}

fn relay<T: serde::Serialize>(
    result: zeroerp_payments::GatewayResult<T>,
) -> axum::response::Response {
    match result {
        Ok(body) => Json(body).into_response(),
        Err(e) => errors::gateway_error_to_response(e),
    }
}

pub async fn create_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewCustomer>,
) -> axum::response::Response {
    let gateway = match gateway(&services) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    relay(gateway.create_customer(&body).await)
}

pub async fn get_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let gateway = match gateway(&services) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    relay(gateway.retrieve_customer(&id).await)
}

pub async fn list_subscriptions(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let gateway = match gateway(&services) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    relay(gateway.list_subscriptions(&id).await)
}

pub async fn list_invoices(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Query(query): Query<InvoiceQuery>,
) -> axum::response::Response {
    let gateway = match gateway(&services) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let limit = query.limit.unwrap_or(DEFAULT_INVOICE_LIMIT);
    relay(gateway.list_invoices(&id, limit).await)
}

pub async fn list_payment_methods(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let gateway = match gateway(&services) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    relay(gateway.list_payment_methods(&id).await)
}

pub async fn create_payment_intent(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewPaymentIntent>,
) -> axum::response::Response {
    let gateway = match gateway(&services) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    relay(gateway.create_payment_intent(&body).await)
}

pub async fn get_payment_intent(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let gateway = match gateway(&services) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    relay(gateway.retrieve_payment_intent(&id).await)
}

pub async fn create_subscription(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewSubscription>,
) -> axum::response::Response {
    let gateway = match gateway(&services) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    relay(gateway.create_subscription(&body).await)
}

pub async fn get_subscription(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let gateway = match gateway(&services) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    relay(gateway.retrieve_subscription(&id).await)
}

/// Body is optional; cancelling at period end is the default.
pub async fn cancel_subscription(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Option<Json<CancelSubscription>>,
) -> axum::response::Response {
    let gateway = match gateway(&services) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let req = body.map(|Json(req)| req).unwrap_or_default();
    relay(gateway.cancel_subscription(&id, req.cancel_at_period_end).await)
}

pub async fn resume_subscription(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let gateway = match gateway(&services) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    relay(gateway.resume_subscription(&id).await)
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let gateway = match gateway(&services) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    relay(gateway.list_products().await)
}

pub async fn list_prices(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let gateway = match gateway(&services) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    relay(gateway.list_prices(&id).await)
}

pub async fn invoice_pdf(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let gateway = match gateway(&services) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    relay(gateway.invoice_pdf(&id).await)
}

pub async fn create_setup_intent(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewSetupIntent>,
) -> axum::response::Response {
    let gateway = match gateway(&services) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    relay(gateway.create_setup_intent(&body.customer_id).await)
}

pub async fn detach_payment_method(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let gateway = match gateway(&services) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    match gateway.detach_payment_method(&id).await {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(e) => errors::gateway_error_to_response(e),
    }
}

/// Return URL defaults to the configured frontend.
pub async fn create_portal_session(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewPortalSession>,
) -> axum::response::Response {
    let gateway = match gateway(&services) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let return_url = body
        .return_url
        .unwrap_or_else(|| services.frontend_url.clone());
    relay(
        gateway
            .create_portal_session(&body.customer_id, &return_url)
            .await,
    )
}
