use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};

use zeroerp_api::{build_app, AppServices, Config, Environment};
use zeroerp_infra::{BlobStore, ErpStore, InMemoryBlobStore};
use zeroerp_payments::{
    sign, GatewayError, GatewayResult, InvoicePdf, NewCustomer, NewPaymentIntent,
    NewSubscription, PaymentGateway, PaymentIntentCreated, PortalSession, SetupIntentCreated,
    SubscriptionCreated,
};

const API_KEY: &str = "test-api-key";
const WEBHOOK_SECRET: &str = "whsec_test";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(config: Config, services: AppServices) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = build_app(&config, Arc::new(services));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    /// Seeded stores, API key required, no gateway.
    async fn seeded() -> Self {
        Self::spawn(keyed_config(), AppServices::new(seeded_store())).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn keyed_config() -> Config {
    Config {
        api_key: Some(API_KEY.to_string()),
        ..Config::default()
    }
}

fn seeded_store() -> ErpStore<Arc<dyn BlobStore>> {
    let blob: Arc<dyn BlobStore> = Arc::new(InMemoryBlobStore::new());
    ErpStore::open(blob, "test")
}

/// Canned gateway responses; `fail` makes every call an API error.
struct MockGateway {
    fail: bool,
}

impl MockGateway {
    fn check(&self) -> GatewayResult<()> {
        if self.fail {
            Err(GatewayError::Api {
                status: 402,
                message: "Your card was declined.".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_customer(&self, req: &NewCustomer) -> GatewayResult<Value> {
        self.check()?;
        Ok(json!({ "id": "cus_123", "email": req.email }))
    }

    async fn retrieve_customer(&self, customer_id: &str) -> GatewayResult<Value> {
        self.check()?;
        Ok(json!({ "id": customer_id }))
    }

    async fn create_payment_intent(
        &self,
        _req: &NewPaymentIntent,
    ) -> GatewayResult<PaymentIntentCreated> {
        self.check()?;
        Ok(PaymentIntentCreated {
            client_secret: Some("pi_123_secret".to_string()),
            payment_intent_id: "pi_123".to_string(),
        })
    }

    async fn retrieve_payment_intent(&self, intent_id: &str) -> GatewayResult<Value> {
        self.check()?;
        Ok(json!({ "id": intent_id }))
    }

    async fn create_subscription(
        &self,
        _req: &NewSubscription,
    ) -> GatewayResult<SubscriptionCreated> {
        self.check()?;
        Ok(SubscriptionCreated {
            subscription_id: "sub_123".to_string(),
            client_secret: None,
            status: "active".to_string(),
        })
    }

    async fn retrieve_subscription(&self, subscription_id: &str) -> GatewayResult<Value> {
        self.check()?;
        Ok(json!({ "id": subscription_id }))
    }

    async fn list_subscriptions(&self, _customer_id: &str) -> GatewayResult<Value> {
        self.check()?;
        Ok(json!({ "data": [] }))
    }

    async fn cancel_subscription(
        &self,
        subscription_id: &str,
        at_period_end: bool,
    ) -> GatewayResult<Value> {
        self.check()?;
        Ok(json!({ "id": subscription_id, "cancel_at_period_end": at_period_end }))
    }

    async fn resume_subscription(&self, subscription_id: &str) -> GatewayResult<Value> {
        self.check()?;
        Ok(json!({ "id": subscription_id, "cancel_at_period_end": false }))
    }

    async fn list_products(&self) -> GatewayResult<Value> {
        self.check()?;
        Ok(json!({ "data": [{ "id": "prod_1" }] }))
    }

    async fn list_prices(&self, product_id: &str) -> GatewayResult<Value> {
        self.check()?;
        Ok(json!({ "data": [{ "product": product_id }] }))
    }

    async fn list_invoices(&self, _customer_id: &str, limit: u32) -> GatewayResult<Value> {
        self.check()?;
        Ok(json!({ "data": [], "limit": limit }))
    }

    async fn invoice_pdf(&self, _invoice_id: &str) -> GatewayResult<InvoicePdf> {
        self.check()?;
        Ok(InvoicePdf {
            pdf_url: Some("https://files.example/in_1.pdf".to_string()),
        })
    }

    async fn create_setup_intent(&self, _customer_id: &str) -> GatewayResult<SetupIntentCreated> {
        self.check()?;
        Ok(SetupIntentCreated {
            client_secret: Some("seti_secret".to_string()),
        })
    }

    async fn list_payment_methods(&self, _customer_id: &str) -> GatewayResult<Value> {
        self.check()?;
        Ok(json!({ "data": [] }))
    }

    async fn detach_payment_method(&self, _payment_method_id: &str) -> GatewayResult<()> {
        self.check()
    }

    async fn create_portal_session(
        &self,
        _customer_id: &str,
        return_url: &str,
    ) -> GatewayResult<PortalSession> {
        self.check()?;
        Ok(PortalSession {
            url: format!("https://billing.example/session?return={return_url}"),
        })
    }
}

fn with_gateway(fail: bool) -> AppServices {
    AppServices::new(seeded_store())
        .with_gateway(Arc::new(MockGateway { fail }))
        .with_webhook_secret(WEBHOOK_SECRET)
}

#[tokio::test]
async fn health_is_open_and_reports_gateway_state() {
    let server = TestServer::seeded().await;
    let client = reqwest::Client::new();

    for path in ["/health", "/api/health"] {
        let res = client.get(server.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["stripe"], false);
        assert_eq!(body["environment"], "development");
    }

    let with_stripe = TestServer::spawn(keyed_config(), with_gateway(false)).await;
    let body: Value = client
        .get(with_stripe.url("/api/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["stripe"], true);
}

#[tokio::test]
async fn protected_routes_require_a_valid_key() {
    let server = TestServer::seeded().await;
    let client = reqwest::Client::new();

    let missing = client.get(server.url("/api/inventory")).send().await.unwrap();
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    let body: Value = missing.json().await.unwrap();
    assert_eq!(body["error"], "API key required. Provide via X-API-Key header.");

    let wrong = client
        .get(server.url("/api/inventory"))
        .header("X-API-Key", "nope")
        .send()
        .await
        .unwrap();
    assert_eq!(wrong.status(), StatusCode::FORBIDDEN);
    let body: Value = wrong.json().await.unwrap();
    assert_eq!(body["error"], "Invalid API key");

    let header = client
        .get(server.url("/api/inventory"))
        .header("X-API-Key", API_KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(header.status(), StatusCode::OK);

    let query = client
        .get(server.url(&format!("/api/inventory?apiKey={API_KEY}")))
        .send()
        .await
        .unwrap();
    assert_eq!(query.status(), StatusCode::OK);
}

#[tokio::test]
async fn without_a_configured_key_routes_fail_closed_unless_dev_mode() {
    let client = reqwest::Client::new();

    let closed = TestServer::spawn(Config::default(), AppServices::new(seeded_store())).await;
    let res = client.get(closed.url("/api/inventory")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let health = client.get(closed.url("/health")).send().await.unwrap();
    assert_eq!(health.status(), StatusCode::OK);

    let dev = Config {
        dev_mode: true,
        ..Config::default()
    };
    let open = TestServer::spawn(dev, AppServices::new(seeded_store())).await;
    let res = client.get(open.url("/api/inventory")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn inventory_crud_round_trip() {
    let server = TestServer::seeded().await;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/api/inventory"))
        .header("X-API-Key", API_KEY)
        .json(&json!({
            "name": "Widget",
            "category": "Hardware",
            "vendor": "Acme",
            "cost": 10.0,
            "price": 25.0,
            "warehouse": 2,
            "store": 1,
            "safetyStock": 5
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("SKU-"));
    assert_eq!(created["stock"]["warehouse"], 2);

    let found: Vec<Value> = client
        .get(server.url("/api/inventory?search=widget"))
        .header("X-API-Key", API_KEY)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["id"], id.as_str());
    assert_eq!(found[0]["totalStock"], 3);
    assert_eq!(found[0]["lowStock"], true);
    assert_eq!(found[0]["margin"], 60);

    let res = client
        .put(server.url(&format!("/api/inventory/{id}")))
        .header("X-API-Key", API_KEY)
        .json(&json!({
            "name": "Widget Pro",
            "category": "Hardware",
            "vendor": "Acme",
            "cost": 10.0,
            "price": 30.0,
            "warehouse": 20,
            "store": 1,
            "safetyStock": 5
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await.unwrap();
    assert_eq!(updated["id"], id.as_str());
    assert_eq!(updated["name"], "Widget Pro");

    let res = client
        .delete(server.url(&format!("/api/inventory/{id}")))
        .header("X-API-Key", API_KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .delete(server.url(&format!("/api/inventory/{id}")))
        .header("X-API-Key", API_KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_item_is_rejected_with_field_errors() {
    let server = TestServer::seeded().await;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/api/inventory"))
        .header("X-API-Key", API_KEY)
        .json(&json!({ "name": "", "category": "Hardware", "vendor": "Acme", "cost": 50.0, "price": 20.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["fields"]["name"], "Product name is required");
    assert_eq!(body["fields"]["price"], "Price must be greater than cost");

    let res = client
        .put(server.url("/api/inventory/SKU-NOPE"))
        .header("X-API-Key", API_KEY)
        .json(&json!({ "name": "X", "category": "Y", "vendor": "Z" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn undecodable_bodies_get_a_json_error() {
    let server = TestServer::seeded().await;
    let client = reqwest::Client::new();

    let cases = [
        ("/api/inventory", json!({ "name": "Widget", "warehouse": 1.5 })),
        ("/api/inventory", json!({ "name": "Widget", "cost": "abc" })),
        ("/api/orders", json!({ "customer": "Jane", "items": "none" })),
        ("/api/purchase-orders", json!({ "vendor": "Acme", "total": [] })),
    ];
    for (path, body) in cases {
        let res = client
            .post(server.url(path))
            .header("X-API-Key", API_KEY)
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY, "{path}");
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["error"], "invalid_body");
        assert!(body["message"].is_string());
    }

    let res = client
        .put(server.url("/api/inventory/SKU-1001"))
        .header("X-API-Key", API_KEY)
        .json(&json!({ "store": -0.5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_body");
}

#[tokio::test]
async fn order_lifecycle_moves_forward_only() {
    let server = TestServer::seeded().await;
    let client = reqwest::Client::new();

    // ORD-1003 is seeded as Pending.
    let res = client
        .post(server.url("/api/orders/ORD-1003/deliver"))
        .header("X-API-Key", API_KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = client
        .post(server.url("/api/orders/ORD-1003/fulfill"))
        .header("X-API-Key", API_KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let shipped: Value = res.json().await.unwrap();
    assert_eq!(shipped["status"], "Shipped");

    let res = client
        .post(server.url("/api/orders/ORD-1003/deliver"))
        .header("X-API-Key", API_KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let delivered: Value = res.json().await.unwrap();
    assert_eq!(delivered["status"], "Delivered");

    let res = client
        .post(server.url("/api/orders/ORD-9999/fulfill"))
        .header("X-API-Key", API_KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn new_orders_start_pending() {
    let server = TestServer::seeded().await;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/api/orders"))
        .header("X-API-Key", API_KEY)
        .json(&json!({
            "customer": "Jane Cooper",
            "channel": "Online",
            "items": [{ "sku": "SKU-1001", "quantity": 2, "price": 24.99 }],
            "total": 49.98
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let order: Value = res.json().await.unwrap();
    assert_eq!(order["status"], "Pending");
    assert!(order["id"].as_str().unwrap().starts_with("ORD-"));

    let res = client
        .post(server.url("/api/orders"))
        .header("X-API-Key", API_KEY)
        .json(&json!({ "customer": "Jane Cooper", "channel": "Online", "items": [] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["fields"]["items"], "At least one item is required");
}

#[tokio::test]
async fn reorder_places_a_purchase_order_and_receive_closes_it() {
    let server = TestServer::seeded().await;
    let client = reqwest::Client::new();

    let suggestions: Vec<Value> = client
        .get(server.url("/api/inventory/replenishment"))
        .header("X-API-Key", API_KEY)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(suggestions.iter().any(|s| s["sku"] == "SKU-1004"));

    let res = client
        .post(server.url("/api/inventory/SKU-1004/reorder"))
        .header("X-API-Key", API_KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let po: Value = res.json().await.unwrap();
    assert_eq!(po["vendor"], "DeskPro");
    assert_eq!(po["status"], "Ordered");
    let po_id = po["id"].as_str().unwrap().to_string();

    let res = client
        .post(server.url(&format!("/api/purchase-orders/{po_id}/receive")))
        .header("X-API-Key", API_KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(server.url(&format!("/api/purchase-orders/{po_id}/receive")))
        .header("X-API-Key", API_KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn exports_are_csv_downloads() {
    let server = TestServer::seeded().await;
    let client = reqwest::Client::new();

    let res = client
        .get(server.url("/api/inventory/export"))
        .header("X-API-Key", API_KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let content_type = res.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/csv"));
    let disposition = res.headers()["content-disposition"].to_str().unwrap().to_string();
    assert!(disposition.contains("inventory_export.csv"));
    let body = res.text().await.unwrap();
    let mut lines = body.lines();
    assert!(lines.next().unwrap().starts_with("ID,Name,Category"));
    assert_eq!(lines.count(), 6);

    for path in ["/api/orders/export", "/api/purchase-orders/export"] {
        let res = client
            .get(server.url(path))
            .header("X-API-Key", API_KEY)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn dashboard_reports_seeded_numbers() {
    let server = TestServer::seeded().await;
    let client = reqwest::Client::new();

    let body: Value = client
        .get(server.url("/api/dashboard"))
        .header("X-API-Key", API_KEY)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["inventory"]["itemCount"], 6);
    assert_eq!(body["inventory"]["lowStockCount"], 3);
    assert_eq!(body["orderCount"], 4);
    assert_eq!(body["pendingOrders"], 2);
    assert_eq!(body["purchaseOrderCount"], 3);
}

#[tokio::test]
async fn gateway_routes_need_a_configured_gateway() {
    let server = TestServer::seeded().await;
    let client = reqwest::Client::new();

    let res = client
        .get(server.url("/api/products"))
        .header("X-API-Key", API_KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = res.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("Stripe is not configured"));

    // Auth still runs first.
    let res = client.get(server.url("/api/products")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn gateway_results_are_relayed() {
    let server = TestServer::spawn(keyed_config(), with_gateway(false)).await;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/api/payment-intents"))
        .header("X-API-Key", API_KEY)
        .json(&json!({ "amount": 19.99 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["clientSecret"], "pi_123_secret");
    assert_eq!(body["paymentIntentId"], "pi_123");

    let body: Value = client
        .get(server.url("/api/customers/cus_123/invoices"))
        .header("X-API-Key", API_KEY)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["limit"], 10);

    let body: Value = client
        .post(server.url("/api/subscriptions/sub_123/cancel"))
        .header("X-API-Key", API_KEY)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["cancel_at_period_end"], true);

    let body: Value = client
        .delete(server.url("/api/payment-methods/pm_123"))
        .header("X-API-Key", API_KEY)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["success"], true);

    let body: Value = client
        .post(server.url("/api/billing-portal"))
        .header("X-API-Key", API_KEY)
        .json(&json!({ "customerId": "cus_123" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body["url"].as_str().unwrap().ends_with("http://localhost:3000"));
}

#[tokio::test]
async fn health_and_billing_portal_follow_the_configured_deployment() {
    let services = with_gateway(false)
        .with_environment(Environment::Production)
        .with_frontend_url("https://erp.example.com");
    let server = TestServer::spawn(keyed_config(), services).await;
    let client = reqwest::Client::new();

    let health: Value = client
        .get(server.url("/api/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["environment"], "production");

    let portal: Value = client
        .post(server.url("/api/billing-portal"))
        .header("X-API-Key", API_KEY)
        .json(&json!({ "customerId": "cus_123" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(portal["url"].as_str().unwrap().ends_with("https://erp.example.com"));

    let explicit: Value = client
        .post(server.url("/api/billing-portal"))
        .header("X-API-Key", API_KEY)
        .json(&json!({ "customerId": "cus_123", "returnUrl": "https://shop.example/account" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(explicit["url"].as_str().unwrap().ends_with("https://shop.example/account"));
}

#[tokio::test]
async fn gateway_failures_surface_the_provider_message() {
    let server = TestServer::spawn(keyed_config(), with_gateway(true)).await;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/api/customers"))
        .header("X-API-Key", API_KEY)
        .json(&json!({ "email": "a@example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Your card was declined.");
}

#[tokio::test]
async fn webhook_accepts_signed_events_and_rejects_tampering() {
    let server = TestServer::spawn(keyed_config(), with_gateway(false)).await;
    let client = reqwest::Client::new();

    let payload = json!({
        "id": "evt_1",
        "type": "payment_intent.succeeded",
        "data": { "object": { "id": "pi_123" } }
    })
    .to_string();
    let now = chrono::Utc::now().timestamp();
    let signature = sign(payload.as_bytes(), WEBHOOK_SECRET, now).unwrap();

    // No API key: the signature is the credential.
    let res = client
        .post(server.url("/api/webhooks/stripe"))
        .header("Stripe-Signature", &signature)
        .body(payload.clone())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["received"], true);

    let tampered = payload.replace("pi_123", "pi_999");
    let res = client
        .post(server.url("/api/webhooks/stripe"))
        .header("Stripe-Signature", &signature)
        .body(tampered)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(res.text().await.unwrap().starts_with("Webhook Error:"));

    let unknown = json!({ "id": "evt_2", "type": "charge.refunded", "data": { "object": {} } })
        .to_string();
    let signature = sign(unknown.as_bytes(), WEBHOOK_SECRET, now).unwrap();
    let res = client
        .post(server.url("/api/webhooks/stripe"))
        .header("Stripe-Signature", signature)
        .body(unknown)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn webhook_without_gateway_is_unavailable() {
    let server = TestServer::seeded().await;
    let res = reqwest::Client::new()
        .post(server.url("/api/webhooks/stripe"))
        .header("Stripe-Signature", "t=1,v1=00")
        .body("{}")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn unknown_api_paths_are_json_404s() {
    let server = TestServer::seeded().await;
    let res = reqwest::Client::new()
        .get(server.url("/api/nope"))
        .header("X-API-Key", API_KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Not found");
}
