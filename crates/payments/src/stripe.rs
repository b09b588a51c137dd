//! Stripe REST adapter.
//!
//! Requests are form-encoded with bracketed keys for nested fields
//! (`metadata[order]=...`, `items[0][price]=...`) and authenticated with the
//! secret key as a bearer token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, error};

use zeroerp_core::to_minor_units;

use crate::error::{GatewayError, GatewayResult};
use crate::gateway::PaymentGateway;
use crate::types::{
    InvoicePdf, NewCustomer, NewPaymentIntent, NewSubscription, PaymentIntentCreated,
    PortalSession, SetupIntentCreated, SubscriptionCreated,
};

pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

type Form = Vec<(String, String)>;

fn param(key: &str, value: impl Into<String>) -> (String, String) {
    (key.to_string(), value.into())
}

/// Path segments must be plain identifiers like `cus_123`.
fn segment(id: &str) -> GatewayResult<&str> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(id)
    } else {
        Err(GatewayError::InvalidRequest(format!("invalid identifier: {id:?}")))
    }
}

#[derive(Debug, Clone)]
pub struct StripeGateway {
    client: reqwest::Client,
    secret_key: String,
    base_url: String,
}

impl StripeGateway {
    pub fn new(secret_key: impl Into<String>) -> GatewayResult<Self> {
        Self::with_base_url(secret_key, DEFAULT_API_BASE)
    }

    /// Point at a different API host (a mock server in tests).
    pub fn with_base_url(
        secret_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> GatewayResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            secret_key: secret_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn call(&self, method: Method, path: &str, params: Form) -> GatewayResult<Value> {
        let url = format!("{}/v1/{}", self.base_url, path);
        debug!(method = %method, path = %path, "stripe request");

        let request = self
            .client
            .request(method.clone(), &url)
            .bearer_auth(&self.secret_key);
        let request = if method == Method::GET {
            request.query(&params)
        } else {
            request.form(&params)
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = error_message(&body);
            error!(path = %path, status = status.as_u16(), error = %message, "stripe request failed");
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| GatewayError::Decode(e.to_string()))
    }

    async fn get(&self, path: &str, params: Form) -> GatewayResult<Value> {
        self.call(Method::GET, path, params).await
    }

    async fn post(&self, path: &str, params: Form) -> GatewayResult<Value> {
        self.call(Method::POST, path, params).await
    }
}

/// `error.message` from a Stripe error body, else the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

fn string_field(value: &Value, pointer: &str) -> Option<String> {
    value.pointer(pointer).and_then(Value::as_str).map(str::to_string)
}

fn required_field(value: &Value, pointer: &str) -> GatewayResult<String> {
    string_field(value, pointer)
        .ok_or_else(|| GatewayError::Decode(format!("missing {pointer} in response")))
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_customer(&self, req: &NewCustomer) -> GatewayResult<Value> {
        let mut form = Form::new();
        if let Some(email) = &req.email {
            form.push(param("email", email.as_str()));
        }
        if let Some(name) = &req.name {
            form.push(param("name", name.as_str()));
        }
        for (k, v) in &req.metadata {
            form.push(param(&format!("metadata[{k}]"), v.as_str()));
        }
        self.post("customers", form).await
    }

    async fn retrieve_customer(&self, customer_id: &str) -> GatewayResult<Value> {
        self.get(&format!("customers/{}", segment(customer_id)?), Form::new())
            .await
    }

    async fn create_payment_intent(
        &self,
        req: &NewPaymentIntent,
    ) -> GatewayResult<PaymentIntentCreated> {
        let mut form = vec![
            param("amount", to_minor_units(req.amount).to_string()),
            param("currency", req.currency.as_str()),
            param("automatic_payment_methods[enabled]", "true"),
        ];
        if let Some(customer) = &req.customer_id {
            form.push(param("customer", customer.as_str()));
        }
        for (k, v) in &req.metadata {
            form.push(param(&format!("metadata[{k}]"), v.as_str()));
        }

        let intent = self.post("payment_intents", form).await?;
        Ok(PaymentIntentCreated {
            client_secret: string_field(&intent, "/client_secret"),
            payment_intent_id: required_field(&intent, "/id")?,
        })
    }

    async fn retrieve_payment_intent(&self, intent_id: &str) -> GatewayResult<Value> {
        self.get(&format!("payment_intents/{}", segment(intent_id)?), Form::new())
            .await
    }

    async fn create_subscription(
        &self,
        req: &NewSubscription,
    ) -> GatewayResult<SubscriptionCreated> {
        let customer = segment(&req.customer_id)?;

        if let Some(pm) = &req.payment_method_id {
            self.post(
                &format!("payment_methods/{}/attach", segment(pm)?),
                vec![param("customer", customer)],
            )
            .await?;
            self.post(
                &format!("customers/{customer}"),
                vec![param("invoice_settings[default_payment_method]", pm.as_str())],
            )
            .await?;
        }

        let subscription = self
            .post(
                "subscriptions",
                vec![
                    param("customer", customer),
                    param("items[0][price]", req.price_id.as_str()),
                    param("payment_behavior", "default_incomplete"),
                    param("payment_settings[save_default_payment_method]", "on_subscription"),
                    param("expand[]", "latest_invoice.payment_intent"),
                ],
            )
            .await?;

        Ok(SubscriptionCreated {
            subscription_id: required_field(&subscription, "/id")?,
            client_secret: string_field(
                &subscription,
                "/latest_invoice/payment_intent/client_secret",
            ),
            status: string_field(&subscription, "/status").unwrap_or_default(),
        })
    }

    async fn retrieve_subscription(&self, subscription_id: &str) -> GatewayResult<Value> {
        self.get(
            &format!("subscriptions/{}", segment(subscription_id)?),
            vec![
                param("expand[]", "items.data.price.product"),
                param("expand[]", "latest_invoice"),
            ],
        )
        .await
    }

    async fn list_subscriptions(&self, customer_id: &str) -> GatewayResult<Value> {
        self.get(
            "subscriptions",
            vec![
                param("customer", segment(customer_id)?),
                param("expand[]", "data.items.data.price.product"),
            ],
        )
        .await
    }

    async fn cancel_subscription(
        &self,
        subscription_id: &str,
        at_period_end: bool,
    ) -> GatewayResult<Value> {
        let path = format!("subscriptions/{}", segment(subscription_id)?);
        if at_period_end {
            self.post(&path, vec![param("cancel_at_period_end", "true")])
                .await
        } else {
            self.call(Method::DELETE, &path, Form::new()).await
        }
    }

    async fn resume_subscription(&self, subscription_id: &str) -> GatewayResult<Value> {
        self.post(
            &format!("subscriptions/{}", segment(subscription_id)?),
            vec![param("cancel_at_period_end", "false")],
        )
        .await
    }

    async fn list_products(&self) -> GatewayResult<Value> {
        self.get(
            "products",
            vec![param("active", "true"), param("expand[]", "data.default_price")],
        )
        .await
    }

    async fn list_prices(&self, product_id: &str) -> GatewayResult<Value> {
        self.get(
            "prices",
            vec![param("product", segment(product_id)?), param("active", "true")],
        )
        .await
    }

    async fn list_invoices(&self, customer_id: &str, limit: u32) -> GatewayResult<Value> {
        self.get(
            "invoices",
            vec![
                param("customer", segment(customer_id)?),
                param("limit", limit.to_string()),
            ],
        )
        .await
    }

    async fn invoice_pdf(&self, invoice_id: &str) -> GatewayResult<InvoicePdf> {
        let invoice = self
            .get(&format!("invoices/{}", segment(invoice_id)?), Form::new())
            .await?;
        Ok(InvoicePdf {
            pdf_url: string_field(&invoice, "/invoice_pdf"),
        })
    }

    async fn create_setup_intent(&self, customer_id: &str) -> GatewayResult<SetupIntentCreated> {
        let intent = self
            .post(
                "setup_intents",
                vec![
                    param("customer", segment(customer_id)?),
                    param("payment_method_types[]", "card"),
                ],
            )
            .await?;
        Ok(SetupIntentCreated {
            client_secret: string_field(&intent, "/client_secret"),
        })
    }

    async fn list_payment_methods(&self, customer_id: &str) -> GatewayResult<Value> {
        self.get(
            "payment_methods",
            vec![param("customer", segment(customer_id)?), param("type", "card")],
        )
        .await
    }

    async fn detach_payment_method(&self, payment_method_id: &str) -> GatewayResult<()> {
        self.post(
            &format!("payment_methods/{}/detach", segment(payment_method_id)?),
            Form::new(),
        )
        .await
        .map(|_| ())
    }

    async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> GatewayResult<PortalSession> {
        let session = self
            .post(
                "billing_portal/sessions",
                vec![
                    param("customer", segment(customer_id)?),
                    param("return_url", return_url),
                ],
            )
            .await?;
        Ok(PortalSession {
            url: required_field(&session, "/url")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn gateway(server: &MockServer) -> StripeGateway {
        StripeGateway::with_base_url("sk_test_123", server.uri()).unwrap()
    }

    #[tokio::test]
    async fn creates_payment_intent_in_minor_units() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/payment_intents"))
            .and(header("Authorization", "Bearer sk_test_123"))
            .and(body_string_contains("amount=1999"))
            .and(body_string_contains("currency=usd"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "pi_123",
                "client_secret": "pi_123_secret_abc"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let created = gateway(&server)
            .await
            .create_payment_intent(&NewPaymentIntent {
                amount: 19.99,
                currency: "usd".to_string(),
                customer_id: None,
                metadata: BTreeMap::new(),
            })
            .await
            .unwrap();

        assert_eq!(created.payment_intent_id, "pi_123");
        assert_eq!(created.client_secret.as_deref(), Some("pi_123_secret_abc"));
    }

    #[tokio::test]
    async fn surfaces_the_gateway_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/customers/cus_missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": { "message": "No such customer: 'cus_missing'" }
            })))
            .mount(&server)
            .await;

        let err = gateway(&server)
            .await
            .retrieve_customer("cus_missing")
            .await
            .unwrap_err();

        match err {
            GatewayError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "No such customer: 'cus_missing'");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_body_is_passed_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/products"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Rate limit exceeded"))
            .mount(&server)
            .await;

        let err = gateway(&server).await.list_products().await.unwrap_err();
        assert_eq!(err.to_string(), "Rate limit exceeded");
    }

    #[tokio::test]
    async fn subscription_attaches_payment_method_first() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/payment_methods/pm_1/attach"))
            .and(body_string_contains("customer=cus_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "pm_1" })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/customers/cus_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "cus_1" })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/subscriptions"))
            .and(body_string_contains("payment_behavior=default_incomplete"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "sub_1",
                "status": "incomplete",
                "latest_invoice": { "payment_intent": { "client_secret": "seti_secret" } }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let created = gateway(&server)
            .await
            .create_subscription(&NewSubscription {
                customer_id: "cus_1".to_string(),
                price_id: "price_1".to_string(),
                payment_method_id: Some("pm_1".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(created.subscription_id, "sub_1");
        assert_eq!(created.status, "incomplete");
        assert_eq!(created.client_secret.as_deref(), Some("seti_secret"));
    }

    #[tokio::test]
    async fn immediate_cancel_uses_delete() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v1/subscriptions/sub_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "sub_1", "status": "canceled"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let sub = gateway(&server)
            .await
            .cancel_subscription("sub_1", false)
            .await
            .unwrap();
        assert_eq!(sub["status"], "canceled");
    }

    #[tokio::test]
    async fn invoice_listing_passes_limit_as_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/invoices"))
            .and(query_param("customer", "cus_1"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let invoices = gateway(&server).await.list_invoices("cus_1", 10).await.unwrap();
        assert_eq!(invoices["data"], json!([]));
    }

    #[tokio::test]
    async fn invoice_pdf_reads_the_pdf_link() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/invoices/in_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "in_1", "invoice_pdf": "https://pay.example/in_1.pdf"
            })))
            .mount(&server)
            .await;

        let pdf = gateway(&server).await.invoice_pdf("in_1").await.unwrap();
        assert_eq!(pdf.pdf_url.as_deref(), Some("https://pay.example/in_1.pdf"));
    }

    #[tokio::test]
    async fn path_like_identifiers_are_rejected_without_a_request() {
        let server = MockServer::start().await;
        let err = gateway(&server)
            .await
            .retrieve_customer("../charges")
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidRequest(_)));
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn malformed_success_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/billing_portal/sessions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = gateway(&server)
            .await
            .create_portal_session("cus_1", "http://localhost:3000")
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
    }
}
