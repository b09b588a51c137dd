use async_trait::async_trait;
use serde_json::Value;

use crate::error::GatewayResult;
use crate::types::{
    InvoicePdf, NewCustomer, NewPaymentIntent, NewSubscription, PaymentIntentCreated,
    PortalSession, SetupIntentCreated, SubscriptionCreated,
};

/// Payment and subscription operations, proxied to an external provider.
///
/// Every call is independent and may fail; there are no retries.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_customer(&self, req: &NewCustomer) -> GatewayResult<Value>;
    async fn retrieve_customer(&self, customer_id: &str) -> GatewayResult<Value>;

    async fn create_payment_intent(
        &self,
        req: &NewPaymentIntent,
    ) -> GatewayResult<PaymentIntentCreated>;
    async fn retrieve_payment_intent(&self, intent_id: &str) -> GatewayResult<Value>;

    /// Attaches `payment_method_id` (if any) and makes it the customer's
    /// default before creating the subscription.
    async fn create_subscription(&self, req: &NewSubscription)
    -> GatewayResult<SubscriptionCreated>;
    async fn retrieve_subscription(&self, subscription_id: &str) -> GatewayResult<Value>;
    async fn list_subscriptions(&self, customer_id: &str) -> GatewayResult<Value>;
    async fn cancel_subscription(
        &self,
        subscription_id: &str,
        at_period_end: bool,
    ) -> GatewayResult<Value>;
    async fn resume_subscription(&self, subscription_id: &str) -> GatewayResult<Value>;

    async fn list_products(&self) -> GatewayResult<Value>;
    async fn list_prices(&self, product_id: &str) -> GatewayResult<Value>;

    async fn list_invoices(&self, customer_id: &str, limit: u32) -> GatewayResult<Value>;
    async fn invoice_pdf(&self, invoice_id: &str) -> GatewayResult<InvoicePdf>;

    async fn create_setup_intent(&self, customer_id: &str) -> GatewayResult<SetupIntentCreated>;
    async fn list_payment_methods(&self, customer_id: &str) -> GatewayResult<Value>;
    async fn detach_payment_method(&self, payment_method_id: &str) -> GatewayResult<()>;

    async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> GatewayResult<PortalSession>;
}
