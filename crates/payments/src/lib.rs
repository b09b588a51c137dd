//! Payment and subscription gateway integration.
//!
//! The gateway is a pass-through: nothing here touches inventory or orders.
//! [`PaymentGateway`] is the seam the HTTP layer depends on; [`StripeGateway`]
//! is the production adapter and tests substitute their own.

pub mod error;
pub mod gateway;
pub mod stripe;
pub mod types;
pub mod webhook;

pub use error::{GatewayError, GatewayResult, SignatureError};
pub use gateway::PaymentGateway;
pub use stripe::StripeGateway;
pub use types::{
    CancelSubscription, InvoicePdf, NewCustomer, NewPaymentIntent, NewPortalSession,
    NewSetupIntent, NewSubscription, PaymentIntentCreated, PortalSession, SetupIntentCreated,
    SubscriptionCreated,
};
pub use webhook::{
    WebhookEvent, WebhookEventKind, construct_event, handle_event, sign, verify_signature,
};
