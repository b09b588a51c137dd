//! Gateway webhook verification and dispatch.
//!
//! Signature header format: `t=<unix seconds>,v1=<hex hmac>[,v1=...]`. The
//! HMAC-SHA256 is computed with the endpoint secret over `"<t>.<raw body>"`.
//! Deliveries older than the tolerance are rejected to limit replays.

use hmac::{Hmac, Mac};
use serde::Deserialize;
use serde_json::Value;
use sha2::Sha256;
use tracing::{debug, info, warn};

use crate::error::SignatureError;

type HmacSha256 = Hmac<Sha256>;

pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

/// A delivered gateway event. Only the fields we act on are decoded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WebhookEvent {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub data: EventData,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EventData {
    #[serde(default)]
    pub object: Value,
}

impl WebhookEvent {
    pub fn kind(&self) -> WebhookEventKind {
        WebhookEventKind::parse(&self.event_type)
    }

    /// `id` of the object the event is about.
    pub fn object_id(&self) -> Option<&str> {
        self.data.object.get("id").and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEventKind {
    PaymentIntentSucceeded,
    PaymentIntentFailed,
    SubscriptionCreated,
    SubscriptionUpdated,
    SubscriptionDeleted,
    InvoicePaid,
    InvoicePaymentFailed,
    /// Accepted and ignored.
    Unknown(String),
}

impl WebhookEventKind {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "payment_intent.succeeded" => Self::PaymentIntentSucceeded,
            "payment_intent.payment_failed" => Self::PaymentIntentFailed,
            "customer.subscription.created" => Self::SubscriptionCreated,
            "customer.subscription.updated" => Self::SubscriptionUpdated,
            "customer.subscription.deleted" => Self::SubscriptionDeleted,
            "invoice.paid" => Self::InvoicePaid,
            "invoice.payment_failed" => Self::InvoicePaymentFailed,
            other => Self::Unknown(other.to_string()),
        }
    }
}

struct SignatureHeader {
    timestamp: i64,
    signatures: Vec<Vec<u8>>,
}

fn parse_header(header: &str) -> Result<SignatureHeader, SignatureError> {
    if header.trim().is_empty() {
        return Err(SignatureError::MissingHeader);
    }

    let mut timestamp = None;
    let mut signatures = Vec::new();
    for part in header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        match key {
            "t" => {
                let t = value
                    .parse::<i64>()
                    .map_err(|_| SignatureError::Malformed(format!("timestamp {value:?}")))?;
                timestamp = Some(t);
            }
            "v1" => {
                // Undecodable entries can never match; skip them.
                if let Ok(bytes) = hex::decode(value) {
                    signatures.push(bytes);
                }
            }
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or(SignatureError::MissingTimestamp)?;
    if signatures.is_empty() {
        return Err(SignatureError::MissingSignature);
    }
    Ok(SignatureHeader {
        timestamp,
        signatures,
    })
}

fn mac_for(secret: &str, timestamp: i64, payload: &[u8]) -> Result<HmacSha256, SignatureError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| SignatureError::Malformed("webhook secret".to_string()))?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    Ok(mac)
}

/// Build a signature header for `payload`, as the gateway would send it.
pub fn sign(payload: &[u8], secret: &str, timestamp: i64) -> Result<String, SignatureError> {
    let digest = mac_for(secret, timestamp, payload)?.finalize().into_bytes();
    Ok(format!("t={timestamp},v1={}", hex::encode(digest)))
}

/// Check a delivery's signature header against the endpoint secret.
///
/// `now` is the current unix time in seconds.
pub fn verify_signature(
    payload: &[u8],
    header: &str,
    secret: &str,
    now: i64,
) -> Result<(), SignatureError> {
    let parsed = parse_header(header)?;

    let expected = mac_for(secret, parsed.timestamp, payload)?;
    let matched = parsed
        .signatures
        .iter()
        .any(|candidate| expected.clone().verify_slice(candidate).is_ok());
    if !matched {
        return Err(SignatureError::Mismatch);
    }

    let age_secs = now.saturating_sub(parsed.timestamp);
    if age_secs > DEFAULT_TOLERANCE_SECS {
        return Err(SignatureError::OutsideTolerance { age_secs });
    }
    Ok(())
}

/// Verify and decode a delivery.
pub fn construct_event(
    payload: &[u8],
    header: &str,
    secret: &str,
    now: i64,
) -> Result<WebhookEvent, SignatureError> {
    verify_signature(payload, header, secret, now)?;
    serde_json::from_slice(payload).map_err(|e| SignatureError::InvalidPayload(e.to_string()))
}

/// Log a verified event. No state is changed.
pub fn handle_event(event: &WebhookEvent) -> WebhookEventKind {
    let kind = event.kind();
    let object_id = event.object_id().unwrap_or("-");
    match &kind {
        WebhookEventKind::PaymentIntentSucceeded => {
            info!(object_id, "payment intent succeeded");
        }
        WebhookEventKind::PaymentIntentFailed => {
            warn!(object_id, "payment intent failed");
        }
        WebhookEventKind::SubscriptionCreated => {
            info!(object_id, "subscription created");
        }
        WebhookEventKind::SubscriptionUpdated => {
            info!(object_id, "subscription updated");
        }
        WebhookEventKind::SubscriptionDeleted => {
            info!(object_id, "subscription cancelled");
        }
        WebhookEventKind::InvoicePaid => {
            info!(object_id, "invoice paid");
        }
        WebhookEventKind::InvoicePaymentFailed => {
            warn!(object_id, "invoice payment failed");
        }
        WebhookEventKind::Unknown(tag) => {
            debug!(event_type = %tag, "unhandled webhook event type");
        }
    }
    kind
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test";
    const NOW: i64 = 1_700_000_000;

    fn payload(event_type: &str) -> Vec<u8> {
        serde_json::json!({
            "id": "evt_1",
            "type": event_type,
            "data": { "object": { "id": "pi_42" } }
        })
        .to_string()
        .into_bytes()
    }

    #[test]
    fn valid_signature_is_accepted() {
        let body = payload("payment_intent.succeeded");
        let header = sign(&body, SECRET, NOW).unwrap();
        let event = construct_event(&body, &header, SECRET, NOW + 10).unwrap();
        assert_eq!(event.kind(), WebhookEventKind::PaymentIntentSucceeded);
        assert_eq!(event.object_id(), Some("pi_42"));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let body = payload("invoice.paid");
        let header = sign(&body, SECRET, NOW).unwrap();
        let mut tampered = body.clone();
        tampered.extend_from_slice(b" ");
        assert_eq!(
            verify_signature(&tampered, &header, SECRET, NOW),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let body = payload("invoice.paid");
        let header = sign(&body, "whsec_other", NOW).unwrap();
        assert_eq!(
            verify_signature(&body, &header, SECRET, NOW),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn stale_delivery_is_rejected() {
        let body = payload("invoice.paid");
        let header = sign(&body, SECRET, NOW).unwrap();
        assert_eq!(
            verify_signature(&body, &header, SECRET, NOW + 301),
            Err(SignatureError::OutsideTolerance { age_secs: 301 })
        );
        assert!(verify_signature(&body, &header, SECRET, NOW + 300).is_ok());
    }

    #[test]
    fn extreme_timestamp_is_stale_not_a_panic() {
        let body = payload("invoice.paid");
        let header = sign(&body, SECRET, i64::MIN).unwrap();
        assert_eq!(
            verify_signature(&body, &header, SECRET, NOW),
            Err(SignatureError::OutsideTolerance { age_secs: i64::MAX })
        );
    }

    #[test]
    fn any_matching_v1_entry_is_enough() {
        let body = payload("invoice.paid");
        let good = sign(&body, SECRET, NOW).unwrap();
        let good_sig = good.split(",v1=").nth(1).unwrap();
        let header = format!("t={NOW},v1={},v1={good_sig}", "00".repeat(32));
        assert!(verify_signature(&body, &header, SECRET, NOW).is_ok());
    }

    #[test]
    fn malformed_headers_are_rejected() {
        let body = payload("invoice.paid");
        assert_eq!(
            verify_signature(&body, "", SECRET, NOW),
            Err(SignatureError::MissingHeader)
        );
        assert_eq!(
            verify_signature(&body, "v1=abcd", SECRET, NOW),
            Err(SignatureError::MissingTimestamp)
        );
        assert_eq!(
            verify_signature(&body, "t=1700000000", SECRET, NOW),
            Err(SignatureError::MissingSignature)
        );
        assert!(matches!(
            verify_signature(&body, "t=soon,v1=ab", SECRET, NOW),
            Err(SignatureError::Malformed(_))
        ));
    }

    #[test]
    fn unknown_event_types_are_accepted() {
        let body = payload("charge.refunded");
        let header = sign(&body, SECRET, NOW).unwrap();
        let event = construct_event(&body, &header, SECRET, NOW).unwrap();
        assert_eq!(
            handle_event(&event),
            WebhookEventKind::Unknown("charge.refunded".to_string())
        );
    }

    #[test]
    fn signed_non_json_body_is_an_invalid_payload() {
        let body = b"not json".to_vec();
        let header = sign(&body, SECRET, NOW).unwrap();
        assert!(matches!(
            construct_event(&body, &header, SECRET, NOW),
            Err(SignatureError::InvalidPayload(_))
        ));
    }

    #[test]
    fn recognised_tags_map_to_kinds() {
        assert_eq!(
            WebhookEventKind::parse("customer.subscription.deleted"),
            WebhookEventKind::SubscriptionDeleted
        );
        assert_eq!(
            WebhookEventKind::parse("invoice.payment_failed"),
            WebhookEventKind::InvoicePaymentFailed
        );
    }
}
