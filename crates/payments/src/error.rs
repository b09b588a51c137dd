use thiserror::Error;

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Failure talking to the payment gateway.
///
/// The gateway's own message is kept verbatim so callers can surface it.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("payment gateway is not configured")]
    NotConfigured,

    #[error("{message}")]
    Api { status: u16, message: String },

    /// Rejected before any request was sent (e.g. a malformed identifier).
    #[error("invalid gateway request: {0}")]
    InvalidRequest(String),

    #[error("gateway request failed: {0}")]
    Transport(String),

    #[error("unexpected gateway response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

/// Why a webhook delivery was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("missing signature header")]
    MissingHeader,

    #[error("no timestamp in signature header")]
    MissingTimestamp,

    #[error("no v1 signature in signature header")]
    MissingSignature,

    #[error("malformed signature header: {0}")]
    Malformed(String),

    #[error("timestamp outside the tolerance zone ({age_secs}s old)")]
    OutsideTolerance { age_secs: i64 },

    #[error("no signatures found matching the expected signature for payload")]
    Mismatch,

    #[error("invalid event payload: {0}")]
    InvalidPayload(String),
}
