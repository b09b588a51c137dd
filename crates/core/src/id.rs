//! Strongly-typed identifiers used across the domain.
//!
//! Identifiers are human-readable strings with a per-kind prefix
//! (`SKU-`, `ORD-`, `PO-`). Seed data uses short fixed ids (`SKU-1001`);
//! generated ids look like `SKU-MA1B2C3D0007-042`.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Common surface of the prefixed identifier newtypes.
pub trait PrefixedId:
    Clone + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display + AsRef<str>
{
    /// Prefix without the trailing dash, e.g. `"SKU"`.
    const PREFIX: &'static str;

    /// Wrap a raw string without checking the prefix.
    fn from_raw(raw: String) -> Self;
}

/// Inventory item identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sku(String);

/// Sales order identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

/// Purchase order identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseOrderId(String);

macro_rules! impl_prefixed_id {
    ($t:ty, $prefix:literal) => {
        impl PrefixedId for $t {
            const PREFIX: &'static str = $prefix;

            fn from_raw(raw: String) -> Self {
                Self(raw)
            }
        }

        impl $t {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let rest = s
                    .strip_prefix(concat!($prefix, "-"))
                    .ok_or_else(|| {
                        DomainError::invalid_id(format!("{}: expected prefix {}-", s, $prefix))
                    })?;
                if rest.is_empty()
                    || !rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
                {
                    return Err(DomainError::invalid_id(format!("{}: malformed", s)));
                }
                Ok(Self(s.to_string()))
            }
        }
    };
}

impl_prefixed_id!(Sku, "SKU");
impl_prefixed_id!(OrderId, "ORD");
impl_prefixed_id!(PurchaseOrderId, "PO");

/// Width of the base-36 sequence segment; wraps after 36^4 ids per millisecond.
const SEQUENCE_WIDTH: usize = 4;
const SEQUENCE_MODULUS: u32 = 36 * 36 * 36 * 36;

/// Generates prefixed identifiers without a central sequence.
///
/// Shape: `<PREFIX>-<base36 millis><base36 sequence>-<3 random digits>`,
/// upper-cased. The per-generator sequence keeps ids distinct even when many
/// are drawn within the same millisecond.
#[derive(Debug, Default)]
pub struct IdGenerator {
    sequence: u32,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { sequence: 0 }
    }

    /// Draw the next identifier using the wall clock.
    pub fn next_id<I: PrefixedId>(&mut self) -> I {
        let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
        self.next_id_at(millis)
    }

    /// Draw the next identifier for a given millisecond timestamp.
    pub fn next_id_at<I: PrefixedId>(&mut self, millis: u64) -> I {
        let seq = self.sequence;
        self.sequence = (self.sequence + 1) % SEQUENCE_MODULUS;

        let salt = Uuid::new_v4().as_u128() % 1000;
        let raw = format!(
            "{}-{}{:0>width$}-{:03}",
            I::PREFIX,
            to_base36(millis),
            to_base36(u64::from(seq)),
            salt,
            width = SEQUENCE_WIDTH,
        );
        I::from_raw(raw)
    }
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8_lossy(&buf).into_owned()
}
