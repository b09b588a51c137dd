//! `zeroerp-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the error model, field validation results and the entity traits
//! the stores are generic over.

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod validation;

pub use entity::{Entity, EntityKind, Lifecycle};
pub use error::{DomainError, DomainResult};
pub use id::{IdGenerator, OrderId, PrefixedId, PurchaseOrderId, Sku};
pub use money::{format_currency, round_half_up, to_minor_units};
pub use validation::{ValidationContext, ValidationErrors, item_key};
