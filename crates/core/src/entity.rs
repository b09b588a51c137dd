//! Entity traits: identity, validation and status lifecycle.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::id::PrefixedId;
use crate::validation::{ValidationContext, ValidationErrors};

/// The entity collections the system keeps.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Inventory,
    Order,
    PurchaseOrder,
}

impl EntityKind {
    /// Suffix of the blob-store key holding this collection.
    pub fn storage_key(self) -> &'static str {
        match self {
            EntityKind::Inventory => "inventory",
            EntityKind::Order => "orders",
            EntityKind::PurchaseOrder => "purchase_orders",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Inventory => "inventory item",
            EntityKind::Order => "order",
            EntityKind::PurchaseOrder => "purchase order",
        }
    }
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record owned by an entity store.
///
/// `Draft` is the user-supplied candidate (form data). Drafts are validated
/// before they become records; records themselves are trusted.
pub trait Entity: Clone + core::fmt::Debug + Serialize + DeserializeOwned {
    type Id: PrefixedId + Serialize + DeserializeOwned;
    type Draft: Clone + core::fmt::Debug;

    const KIND: EntityKind;

    fn id(&self) -> &Self::Id;

    /// Pure validation of a candidate. Empty result means valid.
    fn validate(draft: &Self::Draft, ctx: &ValidationContext) -> ValidationErrors;

    /// Build a new record from a validated draft.
    fn create(id: Self::Id, draft: Self::Draft, ctx: &ValidationContext) -> Self;

    /// Replace the mutable fields from a validated draft. Identity and
    /// creation-only fields stay untouched.
    fn apply_update(&mut self, draft: Self::Draft);
}

/// Records with a one-directional status lifecycle.
pub trait Lifecycle: Entity {
    type Status: Copy + Eq + core::fmt::Debug + core::fmt::Display;

    fn status(&self) -> Self::Status;

    /// Whether `from -> to` is a direct allowed edge.
    fn can_transition(from: Self::Status, to: Self::Status) -> bool;

    /// Set the status. Callers check `can_transition` first.
    fn set_status(&mut self, status: Self::Status);
}
