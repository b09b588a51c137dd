//! Purchasing domain module.
//!
//! Purchase orders placed with vendors, their validation and receive
//! lifecycle. Pure domain logic (no IO, no HTTP, no storage).

pub mod metrics;
pub mod order;
pub mod replenishment;

pub use metrics::{open_po_value, pending_purchase_orders, received_purchase_orders, total_po_value};
pub use order::{
    LineItem, PurchaseOrder, PurchaseOrderDraft, PurchaseOrderStatus, validate_purchase_order,
};
pub use replenishment::draft_from_suggestion;
