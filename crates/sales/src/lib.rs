//! Sales Orders domain module.
//!
//! This crate contains business rules for sales orders, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod metrics;
pub mod order;

pub use metrics::{delivered_orders, pending_count, pending_orders, shipped_orders, total_revenue};
pub use order::{Order, OrderDraft, OrderLine, OrderStatus, validate_order};
