//! Inventory domain module.
//!
//! This crate contains business rules for stocked items, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod item;
pub mod metrics;
pub mod replenishment;

pub use item::{InventoryDraft, InventoryItem, Stock, validate_item};
pub use metrics::{
    InventorySummary, is_low_stock, low_stock_count, low_stock_items, margin, normal_stock_items,
    search, summarize, total_stock, total_stock_value,
};
pub use replenishment::{
    ReorderReason, ReorderSuggestion, recommendations, reorder_reason, suggested_reorder_qty,
};
