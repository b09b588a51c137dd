//! Advisory reorder suggestions for low-stock items.
//!
//! Suggestions never touch stock levels; acting on one means creating a
//! purchase order.

use serde::Serialize;

use zeroerp_core::Sku;

use crate::item::InventoryItem;
use crate::metrics::{is_low_stock, total_stock};

/// Why an item needs restocking.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum ReorderReason {
    /// Nothing left in the warehouse.
    #[serde(rename = "Stockout Risk")]
    StockoutRisk,
    #[serde(rename = "Below Safety Level")]
    BelowSafetyLevel,
}

impl ReorderReason {
    pub fn as_str(self) -> &'static str {
        match self {
            ReorderReason::StockoutRisk => "Stockout Risk",
            ReorderReason::BelowSafetyLevel => "Below Safety Level",
        }
    }
}

impl core::fmt::Display for ReorderReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderSuggestion {
    pub sku: Sku,
    pub name: String,
    pub vendor: String,
    pub current_stock: i64,
    pub safety_stock: i64,
    pub suggested_qty: i64,
    pub unit_cost: f64,
    pub reason: ReorderReason,
}

impl ReorderSuggestion {
    pub fn for_item(item: &InventoryItem) -> Self {
        Self {
            sku: item.id.clone(),
            name: item.name.clone(),
            vendor: item.vendor.clone(),
            current_stock: total_stock(item),
            safety_stock: item.safety_stock,
            suggested_qty: suggested_reorder_qty(item),
            unit_cost: item.cost,
            reason: reorder_reason(item),
        }
    }

    /// Cost of ordering the suggested quantity.
    pub fn estimated_cost(&self) -> f64 {
        self.suggested_qty as f64 * self.unit_cost
    }
}

/// Top the item back up to twice its safety stock.
pub fn suggested_reorder_qty(item: &InventoryItem) -> i64 {
    item.safety_stock
        .saturating_mul(2)
        .saturating_sub(total_stock(item))
        .max(0)
}

pub fn reorder_reason(item: &InventoryItem) -> ReorderReason {
    if item.stock.warehouse == 0 {
        ReorderReason::StockoutRisk
    } else {
        ReorderReason::BelowSafetyLevel
    }
}

/// One suggestion per low-stock item, in collection order.
pub fn recommendations(items: &[InventoryItem]) -> Vec<ReorderSuggestion> {
    items
        .iter()
        .filter(|item| is_low_stock(item))
        .map(ReorderSuggestion::for_item)
        .collect()
}
