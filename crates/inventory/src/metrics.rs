//! Derived inventory metrics.
//!
//! Everything here is a pure function of a collection snapshot and is
//! recomputed on each read; nothing is cached.

use serde::Serialize;

use zeroerp_core::round_half_up;

use crate::item::InventoryItem;

/// Warehouse plus store units.
pub fn total_stock(item: &InventoryItem) -> i64 {
    item.stock.total()
}

/// Strictly below safety stock. Sitting exactly at safety stock is not low.
pub fn is_low_stock(item: &InventoryItem) -> bool {
    total_stock(item) < item.safety_stock
}

/// Gross margin as a whole percentage of price.
///
/// Zero price yields zero. A price below cost yields a negative margin.
pub fn margin(price: f64, cost: f64) -> i64 {
    if price == 0.0 {
        return 0;
    }
    round_half_up((price - cost) / price * 100.0) as i64
}

/// Σ units on hand × unit cost.
pub fn total_stock_value(items: &[InventoryItem]) -> f64 {
    items
        .iter()
        .map(|item| total_stock(item) as f64 * item.cost)
        .sum()
}

pub fn low_stock_count(items: &[InventoryItem]) -> usize {
    items.iter().filter(|item| is_low_stock(item)).count()
}

pub fn low_stock_items(items: &[InventoryItem]) -> Vec<&InventoryItem> {
    items.iter().filter(|item| is_low_stock(item)).collect()
}

pub fn normal_stock_items(items: &[InventoryItem]) -> Vec<&InventoryItem> {
    items.iter().filter(|item| !is_low_stock(item)).collect()
}

/// Case-insensitive substring match on name or SKU. Blank query matches all.
pub fn search<'a>(items: &'a [InventoryItem], query: &str) -> Vec<&'a InventoryItem> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|item| {
            item.name.to_lowercase().contains(&needle)
                || item.id.as_str().to_lowercase().contains(&needle)
        })
        .collect()
}

/// Headline inventory numbers for a dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub item_count: usize,
    pub total_units: i64,
    pub total_stock_value: f64,
    pub low_stock_count: usize,
}

pub fn summarize(items: &[InventoryItem]) -> InventorySummary {
    InventorySummary {
        item_count: items.len(),
        total_units: items
            .iter()
            .map(total_stock)
            .fold(0i64, i64::saturating_add),
        total_stock_value: total_stock_value(items),
        low_stock_count: low_stock_count(items),
    }
}
