use serde::{Deserialize, Serialize};

use zeroerp_inventory::{InventoryItem, is_low_stock, margin, total_stock};

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InvoiceQuery {
    pub limit: Option<u32>,
}

pub const DEFAULT_INVOICE_LIMIT: u32 = 10;

/// An item with its derived numbers, as the inventory table shows it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemView {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub total_stock: i64,
    pub low_stock: bool,
    pub margin: i64,
}

impl From<&InventoryItem> for InventoryItemView {
    fn from(item: &InventoryItem) -> Self {
        Self {
            total_stock: total_stock(item),
            low_stock: is_low_stock(item),
            margin: margin(item.price, item.cost),
            item: item.clone(),
        }
    }
}
