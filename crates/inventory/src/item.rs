use serde::{Deserialize, Serialize};

use zeroerp_core::validation::{
    require_non_negative, require_non_negative_count, require_text,
};
use zeroerp_core::{Entity, EntityKind, Sku, ValidationContext, ValidationErrors};

/// Units on hand, split by location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stock {
    pub warehouse: i64,
    pub store: i64,
}

impl Stock {
    pub fn new(warehouse: i64, store: i64) -> Self {
        Self { warehouse, store }
    }

    /// Saturates at `i64::MAX`; quantities have no upper bound.
    pub fn total(&self) -> i64 {
        self.warehouse.saturating_add(self.store)
    }
}

/// A stocked product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: Sku,
    pub name: String,
    pub category: String,
    pub stock: Stock,
    pub safety_stock: i64,
    /// Unit cost in major currency units.
    pub cost: f64,
    /// Unit selling price in major currency units.
    pub price: f64,
    pub vendor: String,
}

impl InventoryItem {
    /// Draft pre-filled from this record (the edit form).
    pub fn to_draft(&self) -> InventoryDraft {
        InventoryDraft {
            name: self.name.clone(),
            category: self.category.clone(),
            vendor: self.vendor.clone(),
            cost: self.cost,
            price: self.price,
            warehouse: self.stock.warehouse,
            store: self.stock.store,
            safety_stock: self.safety_stock,
        }
    }
}

/// Add/edit form candidate for an inventory item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InventoryDraft {
    pub name: String,
    pub category: String,
    pub vendor: String,
    pub cost: f64,
    pub price: f64,
    pub warehouse: i64,
    pub store: i64,
    pub safety_stock: i64,
}

/// Validate an inventory draft.
///
/// Price must exceed cost only when both are positive; a zero price or zero
/// cost (not yet known) is accepted.
pub fn validate_item(draft: &InventoryDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    require_text(&mut errors, "name", &draft.name, "Product name is required");
    require_text(&mut errors, "category", &draft.category, "Category is required");
    require_text(&mut errors, "vendor", &draft.vendor, "Vendor is required");

    require_non_negative(&mut errors, "cost", draft.cost, "Cost cannot be negative");
    require_non_negative(&mut errors, "price", draft.price, "Price cannot be negative");
    if draft.price > 0.0 && draft.cost > 0.0 && draft.price <= draft.cost {
        errors.add("price", "Price must be greater than cost");
    }

    require_non_negative_count(
        &mut errors,
        "warehouse",
        draft.warehouse,
        "Warehouse stock cannot be negative",
    );
    require_non_negative_count(&mut errors, "store", draft.store, "Store stock cannot be negative");
    require_non_negative_count(
        &mut errors,
        "safetyStock",
        draft.safety_stock,
        "Safety stock cannot be negative",
    );

    errors
}

impl Entity for InventoryItem {
    type Id = Sku;
    type Draft = InventoryDraft;

    const KIND: EntityKind = EntityKind::Inventory;

    fn id(&self) -> &Sku {
        &self.id
    }

    fn validate(draft: &InventoryDraft, _ctx: &ValidationContext) -> ValidationErrors {
        validate_item(draft)
    }

    fn create(id: Sku, draft: InventoryDraft, _ctx: &ValidationContext) -> Self {
        Self {
            id,
            name: draft.name,
            category: draft.category,
            stock: Stock::new(draft.warehouse, draft.store),
            safety_stock: draft.safety_stock,
            cost: draft.cost,
            price: draft.price,
            vendor: draft.vendor,
        }
    }

    fn apply_update(&mut self, draft: InventoryDraft) {
        self.name = draft.name;
        self.category = draft.category;
        self.vendor = draft.vendor;
        self.stock = Stock::new(draft.warehouse, draft.store);
        self.safety_stock = draft.safety_stock;
        self.cost = draft.cost;
        self.price = draft.price;
    }
}
