use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use zeroerp_core::validation::{require_non_negative, require_positive_count, require_text};
use zeroerp_core::{
    Entity, EntityKind, Lifecycle, PurchaseOrderId, ValidationContext, ValidationErrors, item_key,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PurchaseOrderStatus {
    Ordered,
    Received,
}

impl PurchaseOrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PurchaseOrderStatus::Ordered => "Ordered",
            PurchaseOrderStatus::Received => "Received",
        }
    }
}

impl core::fmt::Display for PurchaseOrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineItem {
    pub name: String,
    pub quantity: i64,
    pub unit_cost: f64,
}

impl LineItem {
    pub fn new(name: impl Into<String>, quantity: i64, unit_cost: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit_cost,
        }
    }

    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * self.unit_cost
    }
}

/// An order placed with a vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub id: PurchaseOrderId,
    pub vendor: String,
    pub items: Vec<LineItem>,
    pub total: f64,
    #[serde(default, alias = "expected")]
    pub expected_delivery: Option<NaiveDate>,
    pub status: PurchaseOrderStatus,
}

impl PurchaseOrder {
    pub fn is_open(&self) -> bool {
        self.status == PurchaseOrderStatus::Ordered
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PurchaseOrderDraft {
    pub vendor: String,
    pub items: Vec<LineItem>,
    pub total: f64,
    pub expected_delivery: Option<NaiveDate>,
}

impl PurchaseOrderDraft {
    pub fn computed_total(&self) -> f64 {
        self.items.iter().map(LineItem::line_total).sum()
    }
}

/// Validate a purchase order draft against `ctx.today`.
///
/// An expected delivery date of today is fine; yesterday is not.
pub fn validate_purchase_order(
    draft: &PurchaseOrderDraft,
    ctx: &ValidationContext,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    require_text(&mut errors, "vendor", &draft.vendor, "Vendor is required");

    if draft.items.is_empty() {
        errors.add("items", "At least one item is required");
    }
    for (i, line) in draft.items.iter().enumerate() {
        require_text(&mut errors, &item_key(i, "name"), &line.name, "Item name is required");
        require_positive_count(
            &mut errors,
            &item_key(i, "quantity"),
            line.quantity,
            "Quantity must be greater than 0",
        );
        require_non_negative(
            &mut errors,
            &item_key(i, "unitCost"),
            line.unit_cost,
            "Unit cost cannot be negative",
        );
    }

    require_non_negative(&mut errors, "total", draft.total, "Total cannot be negative");

    if let Some(expected) = draft.expected_delivery {
        if expected < ctx.today {
            errors.add("expectedDelivery", "Expected delivery date cannot be in the past");
        }
    }

    errors
}

impl Entity for PurchaseOrder {
    type Id = PurchaseOrderId;
    type Draft = PurchaseOrderDraft;

    const KIND: EntityKind = EntityKind::PurchaseOrder;

    fn id(&self) -> &PurchaseOrderId {
        &self.id
    }

    fn validate(draft: &PurchaseOrderDraft, ctx: &ValidationContext) -> ValidationErrors {
        validate_purchase_order(draft, ctx)
    }

    fn create(id: PurchaseOrderId, draft: PurchaseOrderDraft, _ctx: &ValidationContext) -> Self {
        Self {
            id,
            vendor: draft.vendor,
            items: draft.items,
            total: draft.total,
            expected_delivery: draft.expected_delivery,
            status: PurchaseOrderStatus::Ordered,
        }
    }

    fn apply_update(&mut self, draft: PurchaseOrderDraft) {
        self.vendor = draft.vendor;
        self.items = draft.items;
        self.total = draft.total;
        self.expected_delivery = draft.expected_delivery;
    }
}

impl Lifecycle for PurchaseOrder {
    type Status = PurchaseOrderStatus;

    fn status(&self) -> PurchaseOrderStatus {
        self.status
    }

    fn can_transition(from: PurchaseOrderStatus, to: PurchaseOrderStatus) -> bool {
        from == PurchaseOrderStatus::Ordered && to == PurchaseOrderStatus::Received
    }

    fn set_status(&mut self, status: PurchaseOrderStatus) {
        self.status = status;
    }
}
