use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use zeroerp_core::validation::{require_non_negative, require_positive_count, require_text};
use zeroerp_core::{
    Entity, EntityKind, Lifecycle, OrderId, ValidationContext, ValidationErrors, item_key,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Shipped,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One product line of a sales order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderLine {
    pub sku: String,
    pub quantity: i64,
    /// Unit price charged on this order.
    pub price: f64,
}

impl OrderLine {
    pub fn new(sku: impl Into<String>, quantity: i64, price: f64) -> Self {
        Self {
            sku: sku.into(),
            quantity,
            price,
        }
    }

    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * self.price
    }
}

/// A customer sales order.
///
/// `date` and `status` are set at creation; edits only touch the customer,
/// channel, lines and total. Status moves via [`Lifecycle`] transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer: String,
    pub channel: String,
    pub date: NaiveDate,
    pub items: Vec<OrderLine>,
    pub total: f64,
    pub status: OrderStatus,
}

impl Order {
    /// Units across all lines.
    pub fn total_units(&self) -> i64 {
        self.items
            .iter()
            .map(|line| line.quantity)
            .fold(0i64, i64::saturating_add)
    }
}

/// Add/edit form candidate for a sales order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderDraft {
    pub customer: String,
    pub channel: String,
    /// Order date; today when omitted.
    pub date: Option<NaiveDate>,
    pub items: Vec<OrderLine>,
    pub total: f64,
}

impl OrderDraft {
    /// Sum of the line totals, for callers that don't supply their own total.
    pub fn computed_total(&self) -> f64 {
        self.items.iter().map(OrderLine::line_total).sum()
    }
}

pub fn validate_order(draft: &OrderDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    require_text(&mut errors, "customer", &draft.customer, "Customer is required");
    require_text(&mut errors, "channel", &draft.channel, "Channel is required");

    if draft.items.is_empty() {
        errors.add("items", "At least one item is required");
    }
    for (i, line) in draft.items.iter().enumerate() {
        require_text(&mut errors, &item_key(i, "sku"), &line.sku, "SKU is required");
        require_positive_count(
            &mut errors,
            &item_key(i, "quantity"),
            line.quantity,
            "Quantity must be greater than 0",
        );
        require_non_negative(
            &mut errors,
            &item_key(i, "price"),
            line.price,
            "Price cannot be negative",
        );
    }

    require_non_negative(&mut errors, "total", draft.total, "Total cannot be negative");

    errors
}

impl Entity for Order {
    type Id = OrderId;
    type Draft = OrderDraft;

    const KIND: EntityKind = EntityKind::Order;

    fn id(&self) -> &OrderId {
        &self.id
    }

    fn validate(draft: &OrderDraft, _ctx: &ValidationContext) -> ValidationErrors {
        validate_order(draft)
    }

    fn create(id: OrderId, draft: OrderDraft, ctx: &ValidationContext) -> Self {
        Self {
            id,
            customer: draft.customer,
            channel: draft.channel,
            date: draft.date.unwrap_or(ctx.today),
            items: draft.items,
            total: draft.total,
            status: OrderStatus::Pending,
        }
    }

    fn apply_update(&mut self, draft: OrderDraft) {
        self.customer = draft.customer;
        self.channel = draft.channel;
        self.items = draft.items;
        self.total = draft.total;
    }
}

impl Lifecycle for Order {
    type Status = OrderStatus;

    fn status(&self) -> OrderStatus {
        self.status
    }

    fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
        matches!(
            (from, to),
            (OrderStatus::Pending, OrderStatus::Shipped)
                | (OrderStatus::Shipped, OrderStatus::Delivered)
        )
    }

    fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }
}
