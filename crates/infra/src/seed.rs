//! Starter data used when nothing has been persisted yet.

use chrono::NaiveDate;

use zeroerp_core::PrefixedId;

use zeroerp_inventory::{InventoryItem, Stock};
use zeroerp_purchasing::{LineItem, PurchaseOrder, PurchaseOrderStatus};
use zeroerp_sales::{Order, OrderLine, OrderStatus};

fn seeded_id<I: PrefixedId>(raw: &str) -> I {
    I::from_raw(raw.to_string())
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

#[allow(clippy::too_many_arguments)]
fn item(
    id: &str,
    name: &str,
    category: &str,
    warehouse: i64,
    store: i64,
    safety_stock: i64,
    cost: f64,
    price: f64,
    vendor: &str,
) -> InventoryItem {
    InventoryItem {
        id: seeded_id(id),
        name: name.to_string(),
        category: category.to_string(),
        stock: Stock::new(warehouse, store),
        safety_stock,
        cost,
        price,
        vendor: vendor.to_string(),
    }
}

pub fn inventory() -> Vec<InventoryItem> {
    vec![
        item("SKU-1001", "Wireless Mouse", "Electronics", 120, 35, 40, 8.50, 24.99, "TechSource"),
        item("SKU-1002", "Mechanical Keyboard", "Electronics", 12, 4, 25, 38.00, 89.99, "TechSource"),
        item("SKU-1003", "USB-C Cable 2m", "Accessories", 300, 80, 100, 1.20, 9.99, "CableWorks"),
        item("SKU-1004", "Laptop Stand", "Office", 0, 6, 15, 14.75, 39.99, "DeskPro"),
        item("SKU-1005", "Noise Cancelling Headphones", "Electronics", 22, 8, 20, 62.00, 149.00, "SoundWave"),
        item("SKU-1006", "Desk Lamp", "Office", 9, 3, 18, 11.40, 29.50, "DeskPro"),
    ]
}

pub fn orders() -> Vec<Order> {
    let order = |id: &str, customer: &str, channel: &str, day: NaiveDate, items: Vec<OrderLine>, status| {
        let total = items.iter().map(OrderLine::line_total).sum();
        Order {
            id: seeded_id(id),
            customer: customer.to_string(),
            channel: channel.to_string(),
            date: day,
            items,
            total,
            status,
        }
    };

    vec![
        order(
            "ORD-1001",
            "Jane Cooper",
            "Shopify",
            date(2024, 5, 2),
            vec![OrderLine::new("SKU-1001", 2, 24.99), OrderLine::new("SKU-1003", 3, 9.99)],
            OrderStatus::Delivered,
        ),
        order(
            "ORD-1002",
            "Northwind Traders",
            "Direct",
            date(2024, 5, 6),
            vec![OrderLine::new("SKU-1002", 5, 89.99)],
            OrderStatus::Shipped,
        ),
        order(
            "ORD-1003",
            "Marcus Lee",
            "Amazon",
            date(2024, 5, 9),
            vec![OrderLine::new("SKU-1005", 1, 149.00)],
            OrderStatus::Pending,
        ),
        order(
            "ORD-1004",
            "Priya Shah",
            "Shopify",
            date(2024, 5, 10),
            vec![OrderLine::new("SKU-1004", 1, 39.99), OrderLine::new("SKU-1006", 2, 29.50)],
            OrderStatus::Pending,
        ),
    ]
}

pub fn purchase_orders() -> Vec<PurchaseOrder> {
    let po = |id: &str, vendor: &str, items: Vec<LineItem>, expected: Option<NaiveDate>, status| {
        let total = items.iter().map(LineItem::line_total).sum();
        PurchaseOrder {
            id: seeded_id(id),
            vendor: vendor.to_string(),
            items,
            total,
            expected_delivery: expected,
            status,
        }
    };

    vec![
        po(
            "PO-9001",
            "TechSource",
            vec![LineItem::new("Mechanical Keyboard", 40, 38.00)],
            Some(date(2024, 5, 20)),
            PurchaseOrderStatus::Ordered,
        ),
        po(
            "PO-9002",
            "DeskPro",
            vec![LineItem::new("Laptop Stand", 30, 14.75), LineItem::new("Desk Lamp", 25, 11.40)],
            Some(date(2024, 5, 24)),
            PurchaseOrderStatus::Ordered,
        ),
        po(
            "PO-9003",
            "CableWorks",
            vec![LineItem::new("USB-C Cable 2m", 500, 1.20)],
            None,
            PurchaseOrderStatus::Received,
        ),
    ]
}
