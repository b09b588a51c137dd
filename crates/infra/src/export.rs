//! CSV export of entity collections.

use zeroerp_inventory::InventoryItem;
use zeroerp_purchasing::PurchaseOrder;
use zeroerp_sales::Order;

/// A record that can be written as one CSV row.
pub trait CsvRecord {
    const HEADER: &'static [&'static str];
    /// Suggested download file name.
    const FILE_NAME: &'static str;

    fn csv_fields(&self) -> Vec<String>;
}

/// Header line plus one row per record, joined with `\n`.
pub fn encode_csv<T: CsvRecord>(records: &[T]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(T::HEADER.join(","));
    for record in records {
        let row: Vec<String> = record
            .csv_fields()
            .iter()
            .map(|field| escape_field(field))
            .collect();
        lines.push(row.join(","));
    }
    lines.join("\n")
}

/// Quote a field containing a comma, quote or line break; double inner quotes.
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}

impl CsvRecord for InventoryItem {
    const HEADER: &'static [&'static str] = &[
        "ID",
        "Name",
        "Category",
        "Warehouse Stock",
        "Store Stock",
        "Safety Stock",
        "Cost",
        "Price",
        "Vendor",
    ];
    const FILE_NAME: &'static str = "inventory_export.csv";

    fn csv_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.category.clone(),
            self.stock.warehouse.to_string(),
            self.stock.store.to_string(),
            self.safety_stock.to_string(),
            money(self.cost),
            money(self.price),
            self.vendor.clone(),
        ]
    }
}

impl CsvRecord for Order {
    const HEADER: &'static [&'static str] =
        &["Order ID", "Customer", "Channel", "Date", "Total", "Status", "Items"];
    const FILE_NAME: &'static str = "orders_export.csv";

    fn csv_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.customer.clone(),
            self.channel.clone(),
            self.date.to_string(),
            money(self.total),
            self.status.to_string(),
            self.total_units().to_string(),
        ]
    }
}

impl CsvRecord for PurchaseOrder {
    const HEADER: &'static [&'static str] = &["PO ID", "Vendor", "Status", "Expected Date", "Total"];
    const FILE_NAME: &'static str = "purchase_orders_export.csv";

    fn csv_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.vendor.clone(),
            self.status.to_string(),
            self.expected_delivery
                .map(|d| d.to_string())
                .unwrap_or_default(),
            money(self.total),
        ]
    }
}
