//! Purchase order list views and spend.

use crate::order::{PurchaseOrder, PurchaseOrderStatus};

/// Orders still awaiting delivery.
pub fn pending_purchase_orders(orders: &[PurchaseOrder]) -> Vec<&PurchaseOrder> {
    orders
        .iter()
        .filter(|po| po.status == PurchaseOrderStatus::Ordered)
        .collect()
}

pub fn received_purchase_orders(orders: &[PurchaseOrder]) -> Vec<&PurchaseOrder> {
    orders
        .iter()
        .filter(|po| po.status == PurchaseOrderStatus::Received)
        .collect()
}

pub fn total_po_value(orders: &[PurchaseOrder]) -> f64 {
    orders.iter().map(|po| po.total).sum()
}

/// Value of the orders not yet received.
pub fn open_po_value(orders: &[PurchaseOrder]) -> f64 {
    orders
        .iter()
        .filter(|po| po.is_open())
        .map(|po| po.total)
        .sum()
}
