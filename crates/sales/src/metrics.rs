//! Order list views and revenue.

use crate::order::{Order, OrderStatus};

fn with_status(orders: &[Order], status: OrderStatus) -> Vec<&Order> {
    orders.iter().filter(|order| order.status == status).collect()
}

pub fn pending_orders(orders: &[Order]) -> Vec<&Order> {
    with_status(orders, OrderStatus::Pending)
}

pub fn shipped_orders(orders: &[Order]) -> Vec<&Order> {
    with_status(orders, OrderStatus::Shipped)
}

pub fn delivered_orders(orders: &[Order]) -> Vec<&Order> {
    with_status(orders, OrderStatus::Delivered)
}

pub fn pending_count(orders: &[Order]) -> usize {
    orders
        .iter()
        .filter(|order| order.status == OrderStatus::Pending)
        .count()
}

/// Σ order totals, regardless of status.
pub fn total_revenue(orders: &[Order]) -> f64 {
    orders.iter().map(|order| order.total).sum()
}
