//! The three entity stores bundled behind one object.

use serde::Serialize;

use zeroerp_core::{DomainError, DomainResult, EntityKind, OrderId, PurchaseOrderId, Sku};
use zeroerp_inventory::{InventoryItem, InventorySummary, ReorderSuggestion, summarize};
use zeroerp_purchasing::{
    PurchaseOrder, PurchaseOrderStatus, draft_from_suggestion, open_po_value, total_po_value,
};
use zeroerp_sales::{Order, OrderStatus, pending_count, total_revenue};

use crate::blob_store::BlobStore;
use crate::seed;
use crate::store::EntityStore;

/// Headline numbers across all collections.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub inventory: InventorySummary,
    pub order_count: usize,
    pub pending_orders: usize,
    pub total_revenue: f64,
    pub purchase_order_count: usize,
    pub open_po_value: f64,
    pub total_po_value: f64,
}

/// Inventory, sales orders and purchase orders sharing one blob store.
#[derive(Debug)]
pub struct ErpStore<S: BlobStore + Clone> {
    pub inventory: EntityStore<InventoryItem, S>,
    pub orders: EntityStore<Order, S>,
    pub purchase_orders: EntityStore<PurchaseOrder, S>,
}

impl<S> ErpStore<S>
where
    S: BlobStore + Clone,
{
    /// Load every collection from `blob`, seeding the ones with nothing usable stored.
    pub fn open(blob: S, namespace: &str) -> Self {
        Self {
            inventory: EntityStore::load(blob.clone(), namespace, seed::inventory()),
            orders: EntityStore::load(blob.clone(), namespace, seed::orders()),
            purchase_orders: EntityStore::load(blob, namespace, seed::purchase_orders()),
        }
    }

    /// Empty collections, ignoring anything stored.
    pub fn empty(blob: S, namespace: &str) -> Self {
        Self {
            inventory: EntityStore::with_records(blob.clone(), namespace, vec![]),
            orders: EntityStore::with_records(blob.clone(), namespace, vec![]),
            purchase_orders: EntityStore::with_records(blob, namespace, vec![]),
        }
    }

    /// Pending → Shipped.
    pub fn fulfill_order(&mut self, id: &OrderId) -> DomainResult<Order> {
        self.orders.transition(id, OrderStatus::Shipped)
    }

    /// Shipped → Delivered.
    pub fn mark_delivered(&mut self, id: &OrderId) -> DomainResult<Order> {
        self.orders.transition(id, OrderStatus::Delivered)
    }

    /// Ordered → Received. Stock levels are not adjusted.
    pub fn receive_purchase_order(&mut self, id: &PurchaseOrderId) -> DomainResult<PurchaseOrder> {
        self.purchase_orders
            .transition(id, PurchaseOrderStatus::Received)
    }

    /// Place a purchase order for an item's suggested reorder quantity.
    pub fn reorder(&mut self, sku: &Sku) -> DomainResult<PurchaseOrder> {
        let item = self
            .inventory
            .get(sku)
            .ok_or_else(|| DomainError::not_found(EntityKind::Inventory, sku.to_string()))?;
        let draft = draft_from_suggestion(&ReorderSuggestion::for_item(item));
        self.purchase_orders.add(draft)
    }

    pub fn dashboard(&self) -> Dashboard {
        let orders = self.orders.list();
        let purchase_orders = self.purchase_orders.list();
        Dashboard {
            inventory: summarize(self.inventory.list()),
            order_count: orders.len(),
            pending_orders: pending_count(orders),
            total_revenue: total_revenue(orders),
            purchase_order_count: purchase_orders.len(),
            open_po_value: open_po_value(purchase_orders),
            total_po_value: total_po_value(purchase_orders),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::blob_store::InMemoryBlobStore;
    use crate::store::storage_key;

    fn seeded() -> ErpStore<Arc<InMemoryBlobStore>> {
        ErpStore::open(Arc::new(InMemoryBlobStore::new()), "test")
    }

    #[test]
    fn opening_an_empty_blob_store_uses_seed_data() {
        let erp = seeded();
        assert_eq!(erp.inventory.len(), seed::inventory().len());
        assert_eq!(erp.orders.len(), seed::orders().len());
        assert_eq!(erp.purchase_orders.len(), seed::purchase_orders().len());
    }

    #[test]
    fn fulfil_then_deliver_a_pending_order() {
        let mut erp = seeded();
        let id: OrderId = "ORD-1003".parse().unwrap();

        assert!(matches!(
            erp.mark_delivered(&id),
            Err(DomainError::InvalidTransition { .. })
        ));
        assert_eq!(erp.fulfill_order(&id).unwrap().status, OrderStatus::Shipped);
        assert_eq!(erp.mark_delivered(&id).unwrap().status, OrderStatus::Delivered);
    }

    #[test]
    fn receiving_twice_is_rejected() {
        let mut erp = seeded();
        let id: PurchaseOrderId = "PO-9001".parse().unwrap();
        erp.receive_purchase_order(&id).unwrap();
        assert!(matches!(
            erp.receive_purchase_order(&id),
            Err(DomainError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn reorder_places_an_open_purchase_order() {
        let mut erp = seeded();
        let before = erp.purchase_orders.len();
        let sku: Sku = "SKU-1004".parse().unwrap();

        let po = erp.reorder(&sku).unwrap();
        assert_eq!(po.vendor, "DeskPro");
        assert_eq!(po.status, PurchaseOrderStatus::Ordered);
        // safety 15 * 2 - (0 + 6) on hand
        assert_eq!(po.items[0].quantity, 24);
        assert_eq!(erp.purchase_orders.len(), before + 1);
    }

    #[test]
    fn reorder_of_unknown_item_is_not_found() {
        let mut erp = seeded();
        let sku: Sku = "SKU-0000".parse().unwrap();
        assert!(matches!(erp.reorder(&sku), Err(DomainError::NotFound { .. })));
    }

    #[test]
    fn dashboard_reflects_the_collections() {
        let erp = seeded();
        let dash = erp.dashboard();
        assert_eq!(dash.inventory.item_count, erp.inventory.len());
        assert_eq!(dash.order_count, 4);
        assert_eq!(dash.pending_orders, 2);
        assert!(dash.open_po_value > 0.0);
        assert!(dash.total_po_value >= dash.open_po_value);
    }

    #[test]
    fn changes_survive_a_reopen() {
        let blob = Arc::new(InMemoryBlobStore::new());
        let mut erp = ErpStore::open(Arc::clone(&blob), "test");
        erp.fulfill_order(&"ORD-1003".parse().unwrap()).unwrap();

        assert!(blob.get(&storage_key::<Order>("test")).unwrap().is_some());
        let reopened = ErpStore::open(blob, "test");
        let order = reopened.orders.get(&"ORD-1003".parse().unwrap()).unwrap();
        assert_eq!(order.status, OrderStatus::Shipped);
    }

    #[test]
    fn empty_store_ignores_seed_data() {
        let erp = ErpStore::empty(Arc::new(InMemoryBlobStore::new()), "test");
        assert!(erp.inventory.is_empty());
        assert!(erp.orders.is_empty());
    }
}
