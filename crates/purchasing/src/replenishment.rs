//! Turning a reorder suggestion into a purchase order draft.

use zeroerp_inventory::ReorderSuggestion;

use crate::order::{LineItem, PurchaseOrderDraft};

/// Draft a single-line purchase order for the suggested quantity.
///
/// The caller still submits the draft through the purchase order store, so
/// it is validated like any other. A zero suggestion yields a draft that
/// fails the quantity rule.
pub fn draft_from_suggestion(suggestion: &ReorderSuggestion) -> PurchaseOrderDraft {
    let line = LineItem::new(
        suggestion.name.clone(),
        suggestion.suggested_qty,
        suggestion.unit_cost,
    );
    let mut draft = PurchaseOrderDraft {
        vendor: suggestion.vendor.clone(),
        items: vec![line],
        total: 0.0,
        expected_delivery: None,
    };
    draft.total = draft.computed_total();
    draft
}
