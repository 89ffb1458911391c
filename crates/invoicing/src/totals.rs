//! Derived invoice amounts.
//!
//! Amounts are plain `f64` with IEEE semantics. Nothing here rounds; rounding
//! only happens when an amount is formatted for display.

use serde::{Deserialize, Serialize};

use invoicedesk_core::ValueObject;

use crate::invoice::LineItem;

/// Total of a single line: `quantity * unit_price`.
pub fn calculate_line_item_total(quantity: f64, unit_price: f64) -> f64 {
    quantity * unit_price
}

/// Sum of the stored line totals.
pub fn calculate_subtotal(items: &[LineItem]) -> f64 {
    items.iter().map(|item| item.total).sum()
}

/// Invoice total. `tax` is an amount, not a rate.
pub fn calculate_total(subtotal: f64, tax: f64) -> f64 {
    subtotal + tax
}

/// Subtotal, tax and total of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

impl InvoiceTotals {
    pub fn from_line_items(items: &[LineItem], tax: f64) -> Self {
        let subtotal = calculate_subtotal(items);
        Self {
            subtotal,
            tax,
            total: calculate_total(subtotal, tax),
        }
    }
}

impl ValueObject for InvoiceTotals {}
