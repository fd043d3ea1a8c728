//! # Receipt Command
//!
//! Bills an order against a menu dump.
//!
//! ## Order File
//! ```json
//! [
//!   { "id": 2, "quantity": 1 },
//!   { "id": 4, "quantity": 2 },
//!   { "id": 2, "quantity": 1 }
//! ]
//! ```
//! Entries for the same id are merged, keeping the position of the first
//! one, so the example bills two of item 2 followed by two of item 4.

use serde::{Deserialize, Serialize};
use thaifood_core::bill::{compute_receipt, Receipt};
use thaifood_core::catalog::find_item;
use thaifood_core::types::{MenuItem, OrderLine, PricingOptions};
use thaifood_core::validation::validate_quantity;
use tracing::{info, warn};

use crate::error::AppResult;

/// One entry of the order file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEntry {
    pub id: u64,
    pub quantity: i64,
}

/// Sums quantities per id, in first-seen order.
pub fn merge_entries(entries: &[OrderEntry]) -> Vec<OrderEntry> {
    let mut merged: Vec<OrderEntry> = Vec::with_capacity(entries.len());

    for entry in entries {
        match merged.iter_mut().find(|m| m.id == entry.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(entry.quantity),
            None => merged.push(*entry),
        }
    }

    merged
}

/// Resolves merged entries against the menu.
///
/// ## Errors
/// - `MenuItemNotFound` for an id that is not on the menu
/// - `Validation` when a merged quantity is not within 1..=999
pub fn order_lines<'a>(menu: &'a [MenuItem], entries: &[OrderEntry]) -> AppResult<Vec<OrderLine<'a>>> {
    merge_entries(entries)
        .into_iter()
        .map(|entry| -> AppResult<OrderLine<'a>> {
            let item = find_item(menu, entry.id)?;
            validate_quantity(entry.quantity)?;
            if !item.is_available {
                warn!(id = item.id, item = %item.name, "Billing an item marked unavailable");
            }
            Ok(OrderLine::new(item, entry.quantity))
        })
        .collect()
}

/// Computes the receipt for an order file's JSON text.
pub fn compute(menu: &[MenuItem], order_json: &str, options: &PricingOptions) -> AppResult<Receipt> {
    let entries: Vec<OrderEntry> = serde_json::from_str(order_json)?;
    let lines = order_lines(menu, &entries)?;
    let receipt = compute_receipt(&lines, options);

    let drift = receipt.line_drift();
    if !drift.is_zero() {
        warn!(%drift, "Line totals do not add up to the subtotal");
    }
    info!(
        lines = receipt.lines.len(),
        grand_total = %receipt.grand_total,
        "Receipt computed"
    );

    Ok(receipt)
}

/// Receipt as pretty-printed JSON.
pub fn render(menu: &[MenuItem], order_json: &str, options: &PricingOptions) -> AppResult<String> {
    let receipt = compute(menu, order_json, options)?;
    Ok(serde_json::to_string_pretty(&receipt)?)
}
