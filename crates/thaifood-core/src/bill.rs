//! # Bill Module
//!
//! Turns order lines and pricing options into an itemized [`Receipt`].
//!
//! ## Calculation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Receipt Computation (satang)                         │
//! │                                                                         │
//! │  Σ round(price × 100) × qty ─────────────────────────► subtotal         │
//! │                                                          │              │
//! │  fixed + round(subtotal × discount_rate), ≤ subtotal ──► discount       │
//! │                                                          │              │
//! │  subtotal - discount ─────────────────────────────────► base            │
//! │                                                          │              │
//! │  round(base × service_rate) ──────────────────────────► service charge  │
//! │                                                          │              │
//! │  round((base + service) × vat_rate) ──────────────────► VAT             │
//! │                                                          │              │
//! │  base + service + VAT ────────────────────────────────► grand total     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! VAT is charged on the service-charged base, never on the raw subtotal.
//!
//! ## Line Totals
//! `ReceiptLine::line_total` is `unit_price × quantity` in major units,
//! computed independently of the satang path. Their sum can differ from
//! `subtotal` by a satang per line; printed receipts depend on these exact
//! values, so the difference is reported by [`Receipt::line_drift`] rather
//! than corrected.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::money::{self, Money};
use crate::types::{OrderLine, PricingOptions};

// =============================================================================
// Receipt Types
// =============================================================================

/// One printed line of a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReceiptLine {
    pub name: String,

    #[ts(type = "number")]
    pub quantity: i64,

    /// Unit price in major units, as listed on the menu.
    pub unit_price: f64,

    /// `unit_price × quantity` in major units.
    pub line_total: f64,
}

/// An itemized bill.
///
/// Totals are held in minor units and serialize as major-unit numbers.
/// A receipt is always recomputed from the current order; it has no
/// identity of its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Receipt {
    pub lines: Vec<ReceiptLine>,

    #[serde(with = "money::as_major")]
    #[ts(type = "number")]
    pub subtotal: Money,

    #[serde(with = "money::as_major")]
    #[ts(type = "number")]
    pub discount: Money,

    #[serde(with = "money::as_major")]
    #[ts(type = "number")]
    pub service_charge: Money,

    #[serde(with = "money::as_major")]
    #[ts(type = "number")]
    pub vat: Money,

    #[serde(with = "money::as_major")]
    #[ts(type = "number")]
    pub grand_total: Money,
}

impl Receipt {
    /// Checks if the receipt has no billable lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Subtotal after discount, before service charge and VAT.
    pub fn base_after_discount(&self) -> Money {
        self.subtotal - self.discount
    }

    /// Sum of the per-line totals (converted to minor units) minus the
    /// subtotal.
    ///
    /// Zero for most orders. Non-zero when a unit price has a fractional
    /// satang and the line total rounds differently from the per-unit
    /// conversion.
    ///
    /// ## Example
    /// ```rust
    /// use thaifood_core::bill::compute_receipt;
    /// use thaifood_core::types::{Category, MenuItem, OrderLine, PricingOptions};
    ///
    /// let item = MenuItem {
    ///     id: 1,
    ///     name: "sample".into(),
    ///     description: String::new(),
    ///     price: 0.125,
    ///     image: String::new(),
    ///     category: Category::Appetizer,
    ///     is_available: true,
    /// };
    /// let receipt = compute_receipt(&[OrderLine::new(&item, 3)], &PricingOptions::default());
    ///
    /// // 13 satang × 3 = 39, but 0.375 baht → 38 satang
    /// assert_eq!(receipt.subtotal.minor(), 39);
    /// assert_eq!(receipt.line_drift().minor(), -1);
    /// ```
    pub fn line_drift(&self) -> Money {
        let lines: Money = self
            .lines
            .iter()
            .map(|line| Money::from_major(line.line_total))
            .sum();
        lines - self.subtotal
    }
}

// =============================================================================
// Computation
// =============================================================================

/// Computes an itemized receipt.
///
/// ## Rules
/// - Lines with `quantity <= 0` are skipped entirely
/// - Negative rates and amounts count as zero
/// - Discount is clamped to the subtotal, so the base is never negative
/// - An empty order yields an all-zero receipt
///
/// ## Example
/// ```rust
/// use thaifood_core::bill::compute_receipt;
/// use thaifood_core::types::{Category, MenuItem, OrderLine, PricingOptions};
///
/// let set_menu = MenuItem {
///     id: 7,
///     name: "ชุดใหญ่".into(),
///     description: String::new(),
///     price: 1000.0,
///     image: String::new(),
///     category: Category::MainCourse,
///     is_available: true,
/// };
/// let options = PricingOptions::new(0.0, 0.0, 0.10, 0.07);
/// let receipt = compute_receipt(&[OrderLine::new(&set_menu, 1)], &options);
///
/// assert_eq!(receipt.service_charge.to_major(), 100.0);
/// assert_eq!(receipt.vat.to_major(), 77.0);
/// assert_eq!(receipt.grand_total.to_major(), 1177.0);
/// ```
pub fn compute_receipt(lines: &[OrderLine<'_>], options: &PricingOptions) -> Receipt {
    let billable: Vec<&OrderLine<'_>> = lines.iter().filter(|l| l.is_billable()).collect();

    let subtotal: Money = billable
        .iter()
        .map(|l| l.item.price_minor().multiply_quantity(l.quantity))
        .sum();

    let mut discount = Money::zero();
    let fixed = options.discount_fixed_minor();
    if fixed.is_positive() {
        discount += fixed;
    }
    if !options.discount_rate.is_zero() {
        discount += subtotal.apply_rate(options.discount_rate);
    }
    // The fixed part is floored at zero, so only the upper bound can bite.
    let discount = discount.min(subtotal);

    let base = subtotal - discount;
    let service_charge = base.apply_rate(options.service_charge_rate);
    let vat = (base + service_charge).apply_rate(options.vat_rate);
    let grand_total = base + service_charge + vat;

    let receipt_lines = billable
        .iter()
        .map(|l| ReceiptLine {
            name: l.item.name.clone(),
            quantity: l.quantity,
            unit_price: l.item.price,
            line_total: l.item.price * l.quantity as f64,
        })
        .collect();

    debug!(
        lines = billable.len(),
        subtotal = %subtotal,
        discount = %discount,
        service_charge = %service_charge,
        vat = %vat,
        grand_total = %grand_total,
        "Receipt computed"
    );

    Receipt {
        lines: receipt_lines,
        subtotal,
        discount,
        service_charge,
        vat,
        grand_total,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
