//! # Domain Types
//!
//! Core domain types shared by the bill calculator and the category resolver.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    MenuItem     │   │   OrderLine     │   │ PricingOptions  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  item (&)       │   │  discount_rate  │       │
//! │  │  name           │   │  quantity       │   │  discount_fixed │       │
//! │  │  price (major)  │   └─────────────────┘   │  service_rate   │       │
//! │  │  category ──────┼──► Category             │  vat_rate       │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    Category     │   │      Rate       │                             │
//! │  │  Appetizer      │   │  fraction (f64) │                             │
//! │  │  MainCourse     │   │  0.07 = 7%      │                             │
//! │  │  Dessert        │   │  never negative │                             │
//! │  │  Drink          │   └─────────────────┘                             │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// Rate
// =============================================================================

/// A fractional rate (0.07 = 7%).
///
/// ## Why f64 and not basis points?
/// The front-end has always multiplied minor-unit totals by fractional rates
/// and rounded the product. Keeping the same float product keeps receipts
/// identical at tie boundaries.
///
/// Negative and non-finite values are floored to zero on construction.
/// Rates above 1 are kept as given.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Rate(#[ts(type = "number")] f64);

impl Rate {
    /// Creates a rate from a fraction, flooring invalid input to zero.
    pub fn new(fraction: f64) -> Self {
        if fraction.is_finite() && fraction > 0.0 {
            Rate(fraction)
        } else {
            Rate(0.0)
        }
    }

    /// Creates a rate from a percentage (7 → 0.07).
    pub fn from_percentage(pct: f64) -> Self {
        Rate::new(pct / 100.0)
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0.0)
    }

    /// Returns the rate as a fraction.
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 * 100.0
    }

    /// Checks if the rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

impl From<f64> for Rate {
    fn from(fraction: f64) -> Self {
        Rate::new(fraction)
    }
}

impl<'de> Deserialize<'de> for Rate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        f64::deserialize(deserializer).map(Rate::new)
    }
}

impl From<Rate> for f64 {
    fn from(rate: Rate) -> Self {
        rate.0
    }
}

// =============================================================================
// Category
// =============================================================================

/// Menu section an item is listed under.
///
/// The set is closed. Wire names are kebab-case (`"main-course"`), which is
/// what the front-end filters on.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub enum Category {
    /// Starters. Also the fallback when nothing else classifies an item.
    #[default]
    #[serde(rename = "appetizer")]
    Appetizer,
    #[serde(rename = "main-course")]
    MainCourse,
    #[serde(rename = "dessert")]
    Dessert,
    #[serde(rename = "drink")]
    Drink,
}

impl Category {
    /// Every category, in menu order.
    pub const ALL: [Category; 4] = [
        Category::Appetizer,
        Category::MainCourse,
        Category::Dessert,
        Category::Drink,
    ];

    /// Wire name of the category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Appetizer => "appetizer",
            Category::MainCourse => "main-course",
            Category::Dessert => "dessert",
            Category::Drink => "drink",
        }
    }

    /// The `category_id` the backend stores for this category.
    pub const fn backend_id(&self) -> i64 {
        match self {
            Category::Appetizer => 1,
            Category::MainCourse => 2,
            Category::Dessert => 3,
            Category::Drink => 4,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownCategory(s.to_string()))
    }
}

// =============================================================================
// Menu Item
// =============================================================================

/// A canonical menu item, as produced by [`crate::normalize::MenuMapper`].
///
/// Immutable once constructed: classification happens exactly once, during
/// normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MenuItem {
    /// Backend identifier.
    #[ts(type = "number")]
    pub id: u64,

    /// Display name, trimmed.
    pub name: String,

    /// Free text, possibly empty.
    pub description: String,

    /// Unit price in major units (baht). Never negative.
    pub price: f64,

    /// Image URL, or the fallback placeholder.
    pub image: String,

    pub category: Category,

    pub is_available: bool,
}

impl MenuItem {
    /// Returns the unit price in minor units.
    #[inline]
    pub fn price_minor(&self) -> Money {
        Money::from_major(self.price)
    }
}

// =============================================================================
// Order Line
// =============================================================================

/// One line of an order: a menu item and how many of it.
///
/// The line borrows the item; orders are owned by the caller and never
/// persisted here. Lines with `quantity <= 0` are ignored by the bill
/// calculator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderLine<'a> {
    pub item: &'a MenuItem,
    pub quantity: i64,
}

impl<'a> OrderLine<'a> {
    pub fn new(item: &'a MenuItem, quantity: i64) -> Self {
        OrderLine { item, quantity }
    }

    /// Whether the bill calculator will count this line.
    #[inline]
    pub fn is_billable(&self) -> bool {
        self.quantity > 0
    }
}

// =============================================================================
// Pricing Options
// =============================================================================

/// Discounts and surcharges applied when computing a receipt.
///
/// ## Fields
/// - `discount_rate`: percentage discount on the subtotal, as a fraction
/// - `discount_fixed`: flat discount in major units
/// - `service_charge_rate`: charged on the discounted base
/// - `vat_rate`: charged on discounted base plus service charge
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PricingOptions {
    #[serde(default)]
    pub discount_rate: Rate,

    #[serde(default)]
    pub discount_fixed: f64,

    #[serde(default)]
    pub service_charge_rate: Rate,

    #[serde(default)]
    pub vat_rate: Rate,
}

impl PricingOptions {
    /// Creates options from fractions, flooring every value at zero.
    pub fn new(discount_rate: f64, discount_fixed: f64, service_charge_rate: f64, vat_rate: f64) -> Self {
        PricingOptions {
            discount_rate: Rate::new(discount_rate),
            discount_fixed: floor_amount(discount_fixed),
            service_charge_rate: Rate::new(service_charge_rate),
            vat_rate: Rate::new(vat_rate),
        }
    }

    /// Creates options from percentage inputs, the way the checkout screen
    /// collects them (`service_pct = 10` → rate 0.10).
    ///
    /// ## Example
    /// ```rust
    /// use thaifood_core::types::PricingOptions;
    ///
    /// let opts = PricingOptions::from_percentages(0.0, 0.0, 10.0, 7.0);
    /// assert_eq!(opts.service_charge_rate.fraction(), 0.10);
    /// assert_eq!(opts.vat_rate.fraction(), 0.07);
    /// ```
    pub fn from_percentages(
        discount_pct: f64,
        discount_fixed: f64,
        service_charge_pct: f64,
        vat_pct: f64,
    ) -> Self {
        PricingOptions {
            discount_rate: Rate::from_percentage(discount_pct),
            discount_fixed: floor_amount(discount_fixed),
            service_charge_rate: Rate::from_percentage(service_charge_pct),
            vat_rate: Rate::from_percentage(vat_pct),
        }
    }

    /// Flat discount in minor units; zero when the amount is not positive.
    pub fn discount_fixed_minor(&self) -> Money {
        Money::from_major(floor_amount(self.discount_fixed))
    }
}

fn floor_amount(amount: f64) -> f64 {
    if amount.is_finite() && amount > 0.0 {
        amount
    } else {
        0.0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
