//! # thaifood-core: Pure Business Logic for the thaifood Menu
//!
//! This crate holds the deterministic core behind the restaurant's ordering
//! front-end: what a bill comes to, and which menu section a dish belongs in.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        thaifood Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Web front-end / checkout CLI                   │   │
//! │  │    Menu tabs ──► Search ──► Cart ──► Receipt                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ raw rows, order lines, options        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ thaifood-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ normalize │  │ category  │  │   bill    │  │  catalog  │  │   │
//! │  │   │ raw rows  │─►│ cascade   │  │ Receipt   │  │  filters  │  │   │
//! │  │   │ payloads  │  │ resolver  │  │ satang    │  │  lookup   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO PERSISTENCE • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  REST menu backend (list / get / create / patch / delete) lives        │
//! │  outside; this crate only shapes its payloads.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (MenuItem, Category, PricingOptions, etc.)
//! - [`money`] - Money type with integer arithmetic
//! - [`bill`] - Receipt computation
//! - [`category`] - Category resolution cascade
//! - [`normalize`] - Backend record mapping
//! - [`catalog`] - Menu filtering and lookup
//! - [`error`] - Domain error types
//! - [`validation`] - Draft and input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, safe to call from any thread
//! 2. **No I/O**: HTTP, files and storage are the caller's business
//! 3. **Integer Money**: bill arithmetic runs in satang (i64)
//! 4. **Never Fail on Numbers**: bad prices and rates are coerced, not rejected
//!
//! ## Example Usage
//!
//! ```rust
//! use thaifood_core::bill::compute_receipt;
//! use thaifood_core::normalize::{BackendMenu, MenuMapper};
//! use thaifood_core::types::{OrderLine, PricingOptions};
//!
//! let rows: Vec<BackendMenu> = serde_json::from_str(
//!     r#"[{"id_item": 1, "item_name": "ผัดไทยกุ้งสด", "price": 120},
//!         {"id_item": 2, "item_name": "ชาไทย", "price": "45"}]"#,
//! ).unwrap();
//! let menu = MenuMapper::default().from_backend_all(&rows);
//!
//! let order = [OrderLine::new(&menu[0], 2), OrderLine::new(&menu[1], 2)];
//! let options = PricingOptions::from_percentages(0.0, 0.0, 10.0, 7.0);
//! let receipt = compute_receipt(&order, &options);
//!
//! assert_eq!(receipt.subtotal.to_major(), 330.0);
//! assert_eq!(receipt.service_charge.to_major(), 33.0);
//! assert_eq!(receipt.vat.to_major(), 25.41);
//! assert_eq!(receipt.grand_total.to_major(), 388.41);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bill;
pub mod catalog;
pub mod category;
pub mod error;
pub mod money;
pub mod normalize;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use bill::{compute_receipt, Receipt, ReceiptLine};
pub use category::{CategoryResolver, CategoryRules, Resolution, ResolvedBy};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use normalize::{BackendMenu, MenuItemDraft, MenuItemPatch, MenuMapper};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Image shown when a menu row has no usable image URL.
pub const DEFAULT_IMAGE_URL: &str = "https://placehold.co/1200x800?text=Food+Image";

/// Maximum quantity of a single item on one order line.
///
/// ## Business Reason
/// Catches fat-fingered input (1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Backend column width for `item_name`, in characters.
pub const MAX_ITEM_NAME_CHARS: usize = 100;

/// Longest accepted menu search query, in characters.
pub const MAX_SEARCH_CHARS: usize = 100;
