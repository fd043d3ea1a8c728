//! # Validation Module
//!
//! Input validation for menu drafts, checkout inputs and configuration.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front-end form                                               │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: thaifood-core (Rust)                                         │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: drafts, percentages, quantities                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend                                                      │
//! │  └── NOT NULL / length constraints on menu_item                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note: none of this runs on the bill or classification path. Those coerce
//! instead of rejecting.
//!
//! ## Usage
//! ```rust
//! use thaifood_core::validation::{validate_item_name, validate_quantity};
//!
//! assert!(validate_item_name("ต้มยำกุ้ง").is_ok());
//! assert!(validate_quantity(2).is_ok());
//! ```

use crate::error::ValidationError;
use crate::{MAX_ITEM_NAME_CHARS, MAX_ITEM_QUANTITY, MAX_SEARCH_CHARS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a menu item name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 100 characters (the backend column width)
///
/// Length is counted in characters, not bytes: Thai text is 3 bytes per
/// character in UTF-8.
///
/// ## Example
/// ```rust
/// use thaifood_core::validation::validate_item_name;
///
/// assert!(validate_item_name("ข้าวเหนียวมะม่วง").is_ok());
/// assert!(validate_item_name("   ").is_err());
/// ```
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "item_name".to_string(),
        });
    }

    if name.chars().count() > MAX_ITEM_NAME_CHARS {
        return Err(ValidationError::TooLong {
            field: "item_name".to_string(),
            max: MAX_ITEM_NAME_CHARS,
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches every item)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_CHARS {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_CHARS,
        });
    }

    Ok(query.to_string())
}

/// Validates an image URL on a draft.
///
/// ## Rules
/// - Empty is allowed (the fallback image is used)
/// - Otherwise must be an `http://` or `https://` URL
pub fn validate_image_url(url: &str) -> ValidationResult<()> {
    let url = url.trim();

    if url.is_empty() || url.starts_with("http://") || url.starts_with("https://") {
        return Ok(());
    }

    Err(ValidationError::InvalidFormat {
        field: "image_url".to_string(),
        reason: "must start with http:// or https://".to_string(),
    })
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an order quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price in major units.
///
/// ## Rules
/// - Must be a finite number
/// - Must be non-negative (zero is allowed for complimentary items)
///
/// ## Example
/// ```rust
/// use thaifood_core::validation::validate_price;
///
/// assert!(validate_price(60.0).is_ok());
/// assert!(validate_price(0.0).is_ok());
/// assert!(validate_price(-1.0).is_err());
/// ```
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if price < 0.0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a percentage input (discount, service charge, VAT).
///
/// ## Rules
/// - Must be finite
/// - Must be between 0 and 100 inclusive
pub fn validate_percentage(field: &str, pct: f64) -> ValidationResult<()> {
    if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

/// Validates a flat discount amount in major units.
pub fn validate_discount_fixed(amount: f64) -> ValidationResult<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(ValidationError::OutOfRange {
            field: "discount_fixed".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("ผัดไทยกุ้งสด").is_ok());
        assert!(validate_item_name("Pepsi").is_ok());

        assert!(validate_item_name("").is_err());
        assert!(validate_item_name("   ").is_err());
        assert!(validate_item_name(&"ก".repeat(101)).is_err());
    }

    #[test]
    fn test_item_name_length_counts_characters() {
        // 100 Thai characters are 300 bytes but still within the limit.
        assert!(validate_item_name(&"ก".repeat(100)).is_ok());
    }

    #[test]
    fn test_validate_search_query_trims() {
        assert_eq!(validate_search_query("  ต้มยำ ").unwrap(), "ต้มยำ");
        assert!(validate_search_query(&"a".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_image_url() {
        assert!(validate_image_url("").is_ok());
        assert!(validate_image_url("https://cdn.example.com/a.jpg").is_ok());
        assert!(validate_image_url("ftp://example.com/a.jpg").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(45.5).is_ok());
        assert!(validate_price(-0.01).is_err());
        assert!(validate_price(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_percentage() {
        assert!(validate_percentage("vat_pct", 0.0).is_ok());
        assert!(validate_percentage("vat_pct", 7.0).is_ok());
        assert!(validate_percentage("vat_pct", 100.0).is_ok());
        assert!(validate_percentage("vat_pct", 100.5).is_err());
        assert!(validate_percentage("vat_pct", -1.0).is_err());
    }

    #[test]
    fn test_validate_discount_fixed() {
        assert!(validate_discount_fixed(0.0).is_ok());
        assert!(validate_discount_fixed(80.0).is_ok());
        assert!(validate_discount_fixed(-5.0).is_err());
    }
}
