//! # Backend Record Normalization
//!
//! Maps raw menu rows from the REST backend to canonical [`MenuItem`]s, and
//! canonical items back to backend payloads.
//!
//! ## Field Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BackendMenu (raw)                     MenuItem (canonical)             │
//! │  ─────────────────                     ────────────────────             │
//! │  id_item ?? id ?? 0  ────────────────► id                               │
//! │  item_name ?? name ?? "" (trimmed) ──► name                             │
//! │  description ?? "" ──────────────────► description                      │
//! │  price: 60 | "60" | junk ────────────► price (junk / negative → 0)      │
//! │  image_url: "'https://..'" ──unquote─► image (empty → fallback)         │
//! │  category_id + name ──resolver───────► category                         │
//! │  is_available: true | 1 | "0" | ∅ ───► is_available (∅ → true)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Normalization never fails. Two backend generations are in the wild, so
//! both the `id`/`name` and the `id_item`/`item_name` spellings are accepted;
//! the `_item` spelling wins when both are present.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::category::CategoryResolver;
use crate::error::CoreResult;
use crate::types::{Category, MenuItem};
use crate::validation::{validate_image_url, validate_item_name, validate_price};
use crate::DEFAULT_IMAGE_URL;

// =============================================================================
// Lenient Raw Values
// =============================================================================

/// A number that may arrive as a JSON number or as a string.
///
/// Integers keep their own variant so ids and flags go back out as `4`,
/// not `4.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Int(i64),
    Number(f64),
    Text(String),
}

impl RawNumber {
    /// Numeric value, if any. Strings are trimmed; an empty string is 0.
    pub fn value(&self) -> Option<f64> {
        match self {
            RawNumber::Int(n) => Some(*n as f64),
            RawNumber::Number(n) => Some(*n),
            RawNumber::Text(s) => parse_numeric_text(s),
        }
    }
}

/// An availability flag: boolean, 0/1 number, or numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawFlag {
    Bool(bool),
    Int(i64),
    Number(f64),
    Text(String),
}

impl RawFlag {
    /// Booleans as-is; numbers are true when non-zero; text that is not a
    /// number is false.
    pub fn is_set(&self) -> bool {
        match self {
            RawFlag::Bool(b) => *b,
            RawFlag::Int(n) => *n != 0,
            RawFlag::Number(n) => is_truthy(*n),
            RawFlag::Text(s) => parse_numeric_text(s).map(is_truthy).unwrap_or(false),
        }
    }
}

fn parse_numeric_text(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0.0);
    }
    text.parse::<f64>().ok()
}

fn is_truthy(n: f64) -> bool {
    n != 0.0 && !n.is_nan()
}

// =============================================================================
// Backend Record
// =============================================================================

/// A menu row as the backend sends or accepts it.
///
/// Every field is optional: the same type serves full records, create
/// payloads and partial updates. Unset fields are not serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendMenu {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_item: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<RawNumber>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<RawNumber>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_available: Option<RawFlag>,
}

impl BackendMenu {
    /// The category hint, when the backend sent an integral number.
    ///
    /// Strings are not hints, even numeric ones.
    pub fn category_hint(&self) -> Option<i64> {
        match self.category_id {
            Some(RawNumber::Int(n)) => Some(n),
            Some(RawNumber::Number(n)) if n.is_finite() && n.fract() == 0.0 => Some(n as i64),
            _ => None,
        }
    }
}

/// Full payload for an existing item.
impl From<&MenuItem> for BackendMenu {
    fn from(item: &MenuItem) -> Self {
        BackendMenu {
            id_item: Some(item.id as i64),
            item_name: Some(item.name.clone()),
            description: Some(item.description.clone()),
            price: Some(RawNumber::Number(item.price)),
            image_url: Some(item.image.clone()),
            category_id: Some(category_id(item.category)),
            is_available: Some(flag(item.is_available)),
            ..BackendMenu::default()
        }
    }
}

fn category_id(category: Category) -> RawNumber {
    RawNumber::Int(category.backend_id())
}

fn flag(on: bool) -> RawFlag {
    RawFlag::Int(i64::from(on))
}

fn flag_text(on: bool) -> String {
    String::from(if on { "1" } else { "0" })
}

/// Strips surrounding whitespace and one pair of matching quotes.
///
/// Some rows store the URL with its SQL quotes (`'https://...'`).
pub fn clean_url(raw: Option<&str>) -> String {
    let url = raw.unwrap_or("").trim();
    let quoted = |q: char| url.len() >= 2 && url.starts_with(q) && url.ends_with(q);

    if quoted('\'') || quoted('"') {
        url[1..url.len() - 1].trim().to_string()
    } else if url == "'" || url == "\"" {
        String::new()
    } else {
        url.to_string()
    }
}

// =============================================================================
// Mapper
// =============================================================================

/// Converts backend rows into canonical menu items.
///
/// ## Usage
/// ```rust
/// use thaifood_core::normalize::{BackendMenu, MenuMapper};
/// use thaifood_core::types::Category;
///
/// let raw: BackendMenu = serde_json::from_str(
///     r#"{"id_item": 3, "item_name": " ชาไทย ", "price": "45", "is_available": 1}"#,
/// ).unwrap();
///
/// let item = MenuMapper::default().from_backend(&raw);
/// assert_eq!(item.name, "ชาไทย");
/// assert_eq!(item.price, 45.0);
/// assert_eq!(item.category, Category::Drink);
/// assert!(item.is_available);
/// ```
#[derive(Debug, Clone)]
pub struct MenuMapper {
    resolver: CategoryResolver,
    fallback_image: String,
}

impl MenuMapper {
    pub fn new(resolver: CategoryResolver, fallback_image: impl Into<String>) -> Self {
        MenuMapper {
            resolver,
            fallback_image: fallback_image.into(),
        }
    }

    pub fn resolver(&self) -> &CategoryResolver {
        &self.resolver
    }

    pub fn fallback_image(&self) -> &str {
        &self.fallback_image
    }

    /// Normalizes one backend row. Never fails.
    pub fn from_backend(&self, raw: &BackendMenu) -> MenuItem {
        let id = match raw.id_item.or(raw.id) {
            Some(id) if id >= 0 => id as u64,
            other => {
                debug!(raw_id = ?other, "Menu row without a usable id, using 0");
                0
            }
        };

        let name = raw
            .item_name
            .as_deref()
            .or(raw.name.as_deref())
            .unwrap_or("")
            .trim()
            .to_string();

        let image = match clean_url(raw.image_url.as_deref()) {
            url if url.is_empty() => self.fallback_image.clone(),
            url => url,
        };

        let price = match raw.price.as_ref().map(|p| (p, p.value())) {
            None => 0.0,
            Some((_, Some(p))) if p.is_finite() && p >= 0.0 => p,
            Some((original, _)) => {
                debug!(id, price = ?original, "Unusable menu price, using 0");
                0.0
            }
        };

        let is_available = raw.is_available.as_ref().map_or(true, RawFlag::is_set);
        let category = self.resolver.resolve(&name, raw.category_hint());

        MenuItem {
            id,
            category,
            name,
            description: raw.description.clone().unwrap_or_default(),
            price,
            image,
            is_available,
        }
    }

    /// Normalizes a list of rows, keeping their order.
    pub fn from_backend_all(&self, rows: &[BackendMenu]) -> Vec<MenuItem> {
        rows.iter().map(|row| self.from_backend(row)).collect()
    }
}

impl Default for MenuMapper {
    fn default() -> Self {
        MenuMapper::new(CategoryResolver::default(), DEFAULT_IMAGE_URL)
    }
}

// =============================================================================
// Outgoing Payloads
// =============================================================================

/// A new menu item, before the backend has assigned an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    /// Image URL; `None` when the image is uploaded as a file instead.
    #[serde(default)]
    pub image: Option<String>,
    pub category: Category,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

impl MenuItemDraft {
    /// Checks name, price and image URL.
    pub fn validate(&self) -> CoreResult<()> {
        validate_item_name(&self.name)?;
        validate_price(self.price)?;
        if let Some(image) = &self.image {
            validate_image_url(image)?;
        }
        Ok(())
    }

    /// JSON create payload.
    pub fn to_backend(&self) -> BackendMenu {
        BackendMenu {
            item_name: Some(self.name.trim().to_string()),
            description: Some(self.description.clone()),
            price: Some(RawNumber::Number(self.price)),
            image_url: self.image.clone(),
            category_id: Some(category_id(self.category)),
            is_available: Some(flag(self.is_available)),
            ..BackendMenu::default()
        }
    }

    /// Multipart fields for a create-with-upload request, in send order.
    ///
    /// The image file part is added by the transport.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("item_name", self.name.trim().to_string()),
            ("description", self.description.clone()),
            ("price", self.price.to_string()),
            ("category_id", self.category.backend_id().to_string()),
            ("is_available", flag_text(self.is_available)),
        ]
    }
}

/// A partial update. Only fields that are `Some` are sent, so an update
/// never overwrites a column with null by accident.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub is_available: Option<bool>,
}

impl MenuItemPatch {
    /// Patch that only opens or closes an item for sale.
    pub fn availability(on: bool) -> Self {
        MenuItemPatch {
            is_available: Some(on),
            ..MenuItemPatch::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == MenuItemPatch::default()
    }

    /// Checks the fields that are set.
    pub fn validate(&self) -> CoreResult<()> {
        if let Some(name) = &self.name {
            validate_item_name(name)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        if let Some(image) = &self.image {
            validate_image_url(image)?;
        }
        Ok(())
    }

    /// JSON partial-update payload.
    ///
    /// ## Example
    /// ```rust
    /// use thaifood_core::normalize::MenuItemPatch;
    ///
    /// let body = serde_json::to_value(MenuItemPatch::availability(false).to_backend()).unwrap();
    /// assert_eq!(body, serde_json::json!({ "is_available": 0 }));
    /// ```
    pub fn to_backend(&self) -> BackendMenu {
        BackendMenu {
            item_name: self.name.clone(),
            description: self.description.clone(),
            price: self.price.map(RawNumber::Number),
            image_url: self.image.clone(),
            category_id: self.category.map(category_id),
            is_available: self.is_available.map(flag),
            ..BackendMenu::default()
        }
    }

    /// Multipart fields for an update-with-upload request.
    ///
    /// The image travels as a file part, so `image` is not included.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(name) = &self.name {
            fields.push(("item_name", name.clone()));
        }
        if let Some(description) = &self.description {
            fields.push(("description", description.clone()));
        }
        if let Some(price) = self.price {
            fields.push(("price", price.to_string()));
        }
        if let Some(category) = self.category {
            fields.push(("category_id", category.backend_id().to_string()));
        }
        if let Some(on) = self.is_available {
            fields.push(("is_available", flag_text(on)));
        }
        fields
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(value: serde_json::Value) -> MenuItem {
        let raw: BackendMenu = serde_json::from_value(value).unwrap();
        MenuMapper::default().from_backend(&raw)
    }

    #[test]
    fn test_prefers_item_spelling() {
        let item = normalize(json!({
            "id": 1, "id_item": 9,
            "name": "old", "item_name": "ลอดช่อง"
        }));
        assert_eq!(item.id, 9);
        assert_eq!(item.name, "ลอดช่อง");
        assert_eq!(item.category, Category::Dessert);
    }

    #[test]
    fn test_falls_back_to_plain_spelling() {
        let item = normalize(json!({ "id": 4, "name": "  ต้มยำกุ้ง  " }));
        assert_eq!(item.id, 4);
        assert_eq!(item.name, "ต้มยำกุ้ง");
    }

    #[test]
    fn test_missing_and_negative_ids_become_zero() {
        assert_eq!(normalize(json!({ "name": "x" })).id, 0);
        assert_eq!(normalize(json!({ "id": -7 })).id, 0);
    }

    #[test]
    fn test_empty_record_defaults() {
        let item = normalize(json!({}));
        assert_eq!(item.name, "");
        assert_eq!(item.description, "");
        assert_eq!(item.price, 0.0);
        assert_eq!(item.image, DEFAULT_IMAGE_URL);
        assert_eq!(item.category, Category::Appetizer);
        assert!(item.is_available);
    }

    #[test]
    fn test_price_coercion() {
        assert_eq!(normalize(json!({ "price": 59.5 })).price, 59.5);
        assert_eq!(normalize(json!({ "price": " 120 " })).price, 120.0);
        assert_eq!(normalize(json!({ "price": "" })).price, 0.0);
        assert_eq!(normalize(json!({ "price": "ฟรี" })).price, 0.0);
        assert_eq!(normalize(json!({ "price": null })).price, 0.0);
        assert_eq!(normalize(json!({ "price": -15 })).price, 0.0);
        assert_eq!(normalize(json!({ "price": "NaN" })).price, 0.0);
    }

    #[test]
    fn test_image_url_cleanup() {
        let quoted = normalize(json!({ "image_url": " 'https://img.example.com/a.jpg' " }));
        assert_eq!(quoted.image, "https://img.example.com/a.jpg");

        let double = normalize(json!({ "image_url": "\" https://img.example.com/b.jpg \"" }));
        assert_eq!(double.image, "https://img.example.com/b.jpg");

        let empty_quotes = normalize(json!({ "image_url": "''" }));
        assert_eq!(empty_quotes.image, DEFAULT_IMAGE_URL);

        let blank = normalize(json!({ "image_url": "   " }));
        assert_eq!(blank.image, DEFAULT_IMAGE_URL);
    }

    #[test]
    fn test_clean_url_keeps_unbalanced_quotes() {
        assert_eq!(clean_url(Some("'https://x.test/a.jpg")), "'https://x.test/a.jpg");
        assert_eq!(clean_url(Some("'")), "");
        assert_eq!(clean_url(None), "");
    }

    #[test]
    fn test_availability_coercion() {
        assert!(normalize(json!({ "is_available": true })).is_available);
        assert!(!normalize(json!({ "is_available": false })).is_available);
        assert!(normalize(json!({ "is_available": 1 })).is_available);
        assert!(!normalize(json!({ "is_available": 0 })).is_available);
        assert!(!normalize(json!({ "is_available": "0" })).is_available);
        assert!(normalize(json!({ "is_available": "1" })).is_available);
        assert!(!normalize(json!({ "is_available": "yes" })).is_available);
        assert!(normalize(json!({ "is_available": null })).is_available);
    }

    #[test]
    fn test_category_hint_only_from_integral_numbers() {
        assert_eq!(normalize(json!({ "name": "แกงส้ม", "category_id": 2 })).category, Category::MainCourse);
        assert_eq!(normalize(json!({ "name": "แกงส้ม", "category_id": "2" })).category, Category::Appetizer);
        assert_eq!(normalize(json!({ "name": "แกงส้ม", "category_id": 2.5 })).category, Category::Appetizer);
    }

    #[test]
    fn test_override_wins_over_backend_category() {
        let item = normalize(json!({ "item_name": "เป๊ปซี่", "category_id": 1 }));
        assert_eq!(item.category, Category::Drink);
    }

    #[test]
    fn test_custom_fallback_image() {
        let mapper = MenuMapper::new(CategoryResolver::default(), "https://cdn.test/none.png");
        let item = mapper.from_backend(&BackendMenu::default());
        assert_eq!(item.image, "https://cdn.test/none.png");
    }

    #[test]
    fn test_round_trip_preserves_identity_fields() {
        let mapper = MenuMapper::default();
        let rows: Vec<BackendMenu> = serde_json::from_value(json!([
            { "id_item": 1, "item_name": "หมูสะเต๊ะ", "price": 89, "category_id": 1 },
            { "id_item": 2, "item_name": "แกงเขียวหวานไก่", "price": "129.50", "category_id": 2 },
            { "id": 3, "name": "ข้าวเหนียวมะม่วงสุก", "price": 75.25 },
            { "id_item": 4, "item_name": "น้ำเปล่า", "price": 15, "category_id": 5, "is_available": 0 }
        ]))
        .unwrap();

        for item in mapper.from_backend_all(&rows) {
            let payload = BackendMenu::from(&item);
            let json = serde_json::to_value(&payload).unwrap();
            let back: BackendMenu = serde_json::from_value(json).unwrap();
            let again = mapper.from_backend(&back);

            assert_eq!(again.id, item.id);
            assert_eq!(again.name, item.name);
            assert_eq!(again.price, item.price);
            assert_eq!(again.category, item.category);
            assert_eq!(again.is_available, item.is_available);
        }
    }

    #[test]
    fn test_full_payload_shape() {
        let item = normalize(json!({ "id_item": 5, "item_name": "ชาไทย", "price": 45 }));
        let body = serde_json::to_value(BackendMenu::from(&item)).unwrap();

        assert_eq!(body["id_item"], json!(5));
        assert_eq!(body["item_name"], json!("ชาไทย"));
        assert_eq!(body["category_id"], json!(4));
        assert_eq!(body["is_available"], json!(1));
        assert_eq!(body["price"], json!(45.0));
        assert!(body.get("id").is_none());
        assert!(body.get("name").is_none());
    }

    #[test]
    fn test_draft_payloads() {
        let draft = MenuItemDraft {
            name: " ผัดไทยกุ้งสด ".to_string(),
            description: "เส้นจันท์".to_string(),
            price: 120.0,
            image: None,
            category: Category::MainCourse,
            is_available: false,
        };
        assert!(draft.validate().is_ok());

        let body = draft.to_backend();
        assert_eq!(body.item_name.as_deref(), Some("ผัดไทยกุ้งสด"));
        assert!(body.id_item.is_none());
        assert!(body.image_url.is_none());

        assert_eq!(
            draft.form_fields(),
            vec![
                ("item_name", "ผัดไทยกุ้งสด".to_string()),
                ("description", "เส้นจันท์".to_string()),
                ("price", "120".to_string()),
                ("category_id", "2".to_string()),
                ("is_available", "0".to_string()),
            ]
        );
    }

    #[test]
    fn test_draft_validation() {
        let draft = MenuItemDraft {
            name: "".to_string(),
            description: String::new(),
            price: 10.0,
            image: None,
            category: Category::Drink,
            is_available: true,
        };
        assert!(draft.validate().is_err());

        let negative = MenuItemDraft {
            name: "ชาไทย".to_string(),
            price: -1.0,
            ..draft
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_patch_sends_only_set_fields() {
        let patch = MenuItemPatch {
            price: Some(49.5),
            category: Some(Category::Dessert),
            ..MenuItemPatch::default()
        };
        let body = serde_json::to_value(patch.to_backend()).unwrap();
        assert_eq!(body, json!({ "price": 49.5, "category_id": 3 }));

        assert_eq!(
            patch.form_fields(),
            vec![("price", "49.5".to_string()), ("category_id", "3".to_string())]
        );
    }

    #[test]
    fn test_availability_patch() {
        let patch = MenuItemPatch::availability(true);
        assert!(!patch.is_empty());
        assert_eq!(patch.form_fields(), vec![("is_available", "1".to_string())]);
        assert!(MenuItemPatch::default().is_empty());
    }

    #[test]
    fn test_patch_image_is_not_a_form_field() {
        let patch = MenuItemPatch {
            image: Some("https://img.test/new.jpg".to_string()),
            ..MenuItemPatch::default()
        };
        assert!(patch.validate().is_ok());
        assert!(patch.form_fields().is_empty());
        assert_eq!(
            patch.to_backend().image_url.as_deref(),
            Some("https://img.test/new.jpg")
        );
    }

    #[test]
    fn test_outgoing_ids_and_flags_are_integers() {
        let item = normalize(json!({ "id_item": 7, "item_name": "ลอดช่อง", "price": 35, "is_available": false }));
        let text = serde_json::to_string(&BackendMenu::from(&item)).unwrap();

        assert!(text.contains(r#""category_id":3"#));
        assert!(text.contains(r#""is_available":0"#));
        assert!(!text.contains("3.0"));

        let draft = MenuItemDraft {
            name: "ชาไทย".to_string(),
            description: String::new(),
            price: 45.0,
            image: None,
            category: Category::Drink,
            is_available: true,
        };
        let body = serde_json::to_value(draft.to_backend()).unwrap();
        assert_eq!(body["category_id"], json!(4));
        assert_eq!(body["is_available"], json!(1));
    }

    #[test]
    fn test_raw_values_accept_integers_and_floats() {
        let int: RawNumber = serde_json::from_value(json!(2)).unwrap();
        assert_eq!(int, RawNumber::Int(2));
        let float: RawNumber = serde_json::from_value(json!(2.5)).unwrap();
        assert_eq!(float, RawNumber::Number(2.5));

        assert_eq!(normalize(json!({ "name": "แกงส้ม", "category_id": 2.0 })).category, Category::MainCourse);
        assert!(RawFlag::Int(1).is_set());
        assert!(!RawFlag::Int(0).is_set());
    }
}
