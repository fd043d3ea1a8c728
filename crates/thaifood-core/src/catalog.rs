//! # Menu Catalog Helpers
//!
//! Filtering and lookup over an already-normalized menu.

use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::types::{Category, MenuItem};

/// Category tab selection: every item, or one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, item: &MenuItem) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => item.category == *category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(category) => f.write_str(category.as_str()),
        }
    }
}

/// Filters by category, then by a case-insensitive substring of name or
/// description.
///
/// The query is trimmed; an empty query keeps every item. Menu order is
/// preserved.
///
/// ## Example
/// ```rust
/// use thaifood_core::catalog::{filter_menu, CategoryFilter};
/// use thaifood_core::normalize::{BackendMenu, MenuMapper};
/// use thaifood_core::types::Category;
///
/// let rows: Vec<BackendMenu> = serde_json::from_str(
///     r#"[{"id": 1, "name": "ต้มยำกุ้ง"}, {"id": 2, "name": "Pepsi"}]"#,
/// ).unwrap();
/// let menu = MenuMapper::default().from_backend_all(&rows);
///
/// let drinks = filter_menu(&menu, CategoryFilter::Only(Category::Drink), "");
/// assert_eq!(drinks.len(), 1);
///
/// let hits = filter_menu(&menu, CategoryFilter::All, " PEP ");
/// assert_eq!(hits[0].id, 2);
/// ```
pub fn filter_menu<'a>(items: &'a [MenuItem], filter: CategoryFilter, query: &str) -> Vec<&'a MenuItem> {
    let query = query.trim().to_lowercase();

    items
        .iter()
        .filter(|item| filter.matches(item))
        .filter(|item| {
            query.is_empty()
                || item.name.to_lowercase().contains(&query)
                || item.description.to_lowercase().contains(&query)
        })
        .collect()
}

/// Looks up an item by backend id.
pub fn find_item(items: &[MenuItem], id: u64) -> CoreResult<&MenuItem> {
    items
        .iter()
        .find(|item| item.id == id)
        .ok_or(CoreError::MenuItemNotFound(id))
}
