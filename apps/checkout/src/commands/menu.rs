//! # Menu Command
//!
//! Normalizes a raw menu dump and prints the filtered list.

use thaifood_core::catalog::{filter_menu, CategoryFilter};
use thaifood_core::normalize::{BackendMenu, MenuMapper};
use thaifood_core::types::MenuItem;
use tracing::info;

use crate::error::AppResult;

/// Parses a JSON array of backend rows into canonical items.
pub fn load_menu(menu_json: &str, mapper: &MenuMapper) -> AppResult<Vec<MenuItem>> {
    let rows: Vec<BackendMenu> = serde_json::from_str(menu_json)?;
    let items = mapper.from_backend_all(&rows);
    info!(items = items.len(), "Menu loaded");
    Ok(items)
}

/// Filtered menu as pretty-printed JSON.
pub fn list(menu_json: &str, mapper: &MenuMapper, filter: CategoryFilter, search: &str) -> AppResult<String> {
    let items = load_menu(menu_json, mapper)?;
    let hits = filter_menu(&items, filter, search);
    info!(%filter, search, shown = hits.len(), "Menu filtered");
    Ok(serde_json::to_string_pretty(&hits)?)
}
