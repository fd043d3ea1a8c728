//! Command-line interface.
//!
//! ```bash
//! thaifood-checkout menu menu.json --category drink --search ชา
//! thaifood-checkout receipt menu.json order.json --discount-pct 10 --vat-pct 0
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use thaifood_core::catalog::CategoryFilter;
use thaifood_core::validation::{validate_discount_fixed, validate_percentage, validate_search_query};

use crate::config::BillingConfig;

/// thaifood checkout: normalized menus and receipts from JSON dumps
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "thaifood-checkout")]
#[command(version, about, long_about = None)]
#[command(after_help = "Logs go to stderr; set RUST_LOG to change verbosity.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Print the normalized, filtered menu as JSON
    Menu {
        /// Menu dump: JSON array of backend rows
        menu_path: PathBuf,

        /// Category tab: appetizer, main-course, dessert, drink or all
        #[arg(long = "category", default_value = "all", value_parser = parse_category_filter)]
        filter: CategoryFilter,

        /// Case-insensitive text matched against name and description
        #[arg(long, value_parser = parse_search)]
        search: Option<String>,
    },

    /// Print the receipt for an order as JSON
    Receipt {
        /// Menu dump: JSON array of backend rows
        menu_path: PathBuf,

        /// Order: JSON array of { "id", "quantity" }
        order_path: PathBuf,

        #[command(flatten)]
        billing: BillingOverrides,
    },
}

/// Pricing flags given on the command line. Unset flags keep the
/// configured value.
#[derive(Args, Debug, Clone, Copy, Default, PartialEq)]
pub struct BillingOverrides {
    /// Percentage discount on the subtotal
    #[arg(long = "discount-pct", allow_negative_numbers = true, value_parser = parse_percentage)]
    pub discount_pct: Option<f64>,

    /// Flat discount in baht
    #[arg(long = "discount-fixed", allow_negative_numbers = true, value_parser = parse_amount)]
    pub discount_fixed: Option<f64>,

    /// Service charge percentage
    #[arg(long = "service-pct", allow_negative_numbers = true, value_parser = parse_percentage)]
    pub service_charge_pct: Option<f64>,

    /// VAT percentage
    #[arg(long = "vat-pct", allow_negative_numbers = true, value_parser = parse_percentage)]
    pub vat_pct: Option<f64>,
}

impl BillingOverrides {
    /// Applies the overrides on top of `base`.
    pub fn apply(&self, base: &BillingConfig) -> BillingConfig {
        BillingConfig {
            discount_pct: self.discount_pct.unwrap_or(base.discount_pct),
            discount_fixed: self.discount_fixed.unwrap_or(base.discount_fixed),
            service_charge_pct: self.service_charge_pct.unwrap_or(base.service_charge_pct),
            vat_pct: self.vat_pct.unwrap_or(base.vat_pct),
        }
    }
}

// =============================================================================
// Value Parsers
// =============================================================================

fn parse_category_filter(value: &str) -> Result<CategoryFilter, String> {
    value
        .parse()
        .map_err(|_| format!("unknown category '{}'", value))
}

fn parse_search(value: &str) -> Result<String, String> {
    validate_search_query(value).map_err(|e| e.to_string())
}

fn parse_number(value: &str) -> Result<f64, String> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("expected a number, got '{}'", value))
}

fn parse_percentage(value: &str) -> Result<f64, String> {
    let pct = parse_number(value)?;
    validate_percentage("percentage", pct).map_err(|e| e.to_string())?;
    Ok(pct)
}

fn parse_amount(value: &str) -> Result<f64, String> {
    let amount = parse_number(value)?;
    validate_discount_fixed(amount).map_err(|e| e.to_string())?;
    Ok(amount)
}
