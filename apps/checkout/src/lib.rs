//! # thaifood Checkout Library
//!
//! Command-line front-end over thaifood-core. Reads menu dumps and orders
//! as JSON files and prints normalized menus and receipts as JSON.
//!
//! ## Module Organization
//! ```text
//! thaifood_checkout/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── Argument parsing
//! ├── config.rs       ◄─── Layered configuration (TOML + env)
//! ├── commands/
//! │   ├── mod.rs      ◄─── File input
//! │   ├── menu.rs     ◄─── Menu listing
//! │   └── receipt.rs  ◄─── Order billing
//! └── error.rs        ◄─── AppError
//! ```
//!
//! ## Output Contract
//! Results are written to stdout as JSON; logs go to stderr so the output
//! can be piped.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::{menu, read_input, receipt};
use crate::config::CheckoutConfig;
use crate::error::AppResult;

/// Loads configuration and runs the parsed command line.
///
/// Returns the text to print on stdout.
pub fn run(cli: Cli) -> AppResult<String> {
    let config = CheckoutConfig::load()?;
    execute(cli.command, &config)
}

/// Runs a parsed command against a loaded configuration.
pub fn execute(command: Commands, config: &CheckoutConfig) -> AppResult<String> {
    let mapper = config.mapper()?;

    match command {
        Commands::Menu {
            menu_path,
            filter,
            search,
        } => {
            info!(menu = %menu_path.display(), "Listing menu");
            let search = search.as_deref().unwrap_or_default();
            menu::list(&read_input(&menu_path)?, &mapper, filter, search)
        }
        Commands::Receipt {
            menu_path,
            order_path,
            billing,
        } => {
            info!(menu = %menu_path.display(), order = %order_path.display(), "Computing receipt");
            let items = menu::load_menu(&read_input(&menu_path)?, &mapper)?;
            let options = billing.apply(&config.billing).pricing_options();
            receipt::render(&items, &read_input(&order_path)?, &options)
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=thaifood=trace` - Show every category decision
/// - Default: INFO, DEBUG for thaifood crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,thaifood=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
