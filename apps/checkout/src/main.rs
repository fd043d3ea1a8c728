//! # thaifood Checkout
//!
//! ```bash
//! thaifood-checkout menu menu.json --category drink
//! thaifood-checkout receipt menu.json order.json --service-pct 10 --vat-pct 7
//! ```

use std::process::ExitCode;

use clap::Parser;
use thaifood_checkout::cli::Cli;
use tracing::error;

fn main() -> ExitCode {
    let cli = Cli::parse();
    thaifood_checkout::init_tracing();

    match thaifood_checkout::run(cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "Checkout failed");
            ExitCode::FAILURE
        }
    }
}
