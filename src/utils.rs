//! Utils

use clap::Parser;

/// Arguments for the basket demo
#[derive(Debug, Parser)]
pub struct DemoBasketArgs {
    /// Fixture set to use for the catalogue & cart
    #[clap(short, long, default_value = "demo")]
    pub fixture: String,

    /// Discount code to apply at checkout
    #[clap(short, long)]
    pub code: Option<String>,
}
