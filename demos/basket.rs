//! Basket Demo
//!
//! Loads the demo fixture set, pre-fills a cart, optionally applies a
//! discount code, and prints the catalogue, the rendered cart HTML and
//! the receipt.
//!
//! Run with: `cargo run --example basket -- --code JHKDF`

use std::io;

use anyhow::Result;
use clap::Parser;

use trolley::{
    fixtures::Fixture,
    receipt::Receipt,
    utils::DemoBasketArgs,
    view::{PageElement, product_html},
};

/// Basket Demo
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = DemoBasketArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;
    let mut cart = fixture.cart()?;

    if let Some(code) = &args.code {
        if cart.apply_discount(code) {
            println!("Discount code accepted.");
        } else {
            println!("Discount code rejected.");
        }
    }

    let page = PageElement::new();
    cart.add_listener(page.clone())?;

    let mut products: Vec<_> = fixture
        .catalog()
        .iter()
        .map(|(_key, product)| product)
        .collect();

    products.sort_by(|a, b| a.id.cmp(&b.id));

    println!("\nCatalogue:");

    for product in products {
        let in_cart = cart
            .iter()
            .find(|line| line.product().id == product.id)
            .map(trolley::items::LineItem::count);

        println!("{}", product_html(product, in_cart));
    }

    println!("\nCart:\n{}", page.content());

    Receipt::from_cart(&cart)?.write_to(io::stdout())?;

    Ok(())
}
