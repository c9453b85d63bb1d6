//! Receipt

use std::io;

use rusty_money::{Money, MoneyError, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    view::{CartView, LineView},
};

/// Errors that can occur when building or writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Error capturing cart state or totals.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Checkout summary for a cart.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    /// Lines in insertion order
    lines: Vec<LineView<'a>>,

    /// Total cost before any discount
    subtotal: Money<'a, Currency>,

    /// Total amount payable after any discount
    total: Money<'a, Currency>,
}

impl<'a> Receipt<'a> {
    /// Capture a receipt from the current cart state.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if the cart totals cannot be
    /// calculated.
    pub fn from_cart(cart: &Cart<'a>) -> Result<Self, ReceiptError> {
        let view = CartView::from_cart(cart)?;

        Ok(Self {
            lines: view.lines,
            subtotal: cart.subtotal()?,
            total: view.total,
        })
    }

    /// Total cost before any discount
    #[must_use]
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Total amount payable
    #[must_use]
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// The amount saved by the applied discount code.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction operation fails.
    pub fn savings(&self) -> Result<Money<'a, Currency>, MoneyError> {
        self.subtotal.sub(self.total)
    }

    /// Write the receipt as a table followed by summary lines.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if the receipt cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Qty", "Unit Price", "Line Total"]);

        for (idx, line) in self.lines.iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.name.clone(),
                line.count.to_string(),
                format!("{}", line.unit_price),
                format!("{}", line.line_total),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..5), Alignment::right());

        writeln!(out, "\n{table}").map_err(|_err| ReceiptError::IO)?;

        self.write_summary(&mut out)
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let savings = self.savings()?;

        let subtotal_val = format!("{}", self.subtotal);
        let savings_val = format!("{savings}");
        let total_val = format!("{}", self.total);

        let width = subtotal_val
            .len()
            .max(savings_val.len())
            .max(total_val.len());

        writeln!(out, " Subtotal: {subtotal_val:>width$}").map_err(|_err| ReceiptError::IO)?;
        writeln!(out, "  Savings: {savings_val:>width$}").map_err(|_err| ReceiptError::IO)?;
        writeln!(out, "    Total: {total_val:>width$}").map_err(|_err| ReceiptError::IO)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use crate::products::Product;

    use super::*;

    fn product(id: &str, name: &str, minor_units: i64) -> Product<'static> {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            price: Money::from_minor(minor_units, GBP),
            size: "Medium".to_string(),
            colour: None,
        }
    }

    fn test_cart() -> TestResult<Cart<'static>> {
        let mut cart = Cart::new(GBP);

        cart.add(product("23fdw", "Cotton T-Shirt", 199))?;
        cart.add(product("ad44f", "Baseball Cap", 299))?;

        Ok(cart)
    }

    #[test]
    fn from_cart_captures_subtotal_and_total() -> TestResult {
        let cart = test_cart()?;
        let receipt = Receipt::from_cart(&cart)?;

        assert_eq!(receipt.subtotal(), Money::from_minor(498, GBP));
        assert_eq!(receipt.total(), Money::from_minor(498, GBP));
        assert_eq!(receipt.savings()?, Money::from_minor(0, GBP));

        Ok(())
    }

    #[test]
    fn savings_is_subtotal_minus_total() -> TestResult {
        let mut cart = test_cart()?;
        assert!(cart.apply_discount("JHKDF"));

        let receipt = Receipt::from_cart(&cart)?;

        assert_eq!(receipt.subtotal(), Money::from_minor(498, GBP));
        assert_eq!(receipt.total(), Money::from_minor(423, GBP));
        assert_eq!(receipt.savings()?, Money::from_minor(75, GBP));

        Ok(())
    }

    #[test]
    fn write_to_renders_lines_and_summary() -> TestResult {
        let cart = test_cart()?;
        let receipt = Receipt::from_cart(&cart)?;

        let mut out = Vec::new();
        receipt.write_to(&mut out)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Cotton T-Shirt"));
        assert!(rendered.contains("Baseball Cap"));
        assert!(rendered.contains("Subtotal:"));
        assert!(rendered.contains("£4.98"));

        Ok(())
    }
}
