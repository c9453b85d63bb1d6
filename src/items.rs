//! Line Items

use rusty_money::{Money, iso::Currency};

use crate::{pricing::TotalPriceError, products::Product};

/// One distinct product entry in the cart, with an associated count.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem<'a> {
    product: Product<'a>,
    count: u32,
}

impl<'a> LineItem<'a> {
    /// Creates a new line for a product entering the cart.
    #[must_use]
    pub fn new(product: Product<'a>) -> Self {
        Self { product, count: 1 }
    }

    /// Returns the product on this line
    pub fn product(&self) -> &Product<'a> {
        &self.product
    }

    /// Number of units of the product on this line
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Add one unit to the line.
    pub(crate) fn increment(&mut self) {
        self.count = self.count.saturating_add(1);
    }

    /// Drop one unit from the line. The cart deletes the whole line
    /// instead of decrementing past one.
    pub(crate) fn decrement(&mut self) {
        self.count = self.count.saturating_sub(1);
    }

    /// The line's contribution to the cart total: unit price × count.
    ///
    /// # Errors
    ///
    /// Returns [`TotalPriceError::Overflow`] if the multiplication does
    /// not fit in minor units.
    pub fn line_total(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        let minor_units = self
            .product
            .price
            .to_minor_units()
            .checked_mul(i64::from(self.count))
            .ok_or(TotalPriceError::Overflow)?;

        Ok(Money::from_minor(minor_units, self.product.price.currency()))
    }
}
