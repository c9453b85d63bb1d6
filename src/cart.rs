//! Cart

use decimal_percentage::Percentage;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    discounts::{DiscountError, DiscountState, discounted_total, verify_code},
    items::LineItem,
    pricing::{TotalPriceError, total_price},
    products::Product,
    view::{CartView, RenderTarget},
};

/// Errors related to cart mutation, rendering, or totals.
#[derive(Debug, Error)]
pub enum CartError {
    /// A product's currency differs from the cart currency (product id, product currency, cart currency).
    #[error("Product {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),

    /// A render target was registered without being attached to a page.
    #[error("render target is not attached to a page")]
    DetachedTarget,

    /// Errors bubbled up from total price calculation.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// Errors bubbled up from discount calculation.
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

/// In-memory shopping cart.
///
/// Lines are kept in insertion order. Adding merges on product **name**;
/// removal matches on product **id**. A registered [`RenderTarget`] is
/// re-rendered after every add or remove.
#[derive(Debug)]
pub struct Cart<'a> {
    items: SmallVec<[LineItem<'a>; 10]>,
    currency: &'static Currency,
    rate: Percentage,
    discount: DiscountState,
    listener: Option<Box<dyn RenderTarget>>,
}

impl<'a> Cart<'a> {
    /// Create an empty cart priced in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: SmallVec::new(),
            currency,
            rate: Percentage::from(0.0),
            discount: DiscountState::Inactive,
            listener: None,
        }
    }

    /// Add a product to the cart.
    ///
    /// If a line with the same product name already exists its count is
    /// incremented; otherwise the product starts a new line with count 1.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if the product is priced in
    /// a different currency than the cart, or a render error from the
    /// registered listener.
    pub fn add(&mut self, product: Product<'a>) -> Result<(), CartError> {
        let product_currency = product.price.currency();

        if product_currency != self.currency {
            let currency_code = product_currency.iso_alpha_code;

            return Err(CartError::CurrencyMismatch(
                product.id,
                currency_code,
                self.currency.iso_alpha_code,
            ));
        }

        match self
            .items
            .iter_mut()
            .find(|line| line.product().name == product.name)
        {
            Some(line) => line.increment(),
            None => self.items.push(LineItem::new(product)),
        }

        self.notify()
    }

    /// Remove one unit of the product with the given id.
    ///
    /// Decrements the matching line's count, deleting the line outright
    /// when the last unit goes. Returns `Ok(false)` when no line matches,
    /// leaving the collection unchanged. The listener is re-rendered
    /// either way.
    ///
    /// # Errors
    ///
    /// Returns a render error from the registered listener.
    pub fn remove(&mut self, id: &str) -> Result<bool, CartError> {
        let position = self.items.iter().position(|line| line.product().id == id);

        if let Some(idx) = position {
            let last_unit = self.items.get(idx).is_none_or(|line| line.count() <= 1);

            if last_unit {
                self.items.remove(idx);
            } else if let Some(line) = self.items.get_mut(idx) {
                line.decrement();
            }
        }

        self.notify()?;

        Ok(position.is_some())
    }

    /// Total number of units in the cart, counting line multiples.
    #[must_use]
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.count())).sum()
    }

    /// Remove every line from the cart, returning the new line count
    /// (always 0).
    ///
    /// An applied discount survives; call [`Cart::reset_discount`] to
    /// revert totals.
    pub fn reset(&mut self) -> usize {
        self.items.clear();
        self.items.len()
    }

    /// Calculate the cart subtotal before any discount.
    ///
    /// # Errors
    ///
    /// Returns a wrapped [`TotalPriceError`] if there was a money
    /// arithmetic or overflow error.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, CartError> {
        if self.is_empty() {
            return Ok(Money::from_minor(0, self.currency));
        }

        Ok(total_price(&self.items)?)
    }

    /// Calculate the cart total under the current discount policy.
    ///
    /// With no discount applied this is the plain sum of line totals.
    /// With a discount applied, the stored rate comes off the grand
    /// total, rounded once to minor units.
    ///
    /// # Errors
    ///
    /// Returns a wrapped [`TotalPriceError`] or [`DiscountError`] if the
    /// calculation fails.
    pub fn total(&self) -> Result<Money<'a, Currency>, CartError> {
        let subtotal = self.subtotal()?;

        match self.discount {
            DiscountState::Inactive => Ok(subtotal),
            DiscountState::Active => Ok(discounted_total(subtotal, &self.rate)?),
        }
    }

    /// Apply a discount code.
    ///
    /// On a match the granted rate is stored and totals switch to the
    /// discounted formula; a wrong code returns `false` and changes
    /// nothing.
    pub fn apply_discount(&mut self, code: &str) -> bool {
        match verify_code(code) {
            Some(rate) => {
                self.rate = rate;
                self.discount = DiscountState::Active;
                true
            }
            None => false,
        }
    }

    /// Revert totals to the undiscounted formula.
    ///
    /// The stored rate value itself is retained.
    pub fn reset_discount(&mut self) {
        self.discount = DiscountState::Inactive;
    }

    /// The current discount state.
    #[must_use]
    pub fn discount(&self) -> DiscountState {
        self.discount
    }

    /// Register a render target for cart state.
    ///
    /// The target is rendered immediately and re-rendered after every add
    /// or remove.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::DetachedTarget`] if the target is not
    /// attached to a page.
    pub fn add_listener(&mut self, target: impl RenderTarget + 'static) -> Result<(), CartError> {
        if !target.is_attached() {
            return Err(CartError::DetachedTarget);
        }

        self.listener = Some(Box::new(target));
        self.notify()
    }

    /// Iterate over the lines in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem<'a>> {
        self.items.iter()
    }

    /// Get the number of distinct lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Render current state into the registered listener, if any.
    fn notify(&mut self) -> Result<(), CartError> {
        if self.listener.is_none() {
            return Ok(());
        }

        let html = CartView::from_cart(self)?.to_html();

        if let Some(target) = self.listener.as_mut() {
            target.set_content(&html);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

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

    fn tshirt() -> Product<'static> {
        product("23fdw", "Cotton T-Shirt", 199)
    }

    fn cap() -> Product<'static> {
        product("ad44f", "Baseball Cap", 299)
    }

    #[test]
    fn new_with_currency() {
        let cart = Cart::new(GBP);

        assert_eq!(cart.currency(), GBP);
        assert!(cart.is_empty());
    }

    #[test]
    fn add_merges_lines_on_product_name() -> TestResult {
        let mut cart = Cart::new(GBP);

        cart.add(tshirt())?;
        cart.add(tshirt())?;
        cart.add(cap())?;

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.unit_count(), 3);

        Ok(())
    }

    #[test]
    fn add_currency_mismatch_errors() {
        let mut cart = Cart::new(GBP);

        let imported = Product {
            price: Money::from_minor(199, USD),
            ..tshirt()
        };

        let result = cart.add(imported);

        match result {
            Err(CartError::CurrencyMismatch(id, product_currency, cart_currency)) => {
                assert_eq!(id, "23fdw");
                assert_eq!(product_currency, USD.iso_alpha_code);
                assert_eq!(cart_currency, GBP.iso_alpha_code);
            }
            other => panic!("expected CurrencyMismatch error, got {other:?}"),
        }
    }

    #[test]
    fn remove_decrements_then_deletes_the_line() -> TestResult {
        let mut cart = Cart::new(GBP);

        cart.add(tshirt())?;
        cart.add(tshirt())?;

        assert!(cart.remove("23fdw")?);
        assert_eq!(cart.unit_count(), 1);

        assert!(cart.remove("23fdw")?);
        assert_eq!(cart.len(), 0);
        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn remove_unknown_id_returns_false_and_leaves_lines_alone() -> TestResult {
        let mut cart = Cart::new(GBP);

        cart.add(tshirt())?;

        assert!(!cart.remove("missing")?);
        assert_eq!(cart.unit_count(), 1);

        Ok(())
    }

    #[test]
    fn remove_matches_on_id_not_name() -> TestResult {
        let mut cart = Cart::new(GBP);

        // Two products sharing a name merge under the first one's id.
        cart.add(tshirt())?;
        cart.add(product("zz99x", "Cotton T-Shirt", 199))?;

        assert!(!cart.remove("zz99x")?);
        assert!(cart.remove("23fdw")?);

        Ok(())
    }

    #[test]
    fn unit_count_counts_multiples() -> TestResult {
        let mut cart = Cart::new(GBP);

        cart.add(tshirt())?;
        cart.add(tshirt())?;
        cart.add(tshirt())?;
        cart.add(cap())?;
        cart.add(cap())?;
        cart.add(product("vbr4", "Swim Shorts", 399))?;

        assert_eq!(cart.unit_count(), 6);

        Ok(())
    }

    #[test]
    fn reset_clears_lines_and_returns_zero() -> TestResult {
        let mut cart = Cart::new(GBP);

        cart.add(tshirt())?;
        cart.add(tshirt())?;
        cart.add(cap())?;

        assert_eq!(cart.reset(), 0);
        assert_eq!(cart.unit_count(), 0);

        Ok(())
    }

    #[test]
    fn subtotal_with_no_lines_is_zero() -> TestResult {
        let cart = Cart::new(GBP);

        assert_eq!(cart.subtotal()?, Money::from_minor(0, GBP));

        Ok(())
    }

    #[test]
    fn total_sums_line_totals() -> TestResult {
        let mut cart = Cart::new(GBP);

        cart.add(tshirt())?;
        cart.add(cap())?;

        assert_eq!(cart.total()?, Money::from_minor(498, GBP));

        Ok(())
    }

    #[test]
    fn apply_discount_switches_the_total_formula() -> TestResult {
        let mut cart = Cart::new(GBP);

        cart.add(tshirt())?;
        cart.add(cap())?;

        assert!(cart.apply_discount("JHKDF"));
        assert_eq!(cart.discount(), DiscountState::Active);

        // 498 * 0.85 = 423.3, rounded once to 423.
        assert_eq!(cart.total()?, Money::from_minor(423, GBP));

        Ok(())
    }

    #[test]
    fn apply_discount_rejects_wrong_codes() -> TestResult {
        let mut cart = Cart::new(GBP);

        cart.add(tshirt())?;
        cart.add(cap())?;

        assert!(!cart.apply_discount("WRONG"));
        assert_eq!(cart.discount(), DiscountState::Inactive);
        assert_eq!(cart.total()?, Money::from_minor(498, GBP));

        Ok(())
    }

    #[test]
    fn reset_discount_reverts_the_total_formula() -> TestResult {
        let mut cart = Cart::new(GBP);

        cart.add(tshirt())?;
        cart.add(cap())?;

        assert!(cart.apply_discount("JHKDF"));
        cart.reset_discount();

        assert_eq!(cart.discount(), DiscountState::Inactive);
        assert_eq!(cart.total()?, Money::from_minor(498, GBP));

        Ok(())
    }

    #[test]
    fn discount_survives_a_reset() -> TestResult {
        let mut cart = Cart::new(GBP);

        cart.add(tshirt())?;
        assert!(cart.apply_discount("JHKDF"));

        cart.reset();
        cart.add(tshirt())?;
        cart.add(cap())?;

        assert_eq!(cart.discount(), DiscountState::Active);
        assert_eq!(cart.total()?, Money::from_minor(423, GBP));

        Ok(())
    }

    #[test]
    fn iter_returns_lines_in_insertion_order() -> TestResult {
        let mut cart = Cart::new(GBP);

        cart.add(tshirt())?;
        cart.add(cap())?;
        cart.add(tshirt())?;

        let names: Vec<&str> = cart
            .iter()
            .map(|line| line.product().name.as_str())
            .collect();

        assert_eq!(names, vec!["Cotton T-Shirt", "Baseball Cap"]);

        Ok(())
    }
}
