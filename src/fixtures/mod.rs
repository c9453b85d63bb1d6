//! Fixtures

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    catalog::{Catalog, CatalogError},
    fixtures::{carts::CartFixture, products::ProductsFixture},
    products::{Product, ProductError, ProductKey, parse_price},
};

pub mod carts;
pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Product construction error
    #[error(transparent)]
    Product(#[from] ProductError),

    /// Catalog insertion error
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Cart error while building the fixture cart
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Product catalog built from the fixture set
    catalog: Catalog<'a>,

    /// Fixture key -> catalog key mappings for lookups
    product_keys: FxHashMap<String, ProductKey>,

    /// Fixture keys of products to pre-fill the cart with, in order
    cart_lines: Vec<String>,

    /// Currency for the fixture set
    currency: Option<&'static rusty_money::iso::Currency>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: Catalog::new(),
            product_keys: FxHashMap::default(),
            cart_lines: Vec::new(),
            currency: None,
        }
    }

    /// Load the products and cart lines of a named fixture set.
    ///
    /// # Errors
    ///
    /// Returns an error if either fixture file cannot be read or parsed.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_products(name)?;
        fixture.load_cart(name)?;

        Ok(fixture)
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there
    /// are currency mismatches.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;

        for (key, source) in fixture.products {
            // Parse to get currency first (before building the Product)
            let price = source
                .price
                .as_deref()
                .ok_or(ProductError::MissingField("price"))?;

            let (_minor_units, currency) = parse_price(price)?;

            // Validate currency consistency
            if let Some(existing_currency) = self.currency {
                if existing_currency != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        existing_currency.iso_alpha_code.to_string(),
                        currency.iso_alpha_code.to_string(),
                    ));
                }
            } else {
                self.currency = Some(currency);
            }

            let product = Product::from_sources(std::slice::from_ref(&source))?;
            let product_key = self.catalog.insert(product)?;

            self.product_keys.insert(key, product_key);
        }

        Ok(self)
    }

    /// Load cart lines from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if a line
    /// references a product that was not loaded.
    pub fn load_cart(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("carts").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CartFixture = serde_norway::from_str(&contents)?;

        for key in &fixture.lines {
            if !self.product_keys.contains_key(key) {
                return Err(FixtureError::ProductNotFound(key.clone()));
            }
        }

        self.cart_lines = fixture.lines;

        Ok(self)
    }

    /// The fixture product for a fixture key.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::ProductNotFound`] if the key is unknown.
    pub fn product(&self, key: &str) -> Result<&Product<'a>, FixtureError> {
        self.product_keys
            .get(key)
            .and_then(|product_key| self.catalog.get(*product_key))
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Build a cart in the fixture currency, pre-filled with the
    /// fixture's cart lines in order.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NoCurrency`] if no products were loaded,
    /// or a wrapped [`CartError`] if an add fails.
    pub fn cart(&self) -> Result<Cart<'a>, FixtureError> {
        let currency = self.currency.ok_or(FixtureError::NoCurrency)?;
        let mut cart = Cart::new(currency);

        for key in &self.cart_lines {
            cart.add(self.product(key)?.clone())?;
        }

        Ok(cart)
    }

    /// The product catalog built from the fixture set.
    pub fn catalog(&self) -> &Catalog<'a> {
        &self.catalog
    }

    /// The currency of the fixture set, if products were loaded.
    pub fn currency(&self) -> Option<&'static rusty_money::iso::Currency> {
        self.currency
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}
