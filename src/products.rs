//! Products

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;
use slotmap::new_key_type;
use thiserror::Error;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Errors related to product construction.
#[derive(Debug, Error)]
pub enum ProductError {
    /// No sources were provided to build the product from.
    #[error("a product must be built from at least one source")]
    Uninitialized,

    /// A required field was missing after merging all sources.
    #[error("product is missing required field `{0}`")]
    MissingField(&'static str),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// A product as displayed on the page and carried on cart lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Product id, used by the page's add/remove controls.
    pub id: String,

    /// Product name; cart lines merge on it.
    pub name: String,

    /// Unit price
    pub price: Money<'a, Currency>,

    /// Display size (e.g. "Medium")
    pub size: String,

    /// Display colour, when the product has one
    pub colour: Option<String>,
}

/// One source of product fields for [`Product::from_sources`].
///
/// Every field is optional; sources are shallow-merged with later sources
/// overriding earlier ones. Doubles as the YAML fixture record, so the
/// price is a display string (e.g. "1.99 GBP").
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductSource {
    /// Product id
    pub id: Option<String>,

    /// Product name
    pub name: Option<String>,

    /// Product price (e.g. "1.99 GBP")
    pub price: Option<String>,

    /// Display size
    pub size: Option<String>,

    /// Display colour
    pub colour: Option<String>,
}

impl ProductSource {
    /// Overlay `other` onto `self`, field by field. Fields set in `other`
    /// win; unset fields leave `self` untouched.
    fn merge_from(&mut self, other: &ProductSource) {
        if other.id.is_some() {
            self.id.clone_from(&other.id);
        }

        if other.name.is_some() {
            self.name.clone_from(&other.name);
        }

        if other.price.is_some() {
            self.price.clone_from(&other.price);
        }

        if other.size.is_some() {
            self.size.clone_from(&other.size);
        }

        if other.colour.is_some() {
            self.colour.clone_from(&other.colour);
        }
    }
}

impl Product<'_> {
    /// Build a product by shallow-merging one or more sources.
    ///
    /// Later sources override earlier ones on field collisions.
    ///
    /// # Errors
    ///
    /// - [`ProductError::Uninitialized`]: no sources were provided.
    /// - [`ProductError::MissingField`]: the merged record lacks an id,
    ///   name, price, or size.
    /// - [`ProductError::InvalidPrice`] / [`ProductError::UnknownCurrency`]:
    ///   the merged price string could not be parsed.
    pub fn from_sources(sources: &[ProductSource]) -> Result<Self, ProductError> {
        let mut merged = sources.first().cloned().ok_or(ProductError::Uninitialized)?;

        for source in sources.iter().skip(1) {
            merged.merge_from(source);
        }

        let id = merged.id.ok_or(ProductError::MissingField("id"))?;
        let name = merged.name.ok_or(ProductError::MissingField("name"))?;
        let size = merged.size.ok_or(ProductError::MissingField("size"))?;
        let price = merged.price.ok_or(ProductError::MissingField("price"))?;

        let (minor_units, currency) = parse_price(&price)?;

        Ok(Product {
            id,
            name,
            price: Money::from_minor(minor_units, currency),
            size,
            colour: merged.colour,
        })
    }
}

/// Parse price string (e.g. "2.99 GBP") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), ProductError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(ProductError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| ProductError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| ProductError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| ProductError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| ProductError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(ProductError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}
