//! Catalog

use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use thiserror::Error;

use crate::products::{Product, ProductKey};

/// Errors related to catalog insertion.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A product with the same id is already in the catalog.
    #[error("a product with id {0} is already in the catalog")]
    DuplicateId(String),
}

/// The set of products available to the page, keyed by [`ProductKey`] and
/// indexed by product id for the add/remove controls.
#[derive(Debug, Default)]
pub struct Catalog<'a> {
    products: SlotMap<ProductKey, Product<'a>>,
    ids: FxHashMap<String, ProductKey>,
}

impl<'a> Catalog<'a> {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            products: SlotMap::with_key(),
            ids: FxHashMap::default(),
        }
    }

    /// Insert a product, returning its key.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if a product with the same
    /// id was already inserted.
    pub fn insert(&mut self, product: Product<'a>) -> Result<ProductKey, CatalogError> {
        if self.ids.contains_key(&product.id) {
            return Err(CatalogError::DuplicateId(product.id.clone()));
        }

        let id = product.id.clone();
        let key = self.products.insert(product);
        self.ids.insert(id, key);

        Ok(key)
    }

    /// Get a product by key.
    pub fn get(&self, key: ProductKey) -> Option<&Product<'a>> {
        self.products.get(key)
    }

    /// Get a product by its id.
    pub fn by_id(&self, id: &str) -> Option<&Product<'a>> {
        self.ids.get(id).and_then(|key| self.products.get(*key))
    }

    /// Iterate over the products in the catalog.
    pub fn iter(&self) -> impl Iterator<Item = (ProductKey, &Product<'a>)> {
        self.products.iter()
    }

    /// Get the number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
