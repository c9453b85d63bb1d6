//! Product Fixtures

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::products::ProductSource;

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Map of fixture key -> product source
    pub products: FxHashMap<String, ProductSource>,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn deserializes_a_product_map() -> TestResult {
        let yaml = r#"products:
  tshirt:
    id: "23fdw"
    name: "Cotton T-Shirt"
    price: "1.99 GBP"
    size: "Medium"
"#;

        let fixture: ProductsFixture = serde_norway::from_str(yaml)?;
        let source = fixture
            .products
            .get("tshirt")
            .cloned()
            .unwrap_or_default();

        assert_eq!(source.id.as_deref(), Some("23fdw"));
        assert_eq!(source.price.as_deref(), Some("1.99 GBP"));
        assert_eq!(source.colour, None);

        Ok(())
    }
}
