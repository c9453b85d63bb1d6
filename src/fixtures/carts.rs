//! Cart Fixtures

use serde::Deserialize;

/// Wrapper for a pre-filled cart in YAML
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Fixture keys of the products in the cart, in insertion order
    pub lines: Vec<String>,
}
