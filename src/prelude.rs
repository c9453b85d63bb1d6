//! Trolley prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError},
    catalog::{Catalog, CatalogError},
    discounts::{DiscountError, DiscountState},
    fixtures::{Fixture, FixtureError},
    items::LineItem,
    pricing::{TotalPriceError, total_price},
    products::{Product, ProductError, ProductKey, ProductSource},
    receipt::{Receipt, ReceiptError},
    view::{CartView, LineView, PageElement, RenderTarget, product_html},
};
