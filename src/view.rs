//! Views
//!
//! Pure view-models mapping cart state to display data, plus the render
//! boundary the cart pushes HTML through.

use std::{
    cell::RefCell,
    fmt::{self, Write},
    rc::Rc,
};

use rusty_money::{Money, iso::Currency};

use crate::{
    cart::{Cart, CartError},
    products::Product,
};

/// A display handle the cart can push rendered HTML into.
pub trait RenderTarget: fmt::Debug {
    /// Whether the target is attached to a page and able to display
    /// content.
    fn is_attached(&self) -> bool;

    /// Replace the displayed content.
    fn set_content(&mut self, html: &str);
}

/// An in-process page element.
///
/// Clones share one content cell, like two handles onto the same page
/// node: the cart writes through its clone, the caller reads back through
/// theirs. Execution is single threaded, so a plain `Rc<RefCell<_>>`
/// carries the shared content.
#[derive(Debug, Clone)]
pub struct PageElement {
    content: Rc<RefCell<String>>,
    attached: bool,
}

impl PageElement {
    /// Create an attached element with empty content.
    #[must_use]
    pub fn new() -> Self {
        Self {
            content: Rc::new(RefCell::new(String::new())),
            attached: true,
        }
    }

    /// Create an element that is not attached to any page.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            content: Rc::new(RefCell::new(String::new())),
            attached: false,
        }
    }

    /// The currently displayed content.
    #[must_use]
    pub fn content(&self) -> String {
        self.content.borrow().clone()
    }
}

impl Default for PageElement {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderTarget for PageElement {
    fn is_attached(&self) -> bool {
        self.attached
    }

    fn set_content(&mut self, html: &str) {
        *self.content.borrow_mut() = html.to_string();
    }
}

/// One cart line prepared for display.
#[derive(Debug, Clone, PartialEq)]
pub struct LineView<'a> {
    /// Product name
    pub name: String,

    /// Units of the product on the line
    pub count: u32,

    /// Unit price
    pub unit_price: Money<'a, Currency>,

    /// Computed line total (unit price × count)
    pub line_total: Money<'a, Currency>,
}

/// Cart state prepared for display: lines in insertion order plus the
/// total under the current discount policy.
#[derive(Debug, Clone, PartialEq)]
pub struct CartView<'a> {
    /// Lines in insertion order
    pub lines: Vec<LineView<'a>>,

    /// Cart total
    pub total: Money<'a, Currency>,
}

impl<'a> CartView<'a> {
    /// Capture the current state of a cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if a line total or the cart total cannot
    /// be calculated.
    pub fn from_cart(cart: &Cart<'a>) -> Result<Self, CartError> {
        let lines = cart
            .iter()
            .map(|line| {
                Ok(LineView {
                    name: line.product().name.clone(),
                    count: line.count(),
                    unit_price: line.product().price,
                    line_total: line.line_total()?,
                })
            })
            .collect::<Result<Vec<_>, CartError>>()?;

        Ok(Self {
            lines,
            total: cart.total()?,
        })
    }

    /// Serialize the view into the cart HTML fragment.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = String::new();

        html.push_str("<h1>Your cart</h1>");
        html.push_str("<h2>Products</h2>");
        html.push_str("<ul id=\"productList\">");

        for line in &self.lines {
            _ = write!(
                html,
                "<li>{}<span class=\"count\">{}</span><span class=\"price\">{}</span><span class=\"totalPrice\">{}</span></li>",
                line.name, line.count, line.unit_price, line.line_total
            );
        }

        html.push_str("</ul>");

        _ = write!(
            html,
            "<p>Total: <span id=\"total\">{}</span></p>",
            self.total
        );

        html
    }
}

/// Render a product detail fragment for the page.
///
/// `in_cart` is the count of the product already in the cart, if any; it
/// drives the count display and the remove button.
#[must_use]
pub fn product_html(product: &Product<'_>, in_cart: Option<u32>) -> String {
    let mut html = String::new();

    _ = write!(html, "<div data-domid=\"{}\">", product.id);
    _ = write!(html, "<h1>{}</h1>", product.name);
    _ = write!(html, "<p>Price: {}</p>", product.price);

    html.push_str("<ul>");
    _ = write!(html, "<li>Size: {}</li>", product.size);

    if let Some(colour) = &product.colour {
        _ = write!(html, "<li>Colour: {colour}</li>");
    }

    html.push_str("</ul>");
    html.push_str("<div class=\"cartAdmin\">");

    if let Some(count) = in_cart {
        _ = write!(html, "<p>{count}</p>");
    }

    _ = write!(
        html,
        "<button class=\"addToCart\" data-id=\"{}\">Add to cart</button>",
        product.id
    );

    if in_cart.is_some() {
        _ = write!(
            html,
            "<button class=\"removeFromCart\" data-id=\"{}\">Remove from cart</button>",
            product.id
        );
    }

    html.push_str("</div>");
    html.push_str("</div>");

    html
}
