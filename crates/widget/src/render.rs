//! Cart item rendering.
//!
//! [`render`] turns the current items into container markup plus the list
//! of dynamic controls that markup exposes. It is a pure function of its
//! input; the surface applies the result by replacing the container and its
//! handler table wholesale.

use askama::Template;
use cart_widget_core::{AmountOverflow, CartItem, ItemId};
use thiserror::Error;

/// Errors raised while rendering the item container.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template failed to render.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// A row subtotal is out of range.
    #[error("Line total error: {0}")]
    Amount(#[from] AmountOverflow),
}

/// A dynamic control produced by a render, keyed by the row's item id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    /// Change handler on a row's quantity input.
    QuantityChange(ItemId),
    /// Click handler on a row's remove button.
    RemovalRequest(ItemId),
}

/// Output of a single render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCart {
    /// Markup for the `cart-items` container.
    pub html: String,
    /// Controls to bind after the markup is in place.
    pub bindings: Vec<Binding>,
}

/// Cart row display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub id: String,
    pub title: String,
    pub image: String,
    pub price: String,
    pub quantity: u32,
    pub line_price: String,
}

impl TryFrom<&CartItem> for CartItemView {
    type Error = AmountOverflow;

    fn try_from(item: &CartItem) -> Result<Self, Self::Error> {
        Ok(Self {
            id: item.id.to_string(),
            title: item.title.clone(),
            image: item.image.clone(),
            price: item.price.display_raw(),
            quantity: item.quantity.get(),
            line_price: item.line_total()?.display_fixed(),
        })
    }
}

/// Cart items table fragment.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub items: Vec<CartItemView>,
}

/// Render `items` into container markup and bindings.
///
/// An empty cart renders a fixed message and binds nothing.
///
/// # Errors
///
/// Returns an error if a row subtotal is out of range or template rendering
/// fails.
pub fn render(items: &[CartItem]) -> Result<RenderedCart, RenderError> {
    let html = CartItemsTemplate {
        items: items
            .iter()
            .map(CartItemView::try_from)
            .collect::<Result<_, _>>()?,
    }
    .render()?;

    let bindings = items
        .iter()
        .flat_map(|item| {
            [
                Binding::QuantityChange(item.id),
                Binding::RemovalRequest(item.id),
            ]
        })
        .collect();

    Ok(RenderedCart { html, bindings })
}
