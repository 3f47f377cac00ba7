//! Cart route handlers.
//!
//! Each interaction locks the cart, dispatches one [`UiEvent`], and answers
//! with the re-rendered widget for HTMX to swap in. Pending notifications
//! travel in an `HX-Trigger` header so the page can show them as blocking
//! alerts.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use cart_widget_core::ItemId;
use serde::Deserialize;
use tracing::instrument;

use crate::controller::UiEvent;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::{AppState, WidgetController};
use crate::surface::WidgetView;

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub widget: WidgetView,
}

/// Cart widget fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_widget.html")]
pub struct CartWidgetTemplate {
    pub widget: WidgetView,
}

/// Quantity change form data.
#[derive(Debug, Deserialize)]
pub struct QuantityForm {
    pub id: String,
    #[serde(default)]
    pub quantity: String,
}

/// Remove button form data.
#[derive(Debug, Deserialize)]
pub struct RemoveForm {
    pub id: String,
}

/// Parse a `data-id` value from the page.
fn parse_id(raw: &str) -> Result<ItemId> {
    raw.parse()
        .map_err(|e: cart_widget_core::ParseIdError| AppError::BadRequest(e.to_string()))
}

/// Render the widget fragment, moving notifications into `HX-Trigger`.
fn fragment_response(cart: &mut WidgetController) -> Response {
    let mut widget = cart.surface_mut().take_view();
    let messages: Vec<&str> = widget
        .notifications
        .drain(..)
        .map(|notice| notice.message)
        .collect();
    let template = CartWidgetTemplate { widget };

    if messages.is_empty() {
        return template.into_response();
    }

    let trigger = serde_json::json!({ "cart-notice": { "messages": messages } }).to_string();
    (AppendHeaders([("HX-Trigger", trigger)]), template).into_response()
}

/// Display the cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    let mut cart = state.cart().await;
    CartShowTemplate {
        widget: cart.surface_mut().take_view(),
    }
}

/// Widget fragment (HTMX).
#[instrument(skip(state))]
pub async fn fragment(State(state): State<AppState>) -> Response {
    let mut cart = state.cart().await;
    fragment_response(&mut cart)
}

/// Checkout button (HTMX).
#[instrument(skip(state))]
pub async fn checkout(State(state): State<AppState>) -> Result<Response> {
    add_breadcrumb("cart", "Checkout", None);
    let mut cart = state.cart().await;
    cart.handle(UiEvent::Checkout)?;
    Ok(fragment_response(&mut cart))
}

/// Quantity input changed (HTMX).
#[instrument(skip(state))]
pub async fn quantity(
    State(state): State<AppState>,
    Form(form): Form<QuantityForm>,
) -> Result<Response> {
    let id = parse_id(&form.id)?;
    add_breadcrumb(
        "cart",
        "Quantity changed",
        Some(&[("id", form.id.as_str()), ("quantity", form.quantity.as_str())][..]),
    );
    let mut cart = state.cart().await;
    cart.handle(UiEvent::QuantityChanged {
        id,
        raw: form.quantity,
    })?;
    Ok(fragment_response(&mut cart))
}

/// Remove button clicked (HTMX). Opens the confirmation modal.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<RemoveForm>,
) -> Result<Response> {
    let id = parse_id(&form.id)?;
    let mut cart = state.cart().await;
    cart.handle(UiEvent::RemoveClicked { id })?;
    Ok(fragment_response(&mut cart))
}

/// Confirm removal (HTMX).
#[instrument(skip(state))]
pub async fn confirm_remove(State(state): State<AppState>) -> Result<Response> {
    add_breadcrumb("cart", "Removal confirmed", None);
    let mut cart = state.cart().await;
    cart.handle(UiEvent::ConfirmRemoval)?;
    Ok(fragment_response(&mut cart))
}

/// Cancel removal (HTMX).
#[instrument(skip(state))]
pub async fn cancel_remove(State(state): State<AppState>) -> Result<Response> {
    let mut cart = state.cart().await;
    cart.handle(UiEvent::CancelRemoval)?;
    Ok(fragment_response(&mut cart))
}
