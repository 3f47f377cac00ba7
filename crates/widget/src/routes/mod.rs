//! HTTP route handlers for the cart widget.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                      - Cart page (full widget)
//! GET  /health                - Health check
//!
//! # Cart (HTMX fragments)
//! GET  /cart                  - Widget fragment
//! POST /cart/checkout         - Checkout button
//! POST /cart/quantity         - Quantity input changed (form: id, quantity)
//! POST /cart/remove           - Remove button clicked (form: id)
//! POST /cart/remove/confirm   - Confirm removal
//! POST /cart/remove/cancel    - Cancel removal
//! ```

pub mod cart;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::fragment))
        .route("/checkout", post(cart::checkout))
        .route("/quantity", post(cart::quantity))
        .route("/remove", post(cart::remove))
        .route("/remove/confirm", post(cart::confirm_remove))
        .route("/remove/cancel", post(cart::cancel_remove))
}

/// Create all routes for the widget.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/health", get(health))
        .nest("/cart", cart_routes())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
