//! Cart Widget library.
//!
//! A shopping cart widget rendered server-side: it keeps cart state in a
//! local key-value store, hydrates from a remote JSON endpoint when nothing
//! is stored, and lets the shopper change quantities, remove items behind a
//! confirmation modal, and check out.
//!
//! # Modules
//!
//! - [`storage`] - Key-value stores and the cart persistence adapter
//! - [`remote`] - Remote cart endpoint client
//! - [`render`] - Item container rendering and control bindings
//! - [`surface`] - The page surface the controller draws onto
//! - [`controller`] - Cart state, mutations, and the removal flow
//! - [`routes`] - HTTP handlers (HTMX fragments)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod controller;
pub mod error;
pub mod middleware;
pub mod remote;
pub mod render;
pub mod routes;
pub mod state;
pub mod storage;
pub mod surface;

use axum::Router;
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Build the application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let static_dir = state.config().static_dir.clone();

    Router::new()
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(middleware::trace_layer())
        .with_state(state)
}
