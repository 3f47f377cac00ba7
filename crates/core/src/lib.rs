//! Cart Widget Core - Shared cart types.
//!
//! This crate provides the domain types used by the `cart-widget` crate and
//! its tests:
//! - Line items and their identifiers
//! - Prices in major currency units with the fixed `Rs. ` display prefix
//! - Quantities that can never be zero
//! - Derived totals
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage,
//! no HTTP clients. Persistence, rendering, and the remote fetch live in the
//! `cart-widget` crate.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, quantities, and cart items
//! - [`totals`] - Subtotal and total computation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod totals;
pub mod types;

pub use totals::{Totals, compute_totals};
pub use types::*;
