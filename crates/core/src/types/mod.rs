//! Core types for the cart widget.
//!
//! This module provides type-safe wrappers for cart domain concepts.

pub mod id;
pub mod item;
pub mod price;
pub mod quantity;

pub use id::*;
pub use item::CartItem;
pub use price::{AmountOverflow, CURRENCY_PREFIX, Price};
pub use quantity::{Quantity, QuantityInput};
