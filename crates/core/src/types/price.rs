//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are stored in major currency units (rupees, not paise). The widget
//! only ever displays a single currency, so the symbol is a fixed prefix
//! rather than a currency code.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::quantity::Quantity;

/// Display prefix for every monetary amount.
pub const CURRENCY_PREFIX: &str = "Rs. ";

/// A price calculation left the range `Decimal` can represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("amount out of range")]
pub struct AmountOverflow;

/// A unit price in major currency units.
///
/// Persisted as a plain JSON number so stored carts stay readable by any
/// consumer of the storage key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a major-unit amount.
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        Self(amount.normalize())
    }

    /// Create a price from an integer amount in minor units (e.g. paise).
    ///
    /// `1250` becomes `12.5`.
    #[must_use]
    pub fn from_minor_units(minor: i64) -> Self {
        Self::new(Decimal::new(minor, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format with the currency prefix and the raw amount, e.g. `Rs. 12.5`.
    ///
    /// Used for unit prices, which are shown as-is.
    #[must_use]
    pub fn display_raw(&self) -> String {
        format!("{CURRENCY_PREFIX}{}", self.0.normalize())
    }

    /// Format with the currency prefix and exactly two decimals, e.g. `Rs. 12.50`.
    ///
    /// Used for line subtotals and cart totals. Ties round away from zero.
    #[must_use]
    pub fn display_fixed(&self) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{CURRENCY_PREFIX}{rounded:.2}")
    }

    /// Price of `quantity` units.
    ///
    /// # Errors
    ///
    /// Returns [`AmountOverflow`] if the product is out of range.
    pub fn checked_mul(self, quantity: Quantity) -> Result<Self, AmountOverflow> {
        self.0
            .checked_mul(Decimal::from(quantity.get()))
            .map(Self)
            .ok_or(AmountOverflow)
    }

    /// Sum of two amounts.
    ///
    /// # Errors
    ///
    /// Returns [`AmountOverflow`] if the sum is out of range.
    pub fn checked_add(self, other: Self) -> Result<Self, AmountOverflow> {
        self.0.checked_add(other.0).map(Self).ok_or(AmountOverflow)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_fixed())
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self::new(amount)
    }
}
