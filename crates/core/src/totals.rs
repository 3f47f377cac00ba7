//! Cart totals.
//!
//! Totals are always derived from the current items and never stored. There
//! is no tax, shipping, or discount modelling, so the total equals the
//! subtotal.

use crate::types::{AmountOverflow, CartItem, Price};

/// Derived monetary sums for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    /// Sum of price times quantity over all items.
    pub subtotal: Price,
    /// Amount due; identical to the subtotal.
    pub total: Price,
}

impl Totals {
    /// Subtotal formatted for display, e.g. `Rs. 25.00`.
    #[must_use]
    pub fn subtotal_display(&self) -> String {
        self.subtotal.display_fixed()
    }

    /// Total formatted for display, e.g. `Rs. 25.00`.
    #[must_use]
    pub fn total_display(&self) -> String {
        self.total.display_fixed()
    }
}

/// Compute totals for a sequence of items.
///
/// # Errors
///
/// Returns [`AmountOverflow`] if any line or the running sum is out of range.
pub fn compute_totals(items: &[CartItem]) -> Result<Totals, AmountOverflow> {
    let subtotal = items.iter().try_fold(Price::ZERO, |sum, item| {
        sum.checked_add(item.line_total()?)
    })?;
    Ok(Totals {
        subtotal,
        total: subtotal,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::types::{ItemId, Quantity};

    fn item(id: i64, price: i64, quantity: u32) -> CartItem {
        CartItem {
            id: ItemId::new(id),
            title: format!("Item {id}"),
            price: Price::new(Decimal::from(price)),
            quantity: Quantity::new(quantity).unwrap(),
            image: String::new(),
        }
    }

    #[test]
    fn test_empty_cart_totals() {
        let totals = compute_totals(&[]).unwrap();
        assert_eq!(totals.subtotal_display(), "Rs. 0.00");
        assert_eq!(totals.total_display(), "Rs. 0.00");
    }

    #[test]
    fn test_subtotal_sums_lines() {
        let totals = compute_totals(&[item(1, 10, 2), item(2, 5, 1)]).unwrap();
        assert_eq!(totals.subtotal_display(), "Rs. 25.00");
        assert_eq!(totals.total, totals.subtotal);
    }

    #[test]
    fn test_fractional_prices_sum_exactly() {
        let items = vec![
            CartItem {
                price: Price::from_minor_units(10),
                ..item(1, 0, 3)
            },
            CartItem {
                price: Price::from_minor_units(20),
                ..item(2, 0, 1)
            },
        ];
        // 0.1 * 3 + 0.2 == 0.5 with no floating point drift
        assert_eq!(
            compute_totals(&items).unwrap().subtotal,
            Price::from_minor_units(50)
        );
    }

    #[test]
    fn test_out_of_range_sum_is_an_error() {
        let huge = CartItem {
            price: Price::new(Decimal::MAX),
            ..item(1, 0, 1)
        };
        let items = vec![
            huge.clone(),
            CartItem {
                id: ItemId::new(2),
                ..huge
            },
        ];
        assert_eq!(compute_totals(&items), Err(AmountOverflow));
    }
}
