//! Cart line items.

use serde::{Deserialize, Serialize};

use super::id::ItemId;
use super::price::{AmountOverflow, Price};
use super::quantity::Quantity;

/// A single line in the cart.
///
/// This is also the persisted shape: a stored cart is a JSON array of
/// `{id, title, price, quantity, image}` objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Remote variant id.
    pub id: ItemId,
    /// Display title.
    pub title: String,
    /// Unit price in major units.
    pub price: Price,
    /// Number of units, never zero.
    pub quantity: Quantity,
    /// Thumbnail URL or path.
    pub image: String,
}

impl CartItem {
    /// Unit price multiplied by quantity.
    ///
    /// # Errors
    ///
    /// Returns [`AmountOverflow`] if the product is out of range.
    pub fn line_total(&self) -> Result<Price, AmountOverflow> {
        self.price.checked_mul(self.quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn item() -> CartItem {
        CartItem {
            id: ItemId::new(1),
            title: "Tote Bag".to_string(),
            price: Price::new(Decimal::from(10)),
            quantity: Quantity::new(2).unwrap(),
            image: "https://cdn.example.com/tote.png".to_string(),
        }
    }

    #[test]
    fn test_line_total() {
        assert_eq!(item().line_total().unwrap().display_fixed(), "Rs. 20.00");
    }

    #[test]
    fn test_persisted_field_names() {
        let value = serde_json::to_value(item()).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["id", "image", "price", "quantity", "title"]);
        assert_eq!(object["id"], 1);
        assert_eq!(object["quantity"], 2);
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let json = r#"{"id":1,"title":"x","price":1,"quantity":1}"#;
        assert!(serde_json::from_str::<CartItem>(json).is_err());
    }
}
