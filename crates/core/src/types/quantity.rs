//! Line item quantities.
//!
//! A [`Quantity`] is always at least one. Anything a user types into a
//! quantity control goes through [`QuantityInput`], which either accepts the
//! value or reports that it had to fall back to one.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// A positive line item quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// Quantity of one, used whenever input is not a positive number.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity, returning `None` for zero.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        match NonZeroU32::new(value) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Create a quantity from any integer, replacing non-positive values with one.
    ///
    /// Values above `u32::MAX` saturate.
    #[must_use]
    pub fn coerce(value: i64) -> Self {
        if value <= 0 {
            return Self::ONE;
        }
        let clamped = u32::try_from(value).unwrap_or(u32::MAX);
        Self::new(clamped).unwrap_or(Self::ONE)
    }

    /// The quantity as a plain integer.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0.get()
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of reading a quantity control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityInput {
    /// The control held a positive integer.
    Accepted(Quantity),
    /// The control held zero, a negative number, or no number at all.
    Corrected,
}

impl QuantityInput {
    /// Parse the raw text of a quantity control.
    ///
    /// Leading digits are read the way a browser number input reports them,
    /// so `"3"` and `"3.7"` both yield 3. Empty or non-numeric text counts as
    /// invalid.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match leading_integer(raw.trim()) {
            Some(n) if n > 0 => Self::Accepted(Quantity::coerce(n)),
            _ => Self::Corrected,
        }
    }

    /// The quantity to apply.
    #[must_use]
    pub const fn quantity(self) -> Quantity {
        match self {
            Self::Accepted(q) => q,
            Self::Corrected => Quantity::ONE,
        }
    }

    /// Whether the input had to be replaced.
    #[must_use]
    pub const fn was_corrected(self) -> bool {
        matches!(self, Self::Corrected)
    }
}

/// Read an optional sign followed by decimal digits, ignoring any trailing text.
fn leading_integer(s: &str) -> Option<i64> {
    let (negative, digits) = s
        .strip_prefix('-')
        .map_or_else(|| (false, s.strip_prefix('+').unwrap_or(s)), |rest| (true, rest));
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Absurdly long digit runs saturate rather than fail.
    let magnitude = digits.get(..end)?.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_non_positive_to_one() {
        assert_eq!(Quantity::coerce(0), Quantity::ONE);
        assert_eq!(Quantity::coerce(-5), Quantity::ONE);
        assert_eq!(Quantity::coerce(4).get(), 4);
    }

    #[test]
    fn test_coerce_saturates() {
        assert_eq!(Quantity::coerce(i64::MAX).get(), u32::MAX);
    }

    #[test]
    fn test_parse_accepts_positive() {
        assert_eq!(
            QuantityInput::parse("3"),
            QuantityInput::Accepted(Quantity::new(3).unwrap())
        );
        assert_eq!(QuantityInput::parse(" 12 ").quantity().get(), 12);
        assert_eq!(QuantityInput::parse("3.7").quantity().get(), 3);
    }

    #[test]
    fn test_parse_corrects_invalid() {
        for raw in ["0", "-2", "", "abc", "-", "+"] {
            let input = QuantityInput::parse(raw);
            assert!(input.was_corrected(), "{raw:?} should be corrected");
            assert_eq!(input.quantity(), Quantity::ONE);
        }
    }

    #[test]
    fn test_zero_is_rejected_on_deserialize() {
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert_eq!(serde_json::from_str::<Quantity>("2").unwrap().get(), 2);
    }
}
