//! Integer cent amounts and their decimal dollar view.
//!
//! Catalog prices are stored as non-negative integer cents. All margin
//! arithmetic happens on [`Decimal`] dollars so that accumulation is exact.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price denominated in cents (e.g. `899` is $8.99).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Cents(i64);

impl Cents {
    /// Create a new cent amount.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Get the underlying cent value.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }

    /// Convert to dollars (`cents / 100`) without rounding.
    #[must_use]
    pub fn to_dollars(self) -> Decimal {
        Decimal::new(self.0, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_to_dollars() {
        assert_eq!(Cents::new(899).to_dollars(), dec!(8.99));
        assert_eq!(Cents::new(1299).to_dollars(), dec!(12.99));
        assert_eq!(Cents::new(0).to_dollars(), Decimal::ZERO);
    }
}
