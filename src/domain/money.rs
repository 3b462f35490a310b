//! Monetary types and display rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Price in the source currency, represented as a Decimal for precision.
pub type Price = Decimal;

/// Weight in grams.
pub type Grams = Decimal;

/// Round to whole currency units for display.
#[must_use]
pub fn round_whole(value: Price) -> Price {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Round to two decimal places for display.
#[must_use]
pub fn round_cents(value: Price) -> Price {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
