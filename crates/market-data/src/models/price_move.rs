use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Rounds a monetary or percentage value to 2 decimal places.
///
/// Midpoints round away from zero: `0.125 -> 0.13`, `-0.125 -> -0.13`.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// One simulated price step for a position.
///
/// All fields are rounded to 2 decimal places. `value` is derived from the
/// rounded `price`, so `value == round2(price * shares)` always holds.
/// `change_percent` is the drawn move, not recomputed from `change`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceMove {
    /// New price, never below the price floor
    pub price: Decimal,
    /// Absolute change against the previous price
    pub change: Decimal,
    /// Drawn percentage move
    pub change_percent: Decimal,
    /// Market value at the new price
    pub value: Decimal,
}
