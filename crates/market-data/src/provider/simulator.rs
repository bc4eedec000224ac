use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use tracing::warn;

use super::shock::{ShockSource, UniformShock};
use crate::models::{round2, PriceMove};

/// Lowest price the simulator will produce.
pub const PRICE_FLOOR: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Bounded random-walk price simulator.
///
/// Holds no state besides its shock source. Positions are independent:
/// each call draws a fresh move.
pub struct PriceSimulator {
    source: Box<dyn ShockSource>,
}

impl std::fmt::Debug for PriceSimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceSimulator").finish_non_exhaustive()
    }
}

impl PriceSimulator {
    pub fn new(source: Box<dyn ShockSource>) -> Self {
        Self { source }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(Box::new(UniformShock::seeded(seed)))
    }

    pub fn from_entropy() -> Self {
        Self::new(Box::new(UniformShock::from_entropy()))
    }

    /// Draws a move and applies it to a position of `shares` at `price`.
    ///
    /// A non-finite draw is treated as no move.
    pub fn perturb(&mut self, price: Decimal, shares: u64) -> PriceMove {
        let drawn = self.source.next_change_percent();
        let change_percent = if drawn.is_finite() {
            Decimal::from_f64(drawn).unwrap_or(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };
        Self::apply_percent(price, shares, change_percent)
    }

    /// Applies a known percentage move.
    ///
    /// `price` is floored at [`PRICE_FLOOR`] both before and after rounding,
    /// and `value` is computed from the rounded price. A move whose result
    /// cannot be represented is dropped and the price is held.
    pub fn apply_percent(price: Decimal, shares: u64, change_percent: Decimal) -> PriceMove {
        Self::checked_move(price, shares, change_percent).unwrap_or_else(|| {
            warn!(
                "Move of {}% on {} x {} overflows, holding the price",
                change_percent, shares, price
            );
            Self::checked_move(price, shares, Decimal::ZERO).unwrap_or(PriceMove {
                price,
                change: Decimal::ZERO,
                change_percent: Decimal::ZERO,
                value: Decimal::MAX,
            })
        })
    }

    fn checked_move(price: Decimal, shares: u64, change_percent: Decimal) -> Option<PriceMove> {
        let price_delta = price.checked_mul(change_percent)? / Decimal::ONE_HUNDRED;
        let new_price = price.checked_add(price_delta)?.max(PRICE_FLOOR);
        let rounded_price = round2(new_price).max(PRICE_FLOOR);
        let value = round2(rounded_price.checked_mul(Decimal::from(shares))?);

        Some(PriceMove {
            price: rounded_price,
            change: round2(price_delta),
            change_percent: round2(change_percent),
            value,
        })
    }
}
