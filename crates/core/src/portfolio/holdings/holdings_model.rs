use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use wealthtracker_market_data::{round2, PriceMove, PRICE_FLOOR};

use crate::errors::{Result, ValidationError};

/// Room left above a seed position's value for the next price move.
const VALUE_HEADROOM: Decimal = dec!(1.02);

/// Seed input for one position, validated before it enters the portfolio.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewHolding {
    pub symbol: String,
    pub name: String,
    pub price: Decimal,
    pub shares: u64,
    /// Last absolute change, carried until the first tick
    #[serde(default)]
    pub change: Decimal,
    /// Last percent change, carried until the first tick
    #[serde(default)]
    pub change_percent: Decimal,
}

impl NewHolding {
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        shares: u64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            price,
            shares,
            change: Decimal::ZERO,
            change_percent: Decimal::ZERO,
        }
    }

    pub fn with_last_change(mut self, change: Decimal, change_percent: Decimal) -> Self {
        self.change = change;
        self.change_percent = change_percent;
        self
    }

    /// Validates the seed. Invalid input is rejected, never coerced.
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(ValidationError::MissingField("symbol".to_string()).into());
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        if self.shares == 0 {
            return Err(ValidationError::NonPositiveShares {
                symbol: self.symbol.clone(),
            }
            .into());
        }
        if round2(self.price) < PRICE_FLOOR {
            return Err(ValidationError::NonPositivePrice {
                symbol: self.symbol.clone(),
                price: self.price.to_string(),
            }
            .into());
        }
        self.max_value().ok_or_else(|| {
            ValidationError::InvalidInput(format!(
                "position '{}' of {} shares at {} is too large to value",
                self.symbol, self.shares, self.price
            ))
        })?;
        Ok(())
    }

    /// Position value after the largest single move, or `None` if it cannot
    /// be represented.
    pub(crate) fn max_value(&self) -> Option<Decimal> {
        let shares = Decimal::from(self.shares);
        round2(self.price)
            .checked_mul(shares)?
            .checked_mul(VALUE_HEADROOM)?
            .checked_add(round2(self.change).abs().checked_mul(shares)?)
    }
}

/// One simulated position as published to consumers.
///
/// `value == round2(price * shares)` holds after construction and after every
/// [`apply_move`](Self::apply_move). `shares` never changes during a session.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub symbol: String,
    pub name: String,
    pub price: Decimal,
    /// Absolute change since the previous tick
    pub change: Decimal,
    /// Drawn percent change of the previous tick
    pub change_percent: Decimal,
    pub shares: u64,
    /// Market value, `price * shares`
    pub value: Decimal,
}

impl Holding {
    /// Builds a holding from validated seed input, deriving its value.
    pub fn from_new(new: NewHolding) -> Result<Self> {
        new.validate()?;
        let price = round2(new.price);
        Ok(Self {
            symbol: new.symbol.trim().to_string(),
            name: new.name.trim().to_string(),
            value: round2(price * Decimal::from(new.shares)),
            price,
            change: round2(new.change),
            change_percent: round2(new.change_percent),
            shares: new.shares,
        })
    }

    /// Returns the holding after a simulated move. Identity and shares are kept.
    pub fn apply_move(&self, mv: &PriceMove) -> Self {
        Self {
            symbol: self.symbol.clone(),
            name: self.name.clone(),
            price: mv.price,
            change: mv.change,
            change_percent: mv.change_percent,
            shares: self.shares,
            value: mv.value,
        }
    }

    /// Gain or loss of the last tick, `change * shares`. Saturates.
    pub fn gain_loss(&self) -> Decimal {
        self.change.saturating_mul(Decimal::from(self.shares))
    }
}
