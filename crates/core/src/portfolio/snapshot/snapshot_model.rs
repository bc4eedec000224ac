//! Portfolio snapshot domain model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::portfolio::holdings::Holding;

/// All holdings at one instant, in display order.
///
/// Snapshots are published behind an `Arc` and replaced wholesale on every
/// tick, so any reader holding one sees a fully consistent set of holdings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    /// Number of ticks applied since the portfolio was seeded
    pub sequence: u64,
    pub as_of: DateTime<Utc>,
    pub holdings: Vec<Holding>,
}

impl PortfolioSnapshot {
    pub fn new(sequence: u64, as_of: DateTime<Utc>, holdings: Vec<Holding>) -> Self {
        Self {
            sequence,
            as_of,
            holdings,
        }
    }

    /// Looks up a holding by symbol, ignoring case.
    pub fn holding(&self, symbol: &str) -> Option<&Holding> {
        self.holdings
            .iter()
            .find(|h| h.symbol.eq_ignore_ascii_case(symbol))
    }

    /// Sum of all holding values. Saturates at `Decimal::MAX`.
    pub fn total_value(&self) -> Decimal {
        self.holdings
            .iter()
            .fold(Decimal::ZERO, |total, h| total.saturating_add(h.value))
    }

    /// Sum of the last tick's gain or loss over all holdings. Saturates.
    pub fn total_gain_loss(&self) -> Decimal {
        self.holdings
            .iter()
            .fold(Decimal::ZERO, |total, h| total.saturating_add(h.gain_loss()))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Holding> {
        self.holdings.iter()
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}
