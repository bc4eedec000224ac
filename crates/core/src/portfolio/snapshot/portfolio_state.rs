//! Authoritative in-memory portfolio state.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use log::{debug, info};
use rust_decimal::Decimal;
use wealthtracker_market_data::{MarketClock, PriceSimulator};

use super::PortfolioSnapshot;
use crate::errors::{Result, ValidationError};
use crate::portfolio::holdings::{Holding, NewHolding};

/// Owns the holdings and is the only writer of portfolio snapshots.
///
/// Each tick builds a complete new snapshot and swaps it in under a write
/// lock. Readers clone the `Arc` and never observe a partially updated
/// holding list. The simulator lock is held for the whole tick, so concurrent
/// `tick` calls are applied one after the other.
pub struct PortfolioState {
    clock: MarketClock,
    simulator: Mutex<PriceSimulator>,
    snapshot: RwLock<Arc<PortfolioSnapshot>>,
}

impl PortfolioState {
    /// Validates the seed holdings and builds the initial snapshot (sequence 0).
    ///
    /// Rejects invalid holdings and duplicate symbols (case-insensitive).
    pub fn new(
        seed: Vec<NewHolding>,
        clock: MarketClock,
        simulator: PriceSimulator,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut holdings = Vec::with_capacity(seed.len());
        let mut max_total = Some(Decimal::ZERO);
        for new_holding in seed {
            let max_value = new_holding.max_value();
            let holding = Holding::from_new(new_holding)?;
            if !seen.insert(holding.symbol.to_ascii_uppercase()) {
                return Err(ValidationError::DuplicateSymbol(holding.symbol).into());
            }
            max_total = max_total.zip(max_value).and_then(|(t, v)| t.checked_add(v));
            holdings.push(holding);
        }
        if max_total.is_none() {
            return Err(ValidationError::InvalidInput(
                "combined portfolio value is too large to represent".to_string(),
            )
            .into());
        }

        info!("Portfolio seeded with {} holding(s)", holdings.len());

        Ok(Self {
            clock,
            simulator: Mutex::new(simulator),
            snapshot: RwLock::new(Arc::new(PortfolioSnapshot::new(0, created_at, holdings))),
        })
    }

    pub fn market_clock(&self) -> &MarketClock {
        &self.clock
    }

    /// Current snapshot. Cheap: clones an `Arc`.
    pub fn get_snapshot(&self) -> Arc<PortfolioSnapshot> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Applies one simulation step if the market is open at `now`.
    ///
    /// Returns the new snapshot, or `None` when the market is closed, in which
    /// case the current snapshot is left untouched.
    pub fn tick(&self, now: DateTime<Utc>) -> Option<Arc<PortfolioSnapshot>> {
        if !self.clock.is_open(now) {
            debug!("Market closed at {}, skipping price tick", now);
            return None;
        }

        let mut simulator = self.simulator.lock().unwrap_or_else(PoisonError::into_inner);
        let current = self.get_snapshot();
        let holdings = current
            .holdings
            .iter()
            .map(|holding| holding.apply_move(&simulator.perturb(holding.price, holding.shares)))
            .collect();
        let next = Arc::new(PortfolioSnapshot::new(current.sequence + 1, now, holdings));

        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = next.clone();
        debug!("Applied price tick #{}", next.sequence);
        Some(next)
    }
}
