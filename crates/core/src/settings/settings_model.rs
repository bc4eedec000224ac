use std::time::Duration;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use wealthtracker_market_data::{MarketHours, PriceSimulator};

use crate::analytics::{RiskBaseline, SectorTable};
use crate::constants::{DEFAULT_MARKET_CHECK_INTERVAL_MS, DEFAULT_TICK_INTERVAL_MS};
use crate::errors::{Error, Result};

/// Default uninvested cash reported alongside the portfolio totals.
pub const DEFAULT_CASH_BALANCE: Decimal = dec!(12500.00);

/// Configuration of a [`PortfolioFeed`](crate::feed::PortfolioFeed).
#[derive(Debug, Clone, PartialEq)]
pub struct FeedConfig {
    /// Cadence of price ticks
    pub tick_interval: Duration,
    /// Cadence of market-status checks
    pub market_check_interval: Duration,
    pub market_hours: MarketHours,
    pub sectors: SectorTable,
    pub risk: RiskBaseline,
    pub cash_balance: Decimal,
    /// Seeds both random sources when set; entropy is used otherwise
    pub rng_seed: Option<u64>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            market_check_interval: Duration::from_millis(DEFAULT_MARKET_CHECK_INTERVAL_MS),
            market_hours: MarketHours::default(),
            sectors: SectorTable::default(),
            risk: RiskBaseline::default(),
            cash_balance: DEFAULT_CASH_BALANCE,
            rng_seed: None,
        }
    }
}

impl FeedConfig {
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval.is_zero() {
            return Err(Error::InvalidConfigValue(
                "tick interval must be greater than zero".to_string(),
            ));
        }
        if self.market_check_interval.is_zero() {
            return Err(Error::InvalidConfigValue(
                "market check interval must be greater than zero".to_string(),
            ));
        }
        if self.cash_balance < Decimal::ZERO {
            return Err(Error::InvalidConfigValue(format!(
                "cash balance must not be negative, got {}",
                self.cash_balance
            )));
        }
        self.risk.validate()?;
        self.market_hours.validate()?;
        Ok(())
    }

    /// Price simulator drawing from the configured seed, or from entropy.
    pub fn price_simulator(&self) -> PriceSimulator {
        match self.rng_seed {
            Some(seed) => PriceSimulator::seeded(seed),
            None => PriceSimulator::from_entropy(),
        }
    }

    /// Random source for the risk jitter. Independent of the price stream.
    pub fn jitter_rng(&self) -> Box<dyn RngCore + Send> {
        match self.rng_seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed.wrapping_add(1))),
            None => Box::new(StdRng::from_entropy()),
        }
    }
}
