/// Default cadence of price-update ticks, in milliseconds
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 3_000;

/// Default cadence of market-status checks, in milliseconds
pub const DEFAULT_MARKET_CHECK_INTERVAL_MS: u64 = 60_000;

/// Trading days used to annualize single-period volatility
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// Maximum number of performance alerts reported per update
pub const MAX_PERFORMANCE_ALERTS: usize = 3;
