use std::str::FromStr;
use std::time::Duration;

use wealthtracker_core::constants::{DEFAULT_MARKET_CHECK_INTERVAL_MS, DEFAULT_TICK_INTERVAL_MS};
use wealthtracker_core::FeedConfig;
use wealthtracker_market_data::MarketHours;

pub struct Config {
    pub tick_interval: Duration,
    pub market_check_interval: Duration,
    pub market_hours: MarketHours,
    pub rng_seed: Option<u64>,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Unparsable numbers fall back
    /// to their defaults.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = MarketHours::default();
        let tick_ms = parse_or(&lookup, "WT_TICK_INTERVAL_MS", DEFAULT_TICK_INTERVAL_MS);
        let check_ms = parse_or(
            &lookup,
            "WT_MARKET_CHECK_INTERVAL_MS",
            DEFAULT_MARKET_CHECK_INTERVAL_MS,
        );
        let market_hours = MarketHours::new(
            lookup("WT_MARKET_TZ").unwrap_or(defaults.timezone),
            parse_or(&lookup, "WT_MARKET_OPEN_HOUR", defaults.open_hour),
            parse_or(&lookup, "WT_MARKET_CLOSE_HOUR", defaults.close_hour),
        );
        let rng_seed = lookup("WT_RNG_SEED").and_then(|s| s.trim().parse().ok());
        let log_format = lookup("WT_LOG_FORMAT").unwrap_or_else(|| "text".to_string());

        Self {
            tick_interval: Duration::from_millis(tick_ms),
            market_check_interval: Duration::from_millis(check_ms),
            market_hours,
            rng_seed,
            log_format,
        }
    }

    pub fn feed_config(&self) -> FeedConfig {
        FeedConfig {
            tick_interval: self.tick_interval,
            market_check_interval: self.market_check_interval,
            market_hours: self.market_hours.clone(),
            rng_seed: self.rng_seed,
            ..FeedConfig::default()
        }
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
