//! Trading calendar for the simulated market.
//!
//! - `market_hours` - Trading window configuration (MarketHours)
//! - `market_clock` - Open/closed evaluation in the reference timezone (MarketClock)

mod market_clock;
mod market_hours;

pub use market_clock::MarketClock;
pub use market_hours::{MarketHours, DEFAULT_MARKET_TZ};
