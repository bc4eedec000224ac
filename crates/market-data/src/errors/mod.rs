//! Error types for the market data crate.
//!
//! Only configuration can fail here. Once a [`MarketClock`](crate::MarketClock)
//! or [`PriceSimulator`](crate::PriceSimulator) exists, its operations are
//! infallible: the clock fails safe to "closed" and the simulator clamps prices.

use thiserror::Error;

/// Errors that can occur while configuring the simulated market.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// The reference timezone is not a known IANA name.
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// The trading window is empty or exceeds a day.
    #[error("Invalid market hours: open {open_hour}h, close {close_hour}h")]
    InvalidMarketHours {
        /// Local hour the market opens (inclusive)
        open_hour: u32,
        /// Local hour the market closes (exclusive)
        close_hour: u32,
    },

    /// A shock amplitude is not a finite positive number.
    #[error("Invalid shock amplitude: {0}")]
    InvalidAmplitude(String),
}
