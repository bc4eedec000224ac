//! WealthTracker Market Data Crate
//!
//! This crate provides the simulated market feed used by the portfolio
//! dashboard. There is no real provider behind it: prices move by a bounded
//! random walk and a fixed trading calendar decides when they may move.
//!
//! # Overview
//!
//! The crate supports:
//! - A trading-hours calendar evaluated in a fixed reference timezone
//! - A random-walk price simulator with an injectable randomness source
//! - Deterministic shock sources for reproducible scenarios
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |   MarketClock    |     |   ShockSource    |  (uniform, fixed, sequence)
//! +------------------+     +------------------+
//!          |                        |
//!          v                        v
//! +------------------+     +------------------+
//! |   MarketStatus   |     |  PriceSimulator  |
//! +------------------+     +------------------+
//!                                   |
//!                                   v
//!                          +------------------+
//!                          |    PriceMove     |  (price, change, percent, value)
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`MarketClock`] - Answers "is the market open at this instant?"
//! - [`MarketHours`] - Trading window and reference timezone
//! - [`MarketStatus`] - Open flag plus the instant it was computed at
//! - [`PriceSimulator`] - Produces the next [`PriceMove`] for a position
//! - [`ShockSource`] - Source of percentage moves fed into the simulator

pub mod calendar;
pub mod errors;
pub mod models;
pub mod provider;

// Re-export calendar types
pub use calendar::{MarketClock, MarketHours, DEFAULT_MARKET_TZ};

// Re-export error types
pub use errors::MarketDataError;

// Re-export models
pub use models::{round2, MarketStatus, PriceMove};

// Re-export provider types
pub use provider::{
    FixedShock, PriceSimulator, SequenceShock, ShockSource, UniformShock, DEFAULT_SHOCK_AMPLITUDE,
    PRICE_FLOOR,
};
