//! Core error types for the WealthTracker engine.
//!
//! Errors only surface at construction and lifecycle boundaries: seeding the
//! portfolio, validating configuration, starting or stopping the scheduler.
//! Steady-state ticking never returns an error.

use thiserror::Error;
use wealthtracker_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Market data configuration failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),
}

/// Validation errors for seed holdings and user input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Duplicate symbol '{0}' in portfolio")]
    DuplicateSymbol(String),

    #[error("Holding '{symbol}' must have a positive share count")]
    NonPositiveShares { symbol: String },

    #[error("Holding '{symbol}' has price {price}, below the one cent minimum")]
    NonPositivePrice { symbol: String, price: String },
}

/// Lifecycle errors of the tick scheduler.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Scheduler is already running")]
    AlreadyRunning,

    #[error("Scheduler is not running")]
    NotRunning,

    #[error("No Tokio runtime available to spawn the scheduler")]
    NoRuntime,

    #[error("Feed has been disposed")]
    Disposed,
}
