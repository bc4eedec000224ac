//! WealthTracker Core - simulated portfolio state, analytics and the live feed.
//!
//! A fixed set of holdings is moved by a bounded random walk while a
//! simulated market is open. Every applied tick produces a new immutable
//! [`PortfolioSnapshot`] and the [`DerivedMetrics`] computed from it, which
//! are published together to subscribers.
//!
//! ```text
//!   TickScheduler ──► PortfolioState.tick(now) ──► AnalyticsEngine.compute
//!        │                     │                            │
//!        └─ market check       └──── PortfolioUpdate ◄──────┘
//!                                          │
//!                                 SubscriberRegistry ──► sinks
//! ```
//!
//! [`PortfolioFeed`] is the entry point for consumers.

pub mod analytics;
pub mod constants;
pub mod errors;
pub mod events;
pub mod feed;
pub mod portfolio;
pub mod scheduler;
pub mod settings;
pub mod utils;

// Re-export the facade and its configuration
pub use feed::PortfolioFeed;
pub use settings::FeedConfig;

// Re-export common types from portfolio and analytics modules
pub use analytics::DerivedMetrics;
pub use events::{PortfolioUpdate, PortfolioUpdateSink, Subscription};
pub use portfolio::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
