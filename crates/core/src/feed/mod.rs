//! Feed module - the facade consumers subscribe to.
//!
//! `PortfolioFeed` wires the portfolio state, analytics and scheduler
//! together and exposes push (subscribe) and pull (get_*) access.

mod feed_service;

pub use feed_service::*;
