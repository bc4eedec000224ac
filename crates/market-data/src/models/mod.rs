//! Market data models
//!
//! This module contains the data types produced by the simulated feed:
//! - `price_move` - Result of one simulated price step (PriceMove) and rounding
//! - `market_status` - Open/closed flag stamped with its evaluation time (MarketStatus)

mod market_status;
mod price_move;

pub use market_status::MarketStatus;
pub use price_move::{round2, PriceMove};
