//! Holding models and the seed portfolio.

mod holdings_constants;
mod holdings_model;

pub use holdings_constants::default_seed_portfolio;
pub use holdings_model::{Holding, NewHolding};
