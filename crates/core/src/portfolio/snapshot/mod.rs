//! Portfolio snapshot module - immutable snapshots and the state that publishes them.

mod portfolio_state;
mod snapshot_model;

pub use portfolio_state::*;
pub use snapshot_model::*;
