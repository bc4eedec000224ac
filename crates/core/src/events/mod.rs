//! Update events module.
//!
//! Provides the update published after every applied tick and market check,
//! the sink trait subscribers implement, and the registry that fans updates
//! out to them.

mod portfolio_update;
mod sink;
mod subscriber_registry;

pub use portfolio_update::*;
pub use sink::*;
pub use subscriber_registry::*;

#[cfg(test)]
pub(crate) use portfolio_update::sample_update;
