//! Scheduler module - drives the two periodic activities of the feed.
//!
//! A market-status check and a price tick run on independent cadences.
//! Both call into a [`TickHandler`]; the scheduler itself knows nothing
//! about portfolios.

mod scheduler_traits;
mod tick_scheduler;

pub use scheduler_traits::*;
pub use tick_scheduler::*;
