//! Portfolio module - holdings, snapshots, and the authoritative portfolio state.

pub mod holdings;
pub mod snapshot;

pub use holdings::*;
pub use snapshot::*;
