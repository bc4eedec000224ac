//! Simulated price provider.
//!
//! This module contains:
//! - The `ShockSource` trait that supplies percentage moves
//! - Uniform, fixed, and replaying shock sources
//! - The `PriceSimulator` that turns a shock into a rounded `PriceMove`
//!
//! # Determinism
//!
//! Randomness never comes from an ambient global. Every simulator owns the
//! shock source it was built with, so seeding the source (or using
//! [`FixedShock`] / [`SequenceShock`]) makes a run fully reproducible.

mod shock;
mod simulator;

pub use shock::{FixedShock, SequenceShock, ShockSource, UniformShock, DEFAULT_SHOCK_AMPLITUDE};
pub use simulator::{PriceSimulator, PRICE_FLOOR};
