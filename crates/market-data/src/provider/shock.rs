use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::errors::MarketDataError;

/// Half-width of the default uniform move, in percent: moves fall in (-2, +2).
pub const DEFAULT_SHOCK_AMPLITUDE: f64 = 2.0;

/// Source of percentage price moves.
///
/// A move of `1.25` means +1.25%. Implementations are called once per
/// holding per tick, in display order.
pub trait ShockSource: Send {
    fn next_change_percent(&mut self) -> f64;
}

/// Uniform moves in `(-amplitude, +amplitude)` drawn from an injected RNG.
///
/// With the default amplitude this is `(u - 0.5) * 4` for `u` in `[0, 1)`.
#[derive(Debug)]
pub struct UniformShock<R> {
    rng: R,
    amplitude: f64,
}

impl<R: Rng + Send> UniformShock<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            amplitude: DEFAULT_SHOCK_AMPLITUDE,
        }
    }

    pub fn with_amplitude(rng: R, amplitude: f64) -> Result<Self, MarketDataError> {
        if !amplitude.is_finite() || amplitude <= 0.0 {
            return Err(MarketDataError::InvalidAmplitude(amplitude.to_string()));
        }
        Ok(Self { rng, amplitude })
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }
}

impl UniformShock<StdRng> {
    /// Reproducible source for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng + Send> ShockSource for UniformShock<R> {
    fn next_change_percent(&mut self) -> f64 {
        let unit: f64 = self.rng.gen();
        (unit - 0.5) * 2.0 * self.amplitude
    }
}

/// Always returns the same move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedShock(pub f64);

impl ShockSource for FixedShock {
    fn next_change_percent(&mut self) -> f64 {
        self.0
    }
}

/// Replays a list of moves, wrapping around at the end.
///
/// An empty list behaves like `FixedShock(0.0)`.
#[derive(Clone, Debug, PartialEq)]
pub struct SequenceShock {
    moves: Vec<f64>,
    cursor: usize,
}

impl SequenceShock {
    pub fn new(moves: Vec<f64>) -> Self {
        Self { moves, cursor: 0 }
    }
}

impl ShockSource for SequenceShock {
    fn next_change_percent(&mut self) -> f64 {
        if self.moves.is_empty() {
            return 0.0;
        }
        let next = self.moves[self.cursor % self.moves.len()];
        self.cursor = (self.cursor + 1) % self.moves.len();
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_shock_stays_in_range() {
        let mut shock = UniformShock::seeded(7);
        for _ in 0..10_000 {
            let pct = shock.next_change_percent();
            assert!(pct >= -2.0 && pct < 2.0, "out of range: {}", pct);
        }
    }

    #[test]
    fn test_uniform_shock_is_reproducible() {
        let mut a = UniformShock::seeded(42);
        let mut b = UniformShock::seeded(42);
        for _ in 0..100 {
            assert_eq!(a.next_change_percent(), b.next_change_percent());
        }
    }

    #[test]
    fn test_custom_amplitude() {
        let mut shock = UniformShock::with_amplitude(StdRng::seed_from_u64(1), 0.5).unwrap();
        assert_eq!(shock.amplitude(), 0.5);
        for _ in 0..1_000 {
            assert!(shock.next_change_percent().abs() <= 0.5);
        }
    }

    #[test]
    fn test_invalid_amplitude_rejected() {
        assert!(UniformShock::with_amplitude(StdRng::seed_from_u64(1), 0.0).is_err());
        assert!(UniformShock::with_amplitude(StdRng::seed_from_u64(1), -1.0).is_err());
        assert!(UniformShock::with_amplitude(StdRng::seed_from_u64(1), f64::NAN).is_err());
    }

    #[test]
    fn test_sequence_shock_wraps() {
        let mut shock = SequenceShock::new(vec![1.0, -1.5]);
        assert_eq!(shock.next_change_percent(), 1.0);
        assert_eq!(shock.next_change_percent(), -1.5);
        assert_eq!(shock.next_change_percent(), 1.0);

        let mut empty = SequenceShock::new(Vec::new());
        assert_eq!(empty.next_change_percent(), 0.0);
    }
}
