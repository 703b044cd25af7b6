//! Random sources.
//!
//! Every random choice in flyby (content, directions, delays, per-update jitter)
//! goes through [`RandomSource`], so tests can swap in a seeded or scripted source.

use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Source of uniform random numbers.
pub trait RandomSource {
    /// Returns a random f32 in [0, 1).
    fn next_f32(&mut self) -> f32;

    /// Returns a random f32 in [min, max).
    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Returns a random index in `0..len`, or 0 when `len` is 0.
    fn index(&mut self, len: usize) -> usize {
        let i = (self.next_f32() * len as f32) as usize;
        i.min(len.saturating_sub(1))
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f32(&mut self) -> f32 {
        (**self).next_f32()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_f32(&mut self) -> f32 {
        (**self).next_f32()
    }
}

/// Seedable xorshift64 generator.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlybyRng {
    state: u64,
}

impl Default for FlybyRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

impl FlybyRng {
    /// Creates a new RNG with the given seed.
    pub fn new(seed: u64) -> Self {
        // xorshift never leaves the all-zero state
        let state = if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed };
        Self { state }
    }

    /// Creates an RNG seeded from the thread-local system generator.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}

impl RandomSource for FlybyRng {
    fn next_f32(&mut self) -> f32 {
        // top 24 bits fit the f32 mantissa exactly
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }
}

/// Non-deterministic source backed by `rand`'s thread-local generator.
#[derive(Debug, Clone)]
pub struct SystemRandom(rand::rngs::ThreadRng);

impl Default for SystemRandom {
    fn default() -> Self {
        Self(rand::rng())
    }
}

impl SystemRandom {
    /// Creates a source using the thread-local generator.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RandomSource for SystemRandom {
    fn next_f32(&mut self) -> f32 {
        self.0.random::<f32>()
    }
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// Values are clamped into [0, 1). An empty list always yields 0.
#[derive(Debug, Clone, Default)]
pub struct SequenceRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceRandom {
    /// Creates a source that replays `values` in order.
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// A source that always returns `value`.
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceRandom {
    fn next_f32(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        if v.is_nan() {
            0.0
        } else {
            v.clamp(0.0, 1.0 - f32::EPSILON)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flyby_rng_unit_interval() {
        let mut rng = FlybyRng::new(42);
        for _ in 0..10_000 {
            let v = rng.next_f32();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_flyby_rng_deterministic() {
        let mut a = FlybyRng::new(99);
        let mut b = FlybyRng::new(99);
        for _ in 0..100 {
            assert_eq!(a.next_f32(), b.next_f32());
        }
    }

    #[test]
    fn test_zero_seed_still_varies() {
        let mut rng = FlybyRng::new(0);
        let first = rng.next_f32();
        let second = rng.next_f32();
        assert_ne!(first, second);
    }

    #[test]
    fn test_range_and_index() {
        let mut rng = FlybyRng::new(5);
        for _ in 0..1000 {
            let v = rng.range(100.0, 700.0);
            assert!((100.0..700.0).contains(&v));
            assert!(rng.index(5) < 5);
        }
        assert_eq!(rng.index(0), 0);
    }

    #[test]
    fn test_sequence_random_cycles_and_clamps() {
        let mut rng = SequenceRandom::new(vec![0.25, 2.0, -1.0]);
        assert_eq!(rng.next_f32(), 0.25);
        assert!(rng.next_f32() < 1.0);
        assert_eq!(rng.next_f32(), 0.0);
        assert_eq!(rng.next_f32(), 0.25);
        assert_eq!(rng.draws(), 4);
        assert_eq!(SequenceRandom::default().next_f32(), 0.0);
    }

    #[test]
    fn test_sequence_index_hits_last_slot() {
        let mut rng = SequenceRandom::constant(0.999);
        assert_eq!(rng.index(10), 9);
    }

    #[test]
    fn test_system_random_unit_interval() {
        let mut rng = SystemRandom::new();
        for _ in 0..1000 {
            assert!((0.0..1.0).contains(&rng.next_f32()));
        }
    }

    #[test]
    fn test_dyn_and_boxed_sources() {
        let mut boxed: Box<dyn RandomSource> = Box::new(SequenceRandom::constant(0.5));
        assert_eq!(boxed.next_f32(), 0.5);
        let by_ref: &mut dyn RandomSource = &mut boxed;
        assert_eq!(by_ref.range(0.0, 10.0), 5.0);
    }
}
