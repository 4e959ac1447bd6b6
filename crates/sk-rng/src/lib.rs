//! Seeded random number generation for map building.
//!
//! A 32-bit linear congruential generator with the classic Numerical
//! Recipes constants. The whole point of this crate is reproducibility:
//! two generators built from the same seed emit the same sequence on any
//! platform, so a networked session can rebuild a map from its seed alone
//! instead of shipping the full grid.

use rand::{Error, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

/// LCG multiplier.
const MULTIPLIER: u32 = 1_664_525;

/// LCG increment.
const INCREMENT: u32 = 1_013_904_223;

/// Seeded linear congruential generator.
///
/// State transition is `state' = (a * state + c) mod 2^32`, with the
/// modulus provided by natural `u32` wrapping. Keeps the initial seed
/// around so a generator can be rewound or queried for it.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u32,
    seed: u32,
}

// Only the seed crosses a serialization boundary; deserializing yields a
// freshly seeded generator.
impl Serialize for SeededRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SeededRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u32::deserialize(deserializer)?;
        Ok(SeededRng::new(seed))
    }
}

impl SeededRng {
    /// Create a new generator with the given seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed, seed }
    }

    /// Create a new generator with a random seed.
    ///
    /// The drawn seed is retained, so the sequence stays reproducible
    /// once `seed()` has been recorded.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this generator was created (or last `reset`) with.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Advance the generator and return the raw state.
    #[inline]
    pub fn next(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.state
    }

    /// Next value as a float in `[0, 1)`.
    #[inline]
    pub fn next_float(&mut self) -> f64 {
        f64::from(self.next()) / 4_294_967_296.0
    }

    /// Next value in `[0, max)`.
    ///
    /// Returns 0 for `max <= 1` without consuming a draw, so a degenerate
    /// bound cannot shift the rest of the sequence.
    #[inline]
    pub fn next_int(&mut self, max: u32) -> u32 {
        if max <= 1 {
            return 0;
        }
        (self.next_float() * f64::from(max)) as u32
    }

    /// Reseed the generator.
    ///
    /// `Some(s)` replaces the stored seed with `s`; `None` rewinds to the
    /// stored seed.
    pub fn reset(&mut self, seed: Option<u32>) {
        if let Some(s) = seed {
            self.seed = s;
        }
        self.state = self.seed;
    }

    /// Choose a uniformly random element from a slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.next_int(items.len() as u32) as usize])
        }
    }
}

impl Default for SeededRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        self.next()
    }

    fn next_u64(&mut self) -> u64 {
        (u64::from(self.next()) << 32) | u64::from(self.next())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for SeededRng {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}
