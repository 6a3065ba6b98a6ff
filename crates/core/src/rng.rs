//! Seeded random stream shared by every stochastic decision in the simulation.
//! This module exists so that generation, growth, and combat draw from one ordered stream.
//! It does not decide when randomness is consumed; callers own the call order.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

#[derive(Clone, Debug)]
pub struct GameRng {
    seed: u64,
    inner: ChaCha8Rng,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self { seed, inner: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restarts the stream from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    /// Uniform sample in `[0, 1)` built from the top 53 bits of the stream.
    pub fn uniform(&mut self) -> f64 {
        (self.inner.next_u64() >> 11) as f64 * (1.0 / (1_u64 << 53) as f64)
    }

    pub fn chance(&mut self, probability: f64) -> bool {
        self.uniform() < probability
    }

    /// Uniform integer in the inclusive range `[min, max]`.
    pub fn range(&mut self, min: i64, max: i64) -> i64 {
        debug_assert!(min <= max);
        let span = max.abs_diff(min).wrapping_add(1);
        if span == 0 {
            // Full 64-bit span.
            return self.inner.next_u64() as i64;
        }
        min.wrapping_add(self.below(span) as i64)
    }

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        self.below(len as u64) as usize
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let pick = self.index(items.len());
        items.get(pick)
    }

    /// Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for upper in (1..items.len()).rev() {
            let pick = self.index(upper + 1);
            items.swap(upper, pick);
        }
    }

    // Rejection sampling keeps small ranges free of modulo bias.
    fn below(&mut self, bound: u64) -> u64 {
        let zone = u64::MAX - (u64::MAX % bound);
        loop {
            let value = self.inner.next_u64();
            if value < zone {
                return value % bound;
            }
        }
    }
}
