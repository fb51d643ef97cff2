//! # Random sources
//!
//! Every stochastic operator in the crate draws through the [`RandomSource`]
//! trait: uniform integers over an inclusive range and uniform reals over a
//! half-open range. The production implementation, [`RandomNumberGenerator`],
//! wraps the `rand` crate's `StdRng`.
//!
//! Each evolution run owns its own generator, so independent trials can run on
//! separate threads without sharing state.
//!
//! ## Example
//!
//! ```rust
//! use genroute::rng::{RandomNumberGenerator, RandomSource};
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let index = rng.uniform_int(0, 9);
//! let probability = rng.uniform_real(0.0, 1.0);
//!
//! assert!(index <= 9);
//! assert!((0.0..1.0).contains(&probability));
//! ```

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Uniform random draws used by selection, crossover and mutation.
///
/// The trait is object safe; operators take `&mut dyn RandomSource` so tests
/// can substitute a scripted sequence of draws.
pub trait RandomSource {
    /// Draws an integer uniformly from `[lo, hi]`, both ends inclusive.
    ///
    /// Returns `lo` when the range is empty (`hi < lo`).
    fn uniform_int(&mut self, lo: usize, hi: usize) -> usize;

    /// Draws a real number uniformly from `[lo, hi)`.
    ///
    /// Returns `lo` when the range is empty (`hi <= lo`).
    fn uniform_real(&mut self, lo: f64, hi: f64) -> f64;
}

/// A wrapper around the `rand` crate's `StdRng`.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible trials, tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for RandomNumberGenerator {
    fn uniform_int(&mut self, lo: usize, hi: usize) -> usize {
        if hi < lo {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    fn uniform_real(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..hi)
    }
}

/// A random source that replays literal draws, for deterministic tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedRng {
    ints: std::collections::VecDeque<usize>,
    reals: std::collections::VecDeque<f64>,
}

#[cfg(test)]
impl ScriptedRng {
    pub(crate) fn new(ints: Vec<usize>, reals: Vec<f64>) -> Self {
        Self {
            ints: ints.into(),
            reals: reals.into(),
        }
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.ints.is_empty() && self.reals.is_empty()
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRng {
    fn uniform_int(&mut self, lo: usize, hi: usize) -> usize {
        let value = self.ints.pop_front().expect("scripted integer draws exhausted");
        assert!(
            lo <= value && value <= hi.max(lo),
            "scripted integer {} outside [{}, {}]",
            value,
            lo,
            hi
        );
        value
    }

    fn uniform_real(&mut self, lo: f64, hi: f64) -> f64 {
        let value = self.reals.pop_front().expect("scripted real draws exhausted");
        assert!(
            lo <= value && (value < hi || hi <= lo),
            "scripted real {} outside [{}, {})",
            value,
            lo,
            hi
        );
        value
    }
}
