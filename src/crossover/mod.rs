//! # Crossover
//!
//! A [`Crossover`] recombines two parents in place. Selection calls it on
//! consecutive pairs while it assembles the next population, so operators
//! receive mutable references to two distinct slots of that population.
//!
//! - [`PartiallyMatchedCrossover`] keeps routes valid permutations.
//! - [`SinglePointCrossover`] exchanges bit-string tails.
//! - [`NoCrossover`] leaves parents untouched, for mutation-only runs.

pub mod pmx;
pub mod single_point;

use std::fmt::Debug;

use crate::{error::Result, genotype::Genotype, rng::RandomSource};

pub use pmx::{partially_matched, PartiallyMatchedCrossover, RangeBound, SwapLog};
pub use single_point::SinglePointCrossover;

/// Recombines two parents of the same encoding in place.
pub trait Crossover<G: Genotype>: Debug + Send + Sync {
    /// Recombines `first` and `second`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGenotype` if the parents cannot be recombined without
    /// breaking their encoding, e.g. routes of different lengths.
    fn crossover(&self, first: &mut G, second: &mut G, rng: &mut dyn RandomSource) -> Result<()>;
}

/// Crossover that never changes its parents.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCrossover;

impl<G: Genotype> Crossover<G> for NoCrossover {
    fn crossover(&self, _first: &mut G, _second: &mut G, _rng: &mut dyn RandomSource) -> Result<()> {
        Ok(())
    }
}
