//! # Mutation
//!
//! A [`Mutation`] perturbs one genotype in place. The engine applies it to
//! every member except the elite at slot 0.
//!
//! - [`SwapMutation`]: per gene, swap with a random other position.
//! - [`BitFlipMutation`]: per bit, flip.
//! - [`ProximityMutation`]: per route position, pull a nearby city next to
//!   the current one, preferring cities close to both neighbours.

pub mod proximity;
pub mod swap;

use std::fmt::Debug;

use crate::{genotype::Genotype, rng::RandomSource};

pub use proximity::ProximityMutation;
pub use swap::{BitFlipMutation, SwapMutation};

/// Perturbs a genotype in place.
pub trait Mutation<G: Genotype>: Debug + Send + Sync {
    /// Mutates each gene with probability `rate` and returns how many
    /// mutations were applied.
    fn mutate(&self, genotype: &mut G, rate: f64, rng: &mut dyn RandomSource) -> usize;
}
