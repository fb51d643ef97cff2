pub mod crossover;
pub mod error;
pub mod evolution;
pub mod fitness;
pub mod genotype;
pub mod mutation;
pub mod population;
pub mod rng;
pub mod selection;
pub mod tsp;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types for convenience
pub use error::{GeneticError, OptionExt, Result};
pub use evolution::{Challenge, EvolutionLauncher, EvolutionOptions, GenerationEngine};
pub use genotype::{BitString, Genotype, Route};
