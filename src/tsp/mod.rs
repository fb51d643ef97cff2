//! # Traveling salesperson
//!
//! Problem instances, the tour-length challenge and the standard wiring of
//! the engine for routes: fitness-proportional selection, partially matched
//! crossover bounded by the population size, and proximity mutation.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use genroute::evolution::EvolutionOptions;
//! use genroute::rng::RandomNumberGenerator;
//! use genroute::tsp::{self, Point, TspInstance};
//!
//! let cities = (0..8)
//!     .map(|i| {
//!         let angle = i as f64 * std::f64::consts::TAU / 8.0;
//!         Point::new(100.0 * angle.cos(), 100.0 * angle.sin())
//!     })
//!     .collect();
//! let instance = Arc::new(TspInstance::new("octagon", cities).unwrap());
//!
//! let options = EvolutionOptions::new(8, 0.05, 0.7, 200);
//! let mut rng = RandomNumberGenerator::from_seed(12);
//! let mut engine = tsp::engine(instance.clone(), &options, &mut rng).unwrap();
//! for _ in 0..50 {
//!     engine.advance(&mut rng).unwrap();
//! }
//!
//! let (route, fitness) = engine.elite();
//! assert_eq!(route.cities().len(), 7);
//! assert_eq!(fitness, 1.0 / instance.tour_length(route).unwrap());
//! ```

pub mod instance;
pub mod tour;

use std::sync::Arc;

pub use instance::{parse_instance, parse_optimal_tour, Point, TspInstance};
pub use tour::TourLength;

use crate::{
    crossover::PartiallyMatchedCrossover,
    error::Result,
    evolution::{EvolutionLauncher, EvolutionOptions, GenerationEngine},
    genotype::Route,
    mutation::ProximityMutation,
    rng::RandomSource,
    selection::FitnessProportionalSelection,
};

/// The engine wired for routes.
pub type TspEngine = GenerationEngine<
    Route,
    TourLength,
    FitnessProportionalSelection,
    PartiallyMatchedCrossover,
    ProximityMutation,
>;

/// The launcher wired for routes.
pub type TspLauncher = EvolutionLauncher<
    Route,
    TourLength,
    FitnessProportionalSelection,
    PartiallyMatchedCrossover,
    ProximityMutation,
>;

fn crossover(instance: &TspInstance, options: &EvolutionOptions) -> PartiallyMatchedCrossover {
    let crossover = PartiallyMatchedCrossover::population_bounded(options.get_population_size());
    crossover.check_bound(instance.route_len());
    crossover
}

/// Builds an engine over random routes through `instance`.
///
/// # Errors
///
/// Returns `Configuration` if the options are invalid.
pub fn engine(
    instance: Arc<TspInstance>,
    options: &EvolutionOptions,
    rng: &mut dyn RandomSource,
) -> Result<TspEngine> {
    GenerationEngine::random(
        TourLength::new(instance.clone()),
        FitnessProportionalSelection,
        crossover(&instance, options),
        ProximityMutation::new(instance.clone()),
        instance.route_len(),
        options,
        rng,
    )
}

/// Builds a launcher for repeated runs on `instance`.
pub fn launcher(instance: Arc<TspInstance>, options: &EvolutionOptions) -> TspLauncher {
    EvolutionLauncher::new(
        TourLength::new(instance.clone()),
        FitnessProportionalSelection,
        crossover(&instance, options),
        ProximityMutation::new(instance.clone()),
        instance.route_len(),
    )
}

/// Uses the fitness of the instance's known optimal tour as the target,
/// unless the options already name one.
pub fn with_optimal_target(options: &EvolutionOptions, instance: &TspInstance) -> EvolutionOptions {
    let mut options = options.clone();
    if options.get_target_fitness().is_none() {
        options.set_target_fitness(instance.optimal_fitness());
    }
    options
}
