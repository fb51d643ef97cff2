//! # GenerationEngine
//!
//! Holds one run's population and steps it forward a generation at a time.
//! A generation is selection (with crossover), mutation of every member but
//! the elite in slot 0, then evaluation of the whole new population.
//!
//! The engine is generic over the genotype, the challenge and the three
//! operators, so one loop drives routes and bit strings alike.
//!
//! ## Example
//!
//! ```rust
//! use genroute::crossover::SinglePointCrossover;
//! use genroute::evolution::{EvolutionOptions, GenerationEngine};
//! use genroute::fitness::BitCount;
//! use genroute::genotype::BitString;
//! use genroute::mutation::BitFlipMutation;
//! use genroute::rng::RandomNumberGenerator;
//! use genroute::selection::FitnessProportionalSelection;
//!
//! let options = EvolutionOptions::new(20, 0.05, 0.7, 100);
//! let mut rng = RandomNumberGenerator::from_seed(42);
//! let mut engine = GenerationEngine::<BitString, _, _, _, _>::random(
//!     BitCount,
//!     FitnessProportionalSelection,
//!     SinglePointCrossover,
//!     BitFlipMutation,
//!     16,
//!     &options,
//!     &mut rng,
//! )
//! .unwrap();
//!
//! let start = engine.max_fitness();
//! for _ in 0..10 {
//!     engine.advance(&mut rng).unwrap();
//! }
//!
//! assert_eq!(engine.generation(), 10);
//! assert_eq!(engine.evaluations(), 20 * 11);
//! assert!(engine.max_fitness() >= start);
//! ```

use std::marker::PhantomData;

use tracing::{debug, trace};

use super::{challenge::Challenge, options::EvolutionOptions, stats::GenerationStats};
use crate::{
    crossover::Crossover,
    error::{GeneticError, Result},
    genotype::Genotype,
    mutation::Mutation,
    population::Population,
    rng::RandomSource,
    selection::{SelectionReport, SelectionStrategy},
};

/// One evolutionary run over genotypes `G`.
#[derive(Debug)]
pub struct GenerationEngine<G, C, S, X, M>
where
    G: Genotype,
    C: Challenge<G>,
    S: SelectionStrategy<G>,
    X: Crossover<G>,
    M: Mutation<G>,
{
    challenge: C,
    selection: S,
    crossover: X,
    mutation: M,
    population: Population<G>,
    mutation_rate: f64,
    crossover_rate: f64,
    evaluations: usize,
    generation: usize,
    report: SelectionReport,
    _marker: PhantomData<G>,
}

impl<G, C, S, X, M> GenerationEngine<G, C, S, X, M>
where
    G: Genotype,
    C: Challenge<G>,
    S: SelectionStrategy<G>,
    X: Crossover<G>,
    M: Mutation<G>,
{
    /// Creates an engine from a caller-supplied initial population and
    /// evaluates it.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the options are invalid, the population size
    /// differs from the options, or the members are empty or of unequal
    /// length. Evaluation errors are passed through.
    pub fn new(
        challenge: C,
        selection: S,
        crossover: X,
        mutation: M,
        initial: Vec<G>,
        options: &EvolutionOptions,
    ) -> Result<Self> {
        options.validate()?;

        let expected = options.get_population_size();
        if initial.len() != expected {
            return Err(GeneticError::Configuration(format!(
                "initial population has {} members, expected {}",
                initial.len(),
                expected
            )));
        }
        let len = initial[0].len();
        if len == 0 {
            return Err(GeneticError::Configuration(
                "genotype length must be at least 1".to_string(),
            ));
        }
        if let Some(odd) = initial.iter().position(|member| member.len() != len) {
            return Err(GeneticError::Configuration(format!(
                "member {} has length {}, expected {}",
                odd,
                initial[odd].len(),
                len
            )));
        }

        let population = Population::evaluate(initial, &challenge)?;
        let evaluations = population.len();
        debug!(
            members = evaluations,
            genotype_len = len,
            max_fitness = population.max_fitness(),
            "initial population evaluated"
        );

        Ok(Self {
            challenge,
            selection,
            crossover,
            mutation,
            population,
            mutation_rate: options.get_mutation_rate(),
            crossover_rate: options.get_crossover_rate(),
            evaluations,
            generation: 0,
            report: SelectionReport::default(),
            _marker: PhantomData,
        })
    }

    /// Creates an engine over a random initial population of `genotype_len`
    /// genes per member.
    pub fn random(
        challenge: C,
        selection: S,
        crossover: X,
        mutation: M,
        genotype_len: usize,
        options: &EvolutionOptions,
        rng: &mut dyn RandomSource,
    ) -> Result<Self> {
        options.validate()?;
        if genotype_len == 0 {
            return Err(GeneticError::Configuration(
                "genotype length must be at least 1".to_string(),
            ));
        }
        let initial = (0..options.get_population_size())
            .map(|_| G::random(genotype_len, &mut *rng))
            .collect();
        Self::new(challenge, selection, crossover, mutation, initial, options)
    }

    /// Runs one generation.
    ///
    /// # Errors
    ///
    /// Fails if crossover rejects a parent pair, or if the new population holds
    /// an invalid genotype or scores outside `[0, ∞)`.
    pub fn advance(&mut self, rng: &mut dyn RandomSource) -> Result<()> {
        let mut step = SelectionReport::default();
        let mut next = self.selection.select(
            &self.population,
            &self.crossover,
            self.crossover_rate,
            rng,
            &mut step,
        )?;

        let mutated: usize = next
            .iter_mut()
            .skip(1)
            .map(|member| self.mutation.mutate(member, self.mutation_rate, &mut *rng))
            .sum();

        self.population = Population::evaluate(next, &self.challenge)?;
        self.evaluations += self.population.len();
        self.generation += 1;
        self.report.merge(&step);

        if step.has_fallbacks() {
            debug!(generation = self.generation, report = ?step, "selection fell back");
        }
        trace!(
            generation = self.generation,
            crossovers = step.crossovers,
            mutated,
            max_fitness = self.population.max_fitness(),
            "generation complete"
        );
        Ok(())
    }

    pub fn min_fitness(&self) -> f64 {
        self.population.min_fitness()
    }

    pub fn max_fitness(&self) -> f64 {
        self.population.max_fitness()
    }

    pub fn mean_fitness(&self) -> f64 {
        self.population.mean_fitness()
    }

    /// Fitness evaluations so far, including the initial population.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The best member and its fitness.
    pub fn elite(&self) -> (&G, f64) {
        self.population.elite()
    }

    pub fn population(&self) -> &Population<G> {
        &self.population
    }

    /// Selection fallbacks accumulated over all generations.
    pub fn selection_report(&self) -> &SelectionReport {
        &self.report
    }

    pub fn stats(&self) -> GenerationStats {
        GenerationStats::from_population(&self.population, self.generation, self.evaluations)
    }

    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn crossover_rate(&self) -> f64 {
        self.crossover_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossover::{NoCrossover, PartiallyMatchedCrossover, SinglePointCrossover};
    use crate::fitness::BitCount;
    use crate::genotype::{BitString, Route};
    use crate::mutation::{BitFlipMutation, SwapMutation};
    use crate::rng::{RandomNumberGenerator, ScriptedRng};
    use crate::selection::{FitnessProportionalSelection, RankProportionalSelection};
    use crate::test_support::{tagged, Table};

    fn bits(pattern: &str) -> BitString {
        BitString::new(pattern.chars().map(|c| c == '1').collect())
    }

    /// Prefers routes whose first city is small.
    #[derive(Debug)]
    struct FirstCity;

    impl Challenge<Route> for FirstCity {
        fn score(&self, genotype: &Route) -> f64 {
            1.0 / genotype.cities()[0] as f64
        }
    }

    #[test]
    fn test_scripted_generation() {
        let scores = [0.1, 0.4, 0.3, 0.2];
        let members: Vec<BitString> = (0..4).map(tagged).collect();
        let table = Table(members.iter().cloned().zip(scores).collect());
        let options = EvolutionOptions::new(4, 0.25, 0.5, 10);
        let mut engine = GenerationEngine::new(
            table,
            FitnessProportionalSelection,
            SinglePointCrossover,
            BitFlipMutation,
            members,
            &options,
        )
        .unwrap();
        assert_eq!(engine.evaluations(), 4);

        let mut reals = vec![
            0.45, // parent: member 1
            0.75, // parent: member 2
            0.3,  // pair crossed
            0.95, // parent: member 3
        ];
        // Bit flips for slots 1..=3; only the last bit of slot 2 flips.
        let mut flips = vec![0.9; 12];
        flips[7] = 0.1;
        reals.extend(flips);
        let mut rng = ScriptedRng::new(vec![1], reals);

        engine.advance(&mut rng).unwrap();

        assert!(rng.is_exhausted());
        assert_eq!(
            engine.population().members(),
            &[bits("1000"), bits("1100"), bits("0001"), bits("1100")]
        );
        assert_eq!(engine.population().fitness(), &[0.4, 0.2, 0.0, 0.2]);
        assert_eq!(engine.evaluations(), 8);
        assert_eq!(engine.generation(), 1);
        assert_eq!(engine.selection_report().crossovers, 1);
        assert!(!engine.selection_report().has_fallbacks());
    }

    #[test]
    fn test_elite_survives_unchanged() {
        let options = EvolutionOptions::new(30, 0.2, 0.9, 50);
        let mut rng = RandomNumberGenerator::from_seed(13);
        let mut engine = GenerationEngine::random(
            BitCount,
            FitnessProportionalSelection,
            SinglePointCrossover,
            BitFlipMutation,
            24,
            &options,
            &mut rng,
        )
        .unwrap();

        for _ in 0..40 {
            let (elite, fitness) = engine.elite();
            let (elite, fitness) = (elite.clone(), fitness);
            engine.advance(&mut rng).unwrap();

            assert_eq!(engine.population().members()[0], elite);
            assert_eq!(engine.population().fitness()[0], fitness);
            assert!(engine.max_fitness() >= fitness);
            assert_eq!(engine.population().len(), 30);
            assert_eq!(engine.population().fitness().len(), 30);
        }
    }

    #[test]
    fn test_routes_stay_permutations() {
        let options = EvolutionOptions::new(12, 0.1, 1.0, 50);
        let mut rng = RandomNumberGenerator::from_seed(5);
        let mut engine = GenerationEngine::random(
            FirstCity,
            RankProportionalSelection,
            PartiallyMatchedCrossover::genotype_bounded(),
            SwapMutation,
            9,
            &options,
            &mut rng,
        )
        .unwrap();

        for _ in 0..30 {
            engine.advance(&mut rng).unwrap();
            assert!(engine.population().members().iter().all(|r| r.is_valid()));
        }
        assert_eq!(engine.evaluations(), 12 * 31);
        assert_eq!(engine.stats().generation, 30);
    }

    #[test]
    fn test_construction_errors() {
        let options = EvolutionOptions::new(3, 0.1, 0.5, 10);
        let short = vec![BitString::new(vec![true]); 2];
        assert!(matches!(
            GenerationEngine::new(
                BitCount,
                FitnessProportionalSelection,
                NoCrossover,
                BitFlipMutation,
                short,
                &options
            ),
            Err(GeneticError::Configuration(_))
        ));

        let ragged = vec![bits("10"), bits("1"), bits("01")];
        assert!(GenerationEngine::new(
            BitCount,
            FitnessProportionalSelection,
            NoCrossover,
            BitFlipMutation,
            ragged,
            &options
        )
        .is_err());

        let empty = vec![BitString::new(Vec::new()); 3];
        assert!(GenerationEngine::new(
            BitCount,
            FitnessProportionalSelection,
            NoCrossover,
            BitFlipMutation,
            empty,
            &options
        )
        .is_err());

        let mut rng = RandomNumberGenerator::from_seed(1);
        let bad_rate = EvolutionOptions::new(3, 1.5, 0.5, 10);
        assert!(GenerationEngine::<BitString, _, _, _, _>::random(
            BitCount,
            FitnessProportionalSelection,
            NoCrossover,
            BitFlipMutation,
            4,
            &bad_rate,
            &mut rng
        )
        .is_err());
    }

    #[test]
    fn test_broken_route_is_reported() {
        let options = EvolutionOptions::new(2, 0.0, 0.0, 10);
        let initial = vec![Route::new(vec![1, 2, 3]), Route::new(vec![1, 1, 3])];
        let result = GenerationEngine::new(
            FirstCity,
            FitnessProportionalSelection,
            NoCrossover,
            SwapMutation,
            initial,
            &options,
        );
        assert!(matches!(result, Err(GeneticError::InvalidGenotype(_))));
    }
}
