use std::marker::PhantomData;

use rayon::prelude::*;
use tracing::{debug, info};

use super::{
    challenge::Challenge,
    engine::GenerationEngine,
    options::{EvolutionOptions, LogLevel},
    stats::{GenerationStats, TrialAccumulator},
};
use crate::{
    crossover::Crossover,
    error::Result,
    genotype::Genotype,
    mutation::Mutation,
    rng::{RandomNumberGenerator, RandomSource},
    selection::{SelectionReport, SelectionStrategy},
};

/// The outcome of one run: the best genotype found and how the run went.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionResult<G: Genotype> {
    /// The elite of the final generation.
    pub genotype: G,
    /// The fitness score of the genotype.
    pub score: f64,
    /// Generations run.
    pub generations: usize,
    /// Fitness evaluations, including the initial population.
    pub evaluations: usize,
    /// Statistics of every generation, starting with the initial population.
    pub history: Vec<GenerationStats>,
    /// Selection fallbacks over the whole run.
    pub selection_report: SelectionReport,
}

/// Results of independent trials and their per-generation averages.
#[derive(Debug, Clone)]
pub struct TrialSummary<G: Genotype> {
    pub results: Vec<EvolutionResult<G>>,
    pub averages: TrialAccumulator,
}

impl<G: Genotype> TrialSummary<G> {
    /// The result with the highest score; earlier trials win ties.
    pub fn best(&self) -> Option<&EvolutionResult<G>> {
        self.results
            .iter()
            .fold(None, |best: Option<&EvolutionResult<G>>, result| match best {
                Some(current) if current.score >= result.score => Some(current),
                _ => Some(result),
            })
    }
}

/// Runs evolutions to completion.
///
/// A run stops at the generation ceiling of its options, or as soon as the
/// best fitness reaches the target fitness when one is set. Each run gets a
/// fresh engine built from clones of the launcher's parts.
#[derive(Debug, Clone)]
pub struct EvolutionLauncher<G, C, S, X, M>
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
    genotype_len: usize,
    _marker: PhantomData<G>,
}

impl<G, C, S, X, M> EvolutionLauncher<G, C, S, X, M>
where
    G: Genotype,
    C: Challenge<G> + Clone + Send + Sync,
    S: SelectionStrategy<G> + Clone,
    X: Crossover<G> + Clone,
    M: Mutation<G> + Clone,
{
    /// Creates a launcher for random populations of `genotype_len` genes.
    pub fn new(challenge: C, selection: S, crossover: X, mutation: M, genotype_len: usize) -> Self {
        Self {
            challenge,
            selection,
            crossover,
            mutation,
            genotype_len,
            _marker: PhantomData,
        }
    }

    pub fn genotype_len(&self) -> usize {
        self.genotype_len
    }

    /// Builds a fresh engine over a random population.
    pub fn engine(
        &self,
        options: &EvolutionOptions,
        rng: &mut dyn RandomSource,
    ) -> Result<GenerationEngine<G, C, S, X, M>> {
        GenerationEngine::random(
            self.challenge.clone(),
            self.selection.clone(),
            self.crossover.clone(),
            self.mutation.clone(),
            self.genotype_len,
            options,
            rng,
        )
    }

    /// Evolves a random population until the ceiling or the target.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid or a generation fails.
    pub fn evolve(
        &self,
        options: &EvolutionOptions,
        rng: &mut dyn RandomSource,
    ) -> Result<EvolutionResult<G>> {
        let mut engine = self.engine(options, rng)?;
        Self::run(&mut engine, options, rng)
    }

    /// Evolves starting from `initial`.
    pub fn evolve_from(
        &self,
        initial: Vec<G>,
        options: &EvolutionOptions,
        rng: &mut dyn RandomSource,
    ) -> Result<EvolutionResult<G>> {
        let mut engine = GenerationEngine::new(
            self.challenge.clone(),
            self.selection.clone(),
            self.crossover.clone(),
            self.mutation.clone(),
            initial,
            options,
        )?;
        Self::run(&mut engine, options, rng)
    }

    /// Drives an existing engine until the ceiling or the target, recording
    /// statistics from its current generation on.
    pub fn run(
        engine: &mut GenerationEngine<G, C, S, X, M>,
        options: &EvolutionOptions,
        rng: &mut dyn RandomSource,
    ) -> Result<EvolutionResult<G>> {
        let target = options.get_target_fitness();

        info!(
            population = engine.population().len(),
            max_generations = options.get_max_generations(),
            target = ?target,
            "starting evolution"
        );

        let mut history = vec![engine.stats()];
        while engine.generation() < options.get_max_generations()
            && !Self::target_reached(engine, target)
        {
            engine.advance(rng)?;
            let stats = engine.stats();
            history.push(stats);
            Self::report(engine, &stats, options);
        }

        let (elite, score) = engine.elite();
        info!(
            generations = engine.generation(),
            evaluations = engine.evaluations(),
            score,
            target_reached = Self::target_reached(engine, target),
            "evolution finished"
        );

        Ok(EvolutionResult {
            genotype: elite.clone(),
            score,
            generations: engine.generation(),
            evaluations: engine.evaluations(),
            history,
            selection_report: *engine.selection_report(),
        })
    }

    fn target_reached(engine: &GenerationEngine<G, C, S, X, M>, target: Option<f64>) -> bool {
        target.is_some_and(|target| engine.max_fitness() >= target)
    }

    fn report(
        engine: &GenerationEngine<G, C, S, X, M>,
        stats: &GenerationStats,
        options: &EvolutionOptions,
    ) {
        match options.get_log_level() {
            LogLevel::Verbose => {
                info!(
                    generation = stats.generation,
                    min = stats.min,
                    max = stats.max,
                    mean = stats.mean,
                    evaluations = stats.evaluations,
                    "generation"
                );
                debug!(elite = ?engine.elite().0, "current elite");
            }
            LogLevel::Minimal => {
                if stats.generation % options.get_report_interval().max(1) == 0 {
                    info!(
                        generation = stats.generation,
                        max = stats.max,
                        mean = stats.mean,
                        "generation"
                    );
                }
            }
            LogLevel::None => {}
        }
    }

    /// Runs `trials` independent evolutions in parallel. Trial `i` draws from
    /// a generator seeded with `base_seed + i`, so the summary depends only on
    /// the seed, not on scheduling.
    ///
    /// # Errors
    ///
    /// Returns the first error any trial produced.
    pub fn run_trials(
        &self,
        options: &EvolutionOptions,
        trials: usize,
        base_seed: u64,
    ) -> Result<TrialSummary<G>> {
        options.validate()?;
        info!(trials, base_seed, "starting trials");

        let results: Vec<EvolutionResult<G>> = (0..trials)
            .into_par_iter()
            .map(|trial| {
                let mut rng = RandomNumberGenerator::from_seed(base_seed.wrapping_add(trial as u64));
                let result = self.evolve(options, &mut rng)?;
                debug!(trial, score = result.score, generations = result.generations, "trial finished");
                Ok(result)
            })
            .collect::<Result<_>>()?;

        let mut averages = TrialAccumulator::new();
        for result in &results {
            averages.add_history(&result.history);
        }

        Ok(TrialSummary { results, averages })
    }
}
