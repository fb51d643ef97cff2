use crate::{
    crossover::Crossover,
    error::{GeneticError, Result},
    genotype::Genotype,
    mutation::Mutation,
    rng::RandomSource,
    selection::SelectionStrategy,
};

use super::{Challenge, EvolutionOptions, GenerationEngine};

/// Assembles a [`GenerationEngine`] part by part.
///
/// The challenge, the three operators and either an initial population or a
/// genotype length are required. Options default to
/// [`EvolutionOptions::default`].
///
/// ```
/// use genroute::crossover::SinglePointCrossover;
/// use genroute::evolution::{EvolutionOptions, GenerationEngineBuilder};
/// use genroute::fitness::BitCount;
/// use genroute::genotype::BitString;
/// use genroute::mutation::BitFlipMutation;
/// use genroute::rng::RandomNumberGenerator;
/// use genroute::selection::RankProportionalSelection;
///
/// let mut rng = RandomNumberGenerator::from_seed(3);
/// let engine = GenerationEngineBuilder::<BitString, _, _, _, _>::new()
///     .with_challenge(BitCount)
///     .with_selection(RankProportionalSelection)
///     .with_crossover(SinglePointCrossover)
///     .with_mutation(BitFlipMutation)
///     .with_options(EvolutionOptions::new(10, 0.05, 0.6, 100))
///     .with_genotype_len(32)
///     .build(&mut rng)
///     .unwrap();
///
/// assert_eq!(engine.population().len(), 10);
/// ```
#[derive(Debug)]
pub struct GenerationEngineBuilder<G, C, S, X, M>
where
    G: Genotype,
    C: Challenge<G>,
    S: SelectionStrategy<G>,
    X: Crossover<G>,
    M: Mutation<G>,
{
    challenge: Option<C>,
    selection: Option<S>,
    crossover: Option<X>,
    mutation: Option<M>,
    options: Option<EvolutionOptions>,
    initial: Option<Vec<G>>,
    genotype_len: Option<usize>,
}

impl<G, C, S, X, M> GenerationEngineBuilder<G, C, S, X, M>
where
    G: Genotype,
    C: Challenge<G>,
    S: SelectionStrategy<G>,
    X: Crossover<G>,
    M: Mutation<G>,
{
    pub fn new() -> Self {
        Self {
            challenge: None,
            selection: None,
            crossover: None,
            mutation: None,
            options: None,
            initial: None,
            genotype_len: None,
        }
    }

    pub fn with_challenge(mut self, challenge: C) -> Self {
        self.challenge = Some(challenge);
        self
    }

    pub fn with_selection(mut self, selection: S) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn with_crossover(mut self, crossover: X) -> Self {
        self.crossover = Some(crossover);
        self
    }

    pub fn with_mutation(mut self, mutation: M) -> Self {
        self.mutation = Some(mutation);
        self
    }

    pub fn with_options(mut self, options: EvolutionOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Starts from these members instead of a random population.
    pub fn with_initial_population(mut self, initial: Vec<G>) -> Self {
        self.initial = Some(initial);
        self
    }

    /// Length of the random members; ignored when an initial population is set.
    pub fn with_genotype_len(mut self, genotype_len: usize) -> Self {
        self.genotype_len = Some(genotype_len);
        self
    }

    /// Builds and evaluates the engine. `rng` is only drawn from for a
    /// random initial population.
    pub fn build(self, rng: &mut dyn RandomSource) -> Result<GenerationEngine<G, C, S, X, M>> {
        let challenge = self
            .challenge
            .ok_or_else(|| GeneticError::Configuration("Challenge not specified".to_string()))?;

        let selection = self.selection.ok_or_else(|| {
            GeneticError::Configuration("Selection strategy not specified".to_string())
        })?;

        let crossover = self.crossover.ok_or_else(|| {
            GeneticError::Configuration("Crossover operator not specified".to_string())
        })?;

        let mutation = self.mutation.ok_or_else(|| {
            GeneticError::Configuration("Mutation operator not specified".to_string())
        })?;

        let options = self.options.unwrap_or_default();

        match (self.initial, self.genotype_len) {
            (Some(initial), _) => {
                GenerationEngine::new(challenge, selection, crossover, mutation, initial, &options)
            }
            (None, Some(len)) => GenerationEngine::random(
                challenge, selection, crossover, mutation, len, &options, rng,
            ),
            (None, None) => Err(GeneticError::Configuration(
                "Neither initial population nor genotype length specified".to_string(),
            )),
        }
    }
}

impl<G, C, S, X, M> Default for GenerationEngineBuilder<G, C, S, X, M>
where
    G: Genotype,
    C: Challenge<G>,
    S: SelectionStrategy<G>,
    X: Crossover<G>,
    M: Mutation<G>,
{
    fn default() -> Self {
        Self::new()
    }
}
