use genroute::{
    crossover::{NoCrossover, SinglePointCrossover},
    error::GeneticError,
    evolution::{Challenge, EvolutionLauncher, EvolutionOptions, GenerationEngineBuilder, LogLevel},
    fitness::{AnalyticChallenge, BitCount, FixedPointDecoder, Rastrigin, Sphere},
    genotype::BitString,
    mutation::{BitFlipMutation, SwapMutation},
    rng::RandomNumberGenerator,
    selection::{FitnessProportionalSelection, RankProportionalSelection},
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Scores every member zero.
#[derive(Clone, Debug)]
struct Flat;

impl Challenge<BitString> for Flat {
    fn score(&self, _genotype: &BitString) -> f64 {
        0.0
    }
}

/// Scores a bit string by its sign bit only, and negatively when it is set.
#[derive(Clone, Debug)]
struct Signed;

impl Challenge<BitString> for Signed {
    fn score(&self, genotype: &BitString) -> f64 {
        if genotype.bits()[0] {
            -1.0
        } else {
            1.0
        }
    }
}

#[test]
fn test_one_max() {
    init_tracing();
    let options = EvolutionOptions::builder()
        .population_size(40)
        .mutation_rate(0.02)
        .crossover_rate(0.8)
        .max_generations(2_000)
        .target_fitness(1.0)
        .log_level(LogLevel::Verbose)
        .build();
    let launcher = EvolutionLauncher::<BitString, _, _, _, _>::new(
        BitCount,
        FitnessProportionalSelection,
        SinglePointCrossover,
        BitFlipMutation,
        24,
    );
    let mut rng = RandomNumberGenerator::from_seed(31);
    let result = launcher.evolve(&options, &mut rng).unwrap();

    assert_eq!(result.score, 1.0);
    assert_eq!(result.genotype.count_ones(), 24);
    assert_eq!(result.history.len(), result.generations + 1);
    assert_eq!(result.evaluations, 40 * (result.generations + 1));
}

#[test]
fn test_sphere_improves_with_rank_selection() {
    let decoder = FixedPointDecoder::new(10, 100.0).unwrap();
    let challenge = AnalyticChallenge::new(Sphere, decoder, 3).unwrap();
    let options = EvolutionOptions::new(30, 0.02, 0.8, 300);
    let launcher = EvolutionLauncher::<BitString, _, _, _, _>::new(
        challenge.clone(),
        RankProportionalSelection,
        SinglePointCrossover,
        BitFlipMutation,
        challenge.genotype_len(),
    );

    let summary = launcher.run_trials(&options, 3, 7).unwrap();
    for result in &summary.results {
        let first = result.history.first().unwrap().max;
        assert!(result.score >= first);
        assert!(result.score > 0.95, "score {}", result.score);
        // Worst case is 3 * 5.11^2 for three values of magnitude at most 5.11.
        assert!(challenge.raw_value(&result.genotype) < 0.05 * 3.0 * 5.11 * 5.11);
    }
}

#[test]
fn test_rastrigin_runs_with_swap_mutation() {
    let decoder = FixedPointDecoder::new(8, 25.0).unwrap();
    let challenge = AnalyticChallenge::new(Rastrigin, decoder, 2).unwrap();
    let options = EvolutionOptions::new(20, 0.05, 0.6, 100);
    let mut rng = RandomNumberGenerator::from_seed(3);
    let result = EvolutionLauncher::<BitString, _, _, _, _>::new(
        challenge.clone(),
        FitnessProportionalSelection,
        SinglePointCrossover,
        SwapMutation,
        challenge.genotype_len(),
    )
    .evolve(&options, &mut rng)
    .unwrap();

    assert_eq!(result.generations, 100);
    assert!((0.0..=1.0).contains(&result.score));
}

#[test]
fn test_zero_fitness_population_is_counted() {
    let options = EvolutionOptions::new(6, 0.1, 0.5, 5);
    let mut rng = RandomNumberGenerator::from_seed(2);
    let mut engine = GenerationEngineBuilder::<BitString, _, _, _, _>::new()
        .with_challenge(Flat)
        .with_selection(FitnessProportionalSelection)
        .with_crossover(NoCrossover)
        .with_mutation(BitFlipMutation)
        .with_options(options)
        .with_genotype_len(8)
        .build(&mut rng)
        .unwrap();

    engine.advance(&mut rng).unwrap();
    engine.advance(&mut rng).unwrap();

    assert_eq!(engine.selection_report().zero_fitness, 2 * 5);
    assert_eq!(engine.population().len(), 6);
    assert_eq!(engine.max_fitness(), 0.0);
}

#[test]
fn test_negative_fitness_is_rejected() {
    let options = EvolutionOptions::new(4, 0.1, 0.5, 5);
    let initial = vec![
        BitString::new(vec![false, true]),
        BitString::new(vec![true, true]),
        BitString::new(vec![false, false]),
        BitString::new(vec![false, true]),
    ];
    let mut rng = RandomNumberGenerator::from_seed(2);
    let result = GenerationEngineBuilder::<BitString, _, _, _, _>::new()
        .with_challenge(Signed)
        .with_selection(RankProportionalSelection)
        .with_crossover(SinglePointCrossover)
        .with_mutation(BitFlipMutation)
        .with_options(options)
        .with_initial_population(initial)
        .build(&mut rng);

    assert!(matches!(result, Err(GeneticError::InvalidNumericValue(_))));
}
