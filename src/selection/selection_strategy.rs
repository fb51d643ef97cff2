use std::fmt::Debug;

use tracing::warn;

use crate::crossover::Crossover;
use crate::error::Result;
use crate::genotype::Genotype;
use crate::population::Population;
use crate::rng::RandomSource;

/// Counters for the fallback paths taken while selecting.
///
/// None of these events is an error. They mark degenerate random states the
/// selection recovers from, and are accumulated over a run by the engine.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionReport {
    /// Draws that fell back to index 0 because the fitness sum was zero.
    pub zero_fitness: usize,
    /// Proportional draws whose scan ended without a pick.
    pub truncated_draws: usize,
    /// Rank walks that ran past the last rank.
    pub rank_overruns: usize,
    /// Slots filled with copies of the elite to restore the population size.
    pub padded: usize,
    /// Parent pairs that were crossed.
    pub crossovers: usize,
}

impl SelectionReport {
    /// Adds the counters of `other` to this report.
    pub fn merge(&mut self, other: &SelectionReport) {
        self.zero_fitness += other.zero_fitness;
        self.truncated_draws += other.truncated_draws;
        self.rank_overruns += other.rank_overruns;
        self.padded += other.padded;
        self.crossovers += other.crossovers;
    }

    /// Whether any fallback path was taken.
    pub fn has_fallbacks(&self) -> bool {
        self.zero_fitness + self.truncated_draws + self.rank_overruns + self.padded > 0
    }
}

/// Builds the next generation from an evaluated population.
///
/// Implementations keep the elite in slot 0, fill the remaining slots with
/// parents drawn by their own rule, cross consecutive parent pairs with
/// probability `crossover_rate`, and always return exactly `population.len()`
/// genotypes.
///
/// # Examples
///
/// ```
/// use genroute::crossover::NoCrossover;
/// use genroute::evolution::Challenge;
/// use genroute::genotype::BitString;
/// use genroute::population::Population;
/// use genroute::rng::RandomNumberGenerator;
/// use genroute::selection::{FitnessProportionalSelection, SelectionReport, SelectionStrategy};
///
/// struct Ones;
///
/// impl Challenge<BitString> for Ones {
///     fn score(&self, genotype: &BitString) -> f64 {
///         genotype.count_ones() as f64
///     }
/// }
///
/// let members = vec![
///     BitString::new(vec![true, false]),
///     BitString::new(vec![true, true]),
///     BitString::new(vec![false, false]),
/// ];
/// let population = Population::evaluate(members, &Ones).unwrap();
/// let mut rng = RandomNumberGenerator::from_seed(7);
/// let mut report = SelectionReport::default();
///
/// let next = FitnessProportionalSelection
///     .select(&population, &NoCrossover, 0.0, &mut rng, &mut report)
///     .unwrap();
///
/// assert_eq!(next.len(), 3);
/// assert_eq!(next[0], BitString::new(vec![true, true]));
/// ```
pub trait SelectionStrategy<G>: Debug + Send + Sync
where
    G: Genotype,
{
    /// Selects the next generation.
    ///
    /// # Errors
    ///
    /// Returns an error if the population is empty or the crossover operator
    /// fails on a parent pair.
    fn select(
        &self,
        population: &Population<G>,
        crossover: &dyn Crossover<G>,
        crossover_rate: f64,
        rng: &mut dyn RandomSource,
        report: &mut SelectionReport,
    ) -> Result<Vec<G>>;
}

/// Elitism, pairing and padding shared by the strategies.
///
/// `pick` draws one parent index, or `None` when the draw produced nothing.
/// Only picked parents count toward pairing, so the elite never crosses.
pub(crate) fn breed<G, F>(
    population: &Population<G>,
    crossover: &dyn Crossover<G>,
    crossover_rate: f64,
    rng: &mut dyn RandomSource,
    report: &mut SelectionReport,
    mut pick: F,
) -> Result<Vec<G>>
where
    G: Genotype,
    F: FnMut(&mut dyn RandomSource, &mut SelectionReport) -> Option<usize>,
{
    let size = population.len();
    let mut next = Vec::with_capacity(size);
    next.push(population.elite().0.clone());

    let mut parents = 0;
    for _ in 1..size {
        let Some(index) = pick(&mut *rng, &mut *report) else {
            continue;
        };
        next.push(population.members()[index].clone());
        parents += 1;

        if parents % 2 == 0 && rng.uniform_real(0.0, 1.0) < crossover_rate {
            let last = next.len() - 1;
            let (head, tail) = next.split_at_mut(last);
            crossover.crossover(&mut head[last - 1], &mut tail[0], rng)?;
            report.crossovers += 1;
        }
    }

    while next.len() < size {
        warn!(
            selected = next.len(),
            expected = size,
            "padding population with the elite"
        );
        let elite = next[0].clone();
        next.push(elite);
        report.padded += 1;
    }

    Ok(next)
}
