use tracing::{debug, trace};

use crate::crossover::Crossover;
use crate::error::Result;
use crate::genotype::Genotype;
use crate::population::Population;
use crate::rng::RandomSource;
use crate::selection::selection_strategy::{breed, SelectionReport, SelectionStrategy};

/// Residue below which a proportional scan counts as landed.
const SCAN_EPSILON: f64 = 1e-10;

/// Roulette wheel selection: each member is drawn with probability
/// proportional to its fitness.
///
/// A draw `r` in `[0, S)` walks the members, subtracting each fitness from
/// `r` and picking the first member that brings it below `1e-10`. When the
/// fitness sum `S` is zero every draw picks index 0. A scan that reaches the
/// end without landing leaves its slot empty; [`SelectionStrategy::select`]
/// pads such slots with the elite.
///
/// # Examples
///
/// ```
/// use genroute::evolution::Challenge;
/// use genroute::genotype::BitString;
/// use genroute::population::Population;
/// use genroute::rng::RandomNumberGenerator;
/// use genroute::selection::{FitnessProportionalSelection, SelectionReport};
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
///     BitString::new(vec![false, false]),
///     BitString::new(vec![true, true]),
/// ];
/// let population = Population::evaluate(members, &Ones).unwrap();
/// let mut rng = RandomNumberGenerator::from_seed(1);
/// let mut report = SelectionReport::default();
///
/// // The empty string has no share of the wheel.
/// for _ in 0..20 {
///     let index = FitnessProportionalSelection.draw(&population, &mut rng, &mut report);
///     assert_eq!(index, Some(1));
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FitnessProportionalSelection;

impl FitnessProportionalSelection {
    pub fn new() -> Self {
        Self
    }

    /// Draws one parent index.
    pub fn draw<G: Genotype>(
        &self,
        population: &Population<G>,
        rng: &mut dyn RandomSource,
        report: &mut SelectionReport,
    ) -> Option<usize> {
        let total: f64 = population.fitness().iter().sum();
        Self::draw_with_total(population.fitness(), total, rng, report)
    }

    fn draw_with_total(
        fitness: &[f64],
        total: f64,
        rng: &mut dyn RandomSource,
        report: &mut SelectionReport,
    ) -> Option<usize> {
        if total <= 0.0 {
            report.zero_fitness += 1;
            return Some(0);
        }

        let mut remaining = rng.uniform_real(0.0, total);
        for (index, &score) in fitness.iter().enumerate() {
            remaining -= score;
            if remaining < SCAN_EPSILON {
                return Some(index);
            }
        }

        trace!(remaining, "proportional scan ended without a pick");
        report.truncated_draws += 1;
        None
    }
}

impl<G: Genotype> SelectionStrategy<G> for FitnessProportionalSelection {
    fn select(
        &self,
        population: &Population<G>,
        crossover: &dyn Crossover<G>,
        crossover_rate: f64,
        rng: &mut dyn RandomSource,
        report: &mut SelectionReport,
    ) -> Result<Vec<G>> {
        let total: f64 = population.fitness().iter().sum();
        if total <= 0.0 {
            debug!("fitness sum is zero, every draw falls back to the first member");
        }
        let fitness = population.fitness();

        breed(
            population,
            crossover,
            crossover_rate,
            rng,
            report,
            |rng, report| Self::draw_with_total(fitness, total, rng, report),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossover::NoCrossover;
    use crate::rng::{RandomNumberGenerator, ScriptedRng};
    use crate::test_support::{index_of, tabled_population as population};

    #[test]
    fn test_scan_picks_first_member_below_residue() {
        let population = population(&[0.1, 0.4, 0.3, 0.2]);
        let mut report = SelectionReport::default();
        let picks: Vec<Option<usize>> = [0.05, 0.1, 0.49, 0.5, 0.79, 0.95]
            .iter()
            .map(|&r| {
                let mut rng = ScriptedRng::new(vec![], vec![r]);
                FitnessProportionalSelection.draw(&population, &mut rng, &mut report)
            })
            .collect();
        assert_eq!(
            picks,
            vec![Some(0), Some(0), Some(1), Some(1), Some(2), Some(3)]
        );
        assert!(!report.has_fallbacks());
    }

    #[test]
    fn test_zero_fitness_falls_back_to_first_member() {
        let population = population(&[0.0, 0.0, 0.0]);
        // Only the pairing draw after the second parent.
        let mut rng = ScriptedRng::new(vec![], vec![0.5]);
        let mut report = SelectionReport::default();

        let next = FitnessProportionalSelection
            .select(&population, &NoCrossover, 0.0, &mut rng, &mut report)
            .unwrap();

        assert_eq!(next.len(), 3);
        assert!(next.iter().all(|m| index_of(m) == 0));
        assert_eq!(report.zero_fitness, 2);
    }

    #[test]
    fn test_elite_leads_and_size_is_kept() {
        let population = population(&[0.2, 0.1, 0.9, 0.5, 0.3]);
        let mut rng = RandomNumberGenerator::from_seed(3);
        let mut report = SelectionReport::default();

        for _ in 0..20 {
            let next = FitnessProportionalSelection
                .select(&population, &NoCrossover, 0.0, &mut rng, &mut report)
                .unwrap();
            assert_eq!(next.len(), 5);
            assert_eq!(index_of(&next[0]), 2);
        }
    }

    #[test]
    fn test_uniform_fitness_draws_uniformly() {
        let population = population(&[1.0; 8]);
        let mut rng = RandomNumberGenerator::from_seed(11);
        let mut report = SelectionReport::default();
        let mut counts = [0usize; 8];
        let draws = 40_000;

        for _ in 0..draws {
            let index = FitnessProportionalSelection
                .draw(&population, &mut rng, &mut report)
                .unwrap();
            counts[index] += 1;
        }

        let expected = draws as f64 / 8.0;
        for count in counts {
            assert!(
                (count as f64 - expected).abs() < expected * 0.1,
                "{:?}",
                counts
            );
        }
    }

    #[test]
    fn test_proportions_follow_fitness() {
        let population = population(&[1.0, 3.0]);
        let mut rng = RandomNumberGenerator::from_seed(5);
        let mut report = SelectionReport::default();
        let draws = 20_000;
        let heavy = (0..draws)
            .filter(|_| {
                FitnessProportionalSelection.draw(&population, &mut rng, &mut report) == Some(1)
            })
            .count();
        let share = heavy as f64 / draws as f64;
        assert!((share - 0.75).abs() < 0.02, "share {}", share);
    }
}
