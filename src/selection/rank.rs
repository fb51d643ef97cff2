use std::cmp::Ordering;

use tracing::warn;

use crate::crossover::Crossover;
use crate::error::Result;
use crate::genotype::Genotype;
use crate::population::Population;
use crate::rng::RandomSource;
use crate::selection::selection_strategy::{breed, SelectionReport, SelectionStrategy};

/// Linear rank selection.
///
/// Members are ranked by fitness, best first, with ties keeping population
/// order. With `n` members the best rank carries weight `n`, the next `n - 1`,
/// down to 1 for the worst, so rank `k` is drawn with probability
/// `(n - k) / (n(n + 1)/2)`. Only the order of the fitness values matters,
/// which keeps a single outstanding member from taking over the population.
///
/// # Examples
///
/// ```
/// use genroute::evolution::Challenge;
/// use genroute::genotype::BitString;
/// use genroute::population::Population;
/// use genroute::selection::RankProportionalSelection;
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
///
/// assert_eq!(RankProportionalSelection::ranking(population.fitness()), vec![1, 0, 2]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RankProportionalSelection;

impl RankProportionalSelection {
    pub fn new() -> Self {
        Self
    }

    /// Member indices ordered by descending fitness.
    pub fn ranking(fitness: &[f64]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..fitness.len()).collect();
        order.sort_by(|&a, &b| {
            fitness[b]
                .partial_cmp(&fitness[a])
                .unwrap_or(Ordering::Equal)
        });
        order
    }

    /// Draws one parent index from a precomputed ranking.
    pub fn draw(
        &self,
        ranking: &[usize],
        rng: &mut dyn RandomSource,
        report: &mut SelectionReport,
    ) -> usize {
        let n = ranking.len();
        let rank_sum = n * (n + 1) / 2;
        let mut offset = rng.uniform_int(1, rank_sum);

        let mut rank = 0;
        while rank < n && offset > n - rank {
            offset -= n - rank;
            rank += 1;
        }

        match ranking.get(rank) {
            Some(&index) => index,
            None => {
                warn!(rank, members = n, "rank walk ran past the last rank");
                report.rank_overruns += 1;
                0
            }
        }
    }
}

impl<G: Genotype> SelectionStrategy<G> for RankProportionalSelection {
    fn select(
        &self,
        population: &Population<G>,
        crossover: &dyn Crossover<G>,
        crossover_rate: f64,
        rng: &mut dyn RandomSource,
        report: &mut SelectionReport,
    ) -> Result<Vec<G>> {
        let ranking = Self::ranking(population.fitness());

        breed(
            population,
            crossover,
            crossover_rate,
            rng,
            report,
            |rng, report| Some(self.draw(&ranking, rng, report)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossover::NoCrossover;
    use crate::rng::{RandomNumberGenerator, ScriptedRng};
    use crate::test_support::{index_of, tabled_population};

    #[test]
    fn test_ranking_is_stable() {
        let ranking = RankProportionalSelection::ranking(&[0.3, 0.9, 0.3, 0.1, 0.9]);
        assert_eq!(ranking, vec![1, 4, 0, 2, 3]);
    }

    #[test]
    fn test_offsets_map_to_ranks() {
        // Four members: weights 4, 3, 2, 1 over offsets 1..=10.
        let ranking = vec![2, 0, 3, 1];
        let mut report = SelectionReport::default();
        let picks: Vec<usize> = (1..=10)
            .map(|offset| {
                let mut rng = ScriptedRng::new(vec![offset], vec![]);
                RankProportionalSelection.draw(&ranking, &mut rng, &mut report)
            })
            .collect();
        assert_eq!(picks, vec![2, 2, 2, 2, 0, 0, 0, 3, 3, 1]);
        assert_eq!(report.rank_overruns, 0);
    }

    #[test]
    fn test_rank_distribution() {
        let population = tabled_population(&[0.5, 0.1, 0.9, 0.3]);
        let ranking = RankProportionalSelection::ranking(population.fitness());
        let mut rng = RandomNumberGenerator::from_seed(17);
        let mut report = SelectionReport::default();
        let mut counts = [0usize; 4];
        let draws = 50_000;

        for _ in 0..draws {
            counts[RankProportionalSelection.draw(&ranking, &mut rng, &mut report)] += 1;
        }

        // Member 2 is best (4/10), then 0 (3/10), 3 (2/10) and 1 (1/10).
        let expected = [0.3, 0.1, 0.4, 0.2];
        for (count, share) in counts.iter().zip(expected) {
            let observed = *count as f64 / draws as f64;
            assert!((observed - share).abs() < 0.01, "{:?}", counts);
        }
    }

    #[test]
    fn test_select_keeps_elite_and_size() {
        let population = tabled_population(&[0.5, 0.1, 0.9, 0.3, 0.2, 0.8]);
        let mut rng = RandomNumberGenerator::from_seed(29);
        let mut report = SelectionReport::default();

        for _ in 0..10 {
            let next = RankProportionalSelection
                .select(&population, &NoCrossover, 0.5, &mut rng, &mut report)
                .unwrap();
            assert_eq!(next.len(), 6);
            assert_eq!(index_of(&next[0]), 2);
        }
        assert!(!report.has_fallbacks());
    }

    #[test]
    fn test_zero_fitness_is_ranked_like_any_other() {
        let population = tabled_population(&[0.0, 0.0, 0.0]);
        let mut rng = ScriptedRng::new(vec![6, 1], vec![0.9]);
        let mut report = SelectionReport::default();

        let next = RankProportionalSelection
            .select(&population, &NoCrossover, 0.5, &mut rng, &mut report)
            .unwrap();

        // All tied, so the ranking is population order.
        let picked: Vec<usize> = next.iter().map(index_of).collect();
        assert_eq!(picked, vec![0, 2, 0]);
        assert_eq!(report.zero_fitness, 0);
    }
}
