//! Per-generation statistics and their averages over independent trials.

use crate::genotype::Genotype;
use crate::population::Population;

/// Fitness summary of one generation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    pub generation: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Cumulative evaluations up to and including this generation.
    pub evaluations: usize,
}

impl GenerationStats {
    pub fn from_population<G: Genotype>(
        population: &Population<G>,
        generation: usize,
        evaluations: usize,
    ) -> Self {
        Self {
            generation,
            min: population.min_fitness(),
            max: population.max_fitness(),
            mean: population.mean_fitness(),
            evaluations,
        }
    }
}

/// Generation statistics averaged over the trials that reached that generation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AveragedStats {
    pub generation: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub evaluations: f64,
    /// Number of trials that contributed.
    pub trials: usize,
}

#[derive(Debug, Clone, Copy, Default)]
struct Sums {
    min: f64,
    max: f64,
    mean: f64,
    evaluations: f64,
    hits: usize,
}

/// Folds the histories of independent trials into per-generation averages.
///
/// Trials stop at different generations. Each generation is averaged only
/// over the trials that reached it.
///
/// ```
/// use genroute::evolution::{GenerationStats, TrialAccumulator};
///
/// let stats = |generation, max| GenerationStats {
///     generation,
///     min: 0.0,
///     max,
///     mean: max / 2.0,
///     evaluations: (generation + 1) * 10,
/// };
///
/// let mut accumulator = TrialAccumulator::new();
/// accumulator.add_history(&[stats(0, 0.2), stats(1, 0.4)]);
/// accumulator.add_history(&[stats(0, 0.6)]);
///
/// let averages = accumulator.averages();
/// assert_eq!(averages.len(), 2);
/// assert!((averages[0].max - 0.4).abs() < 1e-12);
/// assert_eq!(averages[1].trials, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TrialAccumulator {
    sums: Vec<Sums>,
    trials: usize,
}

impl TrialAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one trial's history, indexed by each entry's generation.
    pub fn add_history(&mut self, history: &[GenerationStats]) {
        for stats in history {
            if self.sums.len() <= stats.generation {
                self.sums.resize(stats.generation + 1, Sums::default());
            }
            let sums = &mut self.sums[stats.generation];
            sums.min += stats.min;
            sums.max += stats.max;
            sums.mean += stats.mean;
            sums.evaluations += stats.evaluations as f64;
            sums.hits += 1;
        }
        self.trials += 1;
    }

    /// Number of histories added.
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Averages for every generation reached by at least one trial.
    pub fn averages(&self) -> Vec<AveragedStats> {
        self.sums
            .iter()
            .enumerate()
            .filter(|(_, sums)| sums.hits > 0)
            .map(|(generation, sums)| {
                let hits = sums.hits as f64;
                AveragedStats {
                    generation,
                    min: sums.min / hits,
                    max: sums.max / hits,
                    mean: sums.mean / hits,
                    evaluations: sums.evaluations / hits,
                    trials: sums.hits,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::tabled_population;

    #[test]
    fn test_stats_from_population() {
        let population = tabled_population(&[0.1, 0.4, 0.3, 0.2]);
        let stats = GenerationStats::from_population(&population, 3, 16);
        assert_eq!(stats.generation, 3);
        assert_eq!(stats.min, 0.1);
        assert_eq!(stats.max, 0.4);
        assert!((stats.mean - 0.25).abs() < 1e-12);
        assert_eq!(stats.evaluations, 16);
    }

    #[test]
    fn test_uneven_histories_average_per_generation() {
        let entry = |generation: usize, value: f64| GenerationStats {
            generation,
            min: value,
            max: value,
            mean: value,
            evaluations: 4 * (generation + 1),
        };
        let mut accumulator = TrialAccumulator::new();
        accumulator.add_history(&[entry(0, 1.0), entry(1, 2.0), entry(2, 3.0)]);
        accumulator.add_history(&[entry(0, 3.0)]);
        accumulator.add_history(&[entry(0, 2.0), entry(1, 4.0)]);

        let averages = accumulator.averages();
        assert_eq!(accumulator.trials(), 3);
        assert_eq!(averages.len(), 3);
        assert_eq!(averages[0].max, 2.0);
        assert_eq!(averages[0].trials, 3);
        assert_eq!(averages[1].mean, 3.0);
        assert_eq!(averages[1].evaluations, 8.0);
        assert_eq!(averages[2].trials, 1);
    }

    #[test]
    fn test_empty_accumulator() {
        assert!(TrialAccumulator::new().averages().is_empty());
    }
}
