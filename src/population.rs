//! # Population
//!
//! A [`Population`] owns a fixed number of genotypes together with their
//! fitness scores. Both vectors are index aligned and a population can only be
//! built by evaluating its members, so a score is never stale.

use tracing::trace;

use crate::{
    error::{GeneticError, Result},
    evolution::Challenge,
    genotype::Genotype,
};

/// Ordered members and their fitness, evaluated together.
#[derive(Debug, Clone)]
pub struct Population<G: Genotype> {
    members: Vec<G>,
    fitness: Vec<f64>,
}

impl<G: Genotype> Population<G> {
    /// Scores every member with `challenge`.
    ///
    /// # Errors
    ///
    /// - `EmptyPopulation` if `members` is empty.
    /// - `InvalidGenotype` if a member breaks its encoding invariant.
    /// - `InvalidNumericValue` if a score is NaN, infinite or negative.
    pub fn evaluate<C>(members: Vec<G>, challenge: &C) -> Result<Self>
    where
        C: Challenge<G> + ?Sized,
    {
        if members.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let mut fitness = Vec::with_capacity(members.len());
        for (index, member) in members.iter().enumerate() {
            if !member.is_valid() {
                return Err(GeneticError::InvalidGenotype(format!(
                    "member {} violates its encoding: {:?}",
                    index, member
                )));
            }

            let score = challenge.score(member);
            if !score.is_finite() || score < 0.0 {
                return Err(GeneticError::InvalidNumericValue(format!(
                    "member {} scored {}",
                    index, score
                )));
            }
            fitness.push(score);
        }

        trace!(size = members.len(), "population evaluated");
        Ok(Self { members, fitness })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[G] {
        &self.members
    }

    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    /// Index of the highest-fitness member; ties resolve to the first occurrence.
    pub fn elite_index(&self) -> usize {
        let mut best = 0;
        for (index, &score) in self.fitness.iter().enumerate().skip(1) {
            if score > self.fitness[best] {
                best = index;
            }
        }
        best
    }

    /// The highest-fitness member and its score.
    pub fn elite(&self) -> (&G, f64) {
        let index = self.elite_index();
        (&self.members[index], self.fitness[index])
    }

    pub fn min_fitness(&self) -> f64 {
        self.fitness.iter().cloned().fold(f64::INFINITY, f64::min)
    }

    pub fn max_fitness(&self) -> f64 {
        self.fitness[self.elite_index()]
    }

    pub fn mean_fitness(&self) -> f64 {
        self.fitness.iter().sum::<f64>() / self.fitness.len() as f64
    }

    /// Consumes the population, returning the members.
    pub fn into_members(self) -> Vec<G> {
        self.members
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genotype::BitString;

    struct OnesChallenge;

    impl Challenge<BitString> for OnesChallenge {
        fn score(&self, genotype: &BitString) -> f64 {
            genotype.count_ones() as f64
        }
    }

    struct NegativeChallenge;

    impl Challenge<BitString> for NegativeChallenge {
        fn score(&self, _genotype: &BitString) -> f64 {
            -1.0
        }
    }

    fn members() -> Vec<BitString> {
        vec![
            BitString::new(vec![true, false, false]),
            BitString::new(vec![true, true, false]),
            BitString::new(vec![false, true, true]),
            BitString::new(vec![false, false, false]),
        ]
    }

    #[test]
    fn test_evaluate_aligns_fitness() {
        let population = Population::evaluate(members(), &OnesChallenge).unwrap();
        assert_eq!(population.len(), 4);
        assert_eq!(population.fitness(), &[1.0, 2.0, 2.0, 0.0]);
    }

    #[test]
    fn test_elite_ties_pick_first() {
        let population = Population::evaluate(members(), &OnesChallenge).unwrap();
        assert_eq!(population.elite_index(), 1);
        let (elite, score) = population.elite();
        assert_eq!(elite.bits(), &[true, true, false]);
        assert_eq!(score, 2.0);
    }

    #[test]
    fn test_statistics() {
        let population = Population::evaluate(members(), &OnesChallenge).unwrap();
        assert_eq!(population.min_fitness(), 0.0);
        assert_eq!(population.max_fitness(), 2.0);
        assert!((population.mean_fitness() - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_negative_scores() {
        let result = Population::evaluate(members(), &NegativeChallenge);
        assert!(matches!(result, Err(GeneticError::InvalidNumericValue(_))));
    }

    #[test]
    fn test_rejects_empty() {
        let result = Population::<BitString>::evaluate(Vec::new(), &OnesChallenge);
        assert!(matches!(result, Err(GeneticError::EmptyPopulation)));
    }
}
