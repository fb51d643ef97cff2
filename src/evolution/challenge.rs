use crate::genotype::Genotype;

/// Scores a genotype. Higher is better.
///
/// Scores must be finite and non-negative; the engine rejects anything else
/// with [`GeneticError::InvalidNumericValue`](crate::error::GeneticError::InvalidNumericValue).
pub trait Challenge<G: Genotype> {
    fn score(&self, genotype: &G) -> f64;
}
