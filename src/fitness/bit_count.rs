use crate::{
    evolution::Challenge,
    genotype::{BitString, Genotype},
};

/// Fraction of set bits, in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitCount;

impl Challenge<BitString> for BitCount {
    fn score(&self, genotype: &BitString) -> f64 {
        if genotype.is_empty() {
            return 0.0;
        }
        genotype.count_ones() as f64 / genotype.len() as f64
    }
}
