//! Fixtures shared by unit tests.

use crate::evolution::Challenge;
use crate::genotype::BitString;
use crate::population::Population;

/// Scores members by lookup; unknown members score 0.
pub(crate) struct Table(pub(crate) Vec<(BitString, f64)>);

impl Challenge<BitString> for Table {
    fn score(&self, genotype: &BitString) -> f64 {
        self.0
            .iter()
            .find(|(member, _)| member == genotype)
            .map_or(0.0, |(_, score)| *score)
    }
}

/// A 4-bit string spelling `tag` in binary, least significant bit first.
pub(crate) fn tagged(tag: usize) -> BitString {
    BitString::new((0..4).map(|bit| (tag >> bit) & 1 == 1).collect())
}

/// Recovers the tag of a [`tagged`] string.
pub(crate) fn index_of(member: &BitString) -> usize {
    member
        .bits()
        .iter()
        .enumerate()
        .filter(|&(_, &bit)| bit)
        .map(|(i, _)| 1 << i)
        .sum()
}

/// Member `i` is `tagged(i)` and scores `scores[i]`.
pub(crate) fn tabled_population(scores: &[f64]) -> Population<BitString> {
    let members: Vec<BitString> = (0..scores.len()).map(tagged).collect();
    let table = Table(members.iter().cloned().zip(scores.iter().copied()).collect());
    Population::evaluate(members, &table).unwrap()
}
