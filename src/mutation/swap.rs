use super::Mutation;
use crate::{
    genotype::{BitString, Route},
    rng::RandomSource,
};

/// Swaps each gene, with probability `rate`, with a uniformly chosen other position.
///
/// Swapping keeps every encoding valid, so it works for routes and bit strings alike.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwapMutation;

fn swap_positions<T>(genes: &mut [T], rate: f64, rng: &mut dyn RandomSource) -> usize {
    let len = genes.len();
    let mut swaps = 0;
    for i in 0..len {
        if rng.uniform_real(0.0, 1.0) >= rate || len < 2 {
            continue;
        }
        let mut j = rng.uniform_int(0, len - 2);
        if j >= i {
            j += 1;
        }
        genes.swap(i, j);
        swaps += 1;
    }
    swaps
}

impl Mutation<Route> for SwapMutation {
    fn mutate(&self, genotype: &mut Route, rate: f64, rng: &mut dyn RandomSource) -> usize {
        swap_positions(genotype.cities_mut(), rate, rng)
    }
}

impl Mutation<BitString> for SwapMutation {
    fn mutate(&self, genotype: &mut BitString, rate: f64, rng: &mut dyn RandomSource) -> usize {
        swap_positions(genotype.bits_mut(), rate, rng)
    }
}

/// Flips each bit with probability `rate`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitFlipMutation;

impl Mutation<BitString> for BitFlipMutation {
    fn mutate(&self, genotype: &mut BitString, rate: f64, rng: &mut dyn RandomSource) -> usize {
        let mut flips = 0;
        for bit in genotype.bits_mut() {
            if rng.uniform_real(0.0, 1.0) < rate {
                *bit = !*bit;
                flips += 1;
            }
        }
        flips
    }
}
