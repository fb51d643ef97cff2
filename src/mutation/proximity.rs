//! # Proximity mutation
//!
//! For each route position picked with probability `rate`, the city at that
//! position and its successor (city 0 at the end of the route) form a pair of
//! neighbours. Every other city is ranked by its summed distance to both
//! neighbours, a rank is drawn with geometrically decreasing probability
//! (1/2 for the nearest, 1/4 for the next, ...) and the chosen city is swapped
//! into the successor's slot. At the end of the route the chosen city takes
//! the current slot instead.
//!
//! The rank draw stops after `rank_limit` halvings. The default limit is
//! `len - 3`: with both neighbours on the route there are `len - 2`
//! candidates, so the deepest rank is always addressable. Ranks past the
//! candidate list are clamped.

use std::{cmp::Ordering, sync::Arc};

use tracing::trace;

use super::Mutation;
use crate::{genotype::Route, rng::RandomSource, tsp::TspInstance};

/// Distance-weighted swap mutation for routes.
#[derive(Debug, Clone)]
pub struct ProximityMutation {
    instance: Arc<TspInstance>,
    rank_limit: Option<usize>,
}

impl ProximityMutation {
    pub fn new(instance: Arc<TspInstance>) -> Self {
        Self {
            instance,
            rank_limit: None,
        }
    }

    /// Overrides the `len - 3` cap on rank halvings.
    pub fn with_rank_limit(mut self, limit: usize) -> Self {
        self.rank_limit = Some(limit);
        self
    }

    pub fn rank_limit(&self, route_len: usize) -> usize {
        self.rank_limit.unwrap_or_else(|| route_len.saturating_sub(3))
    }

    /// Draws a candidate rank by repeatedly halving the remaining probability mass.
    pub fn draw_rank(&self, route_len: usize, rng: &mut dyn RandomSource) -> usize {
        let limit = self.rank_limit(route_len);
        let mut partition = 0.5;
        let mut remaining = rng.uniform_real(0.0, 1.0) - partition;
        let mut rank = 0;
        while remaining > 0.0 && rank < limit {
            partition /= 2.0;
            remaining -= partition;
            rank += 1;
        }
        rank
    }

    /// Route cities other than `left` and `right`, nearest to both first.
    ///
    /// Ties keep ascending city order.
    pub fn candidates(&self, route: &Route, left: usize, right: usize) -> Vec<usize> {
        let cities = self.instance.cities();
        let (Some(left_point), Some(right_point)) = (cities.get(left), cities.get(right)) else {
            return Vec::new();
        };

        let mut ranked: Vec<(f64, usize)> = (1..=route.cities().len())
            .filter(|&city| city != left && city != right)
            .filter_map(|city| {
                cities
                    .get(city)
                    .map(|point| (left_point.distance(point) + right_point.distance(point), city))
            })
            .collect();
        ranked.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
        ranked.into_iter().map(|(_, city)| city).collect()
    }
}

impl Mutation<Route> for ProximityMutation {
    fn mutate(&self, genotype: &mut Route, rate: f64, rng: &mut dyn RandomSource) -> usize {
        let len = genotype.cities().len();
        let mut swaps = 0;

        for i in 0..len {
            if rng.uniform_real(0.0, 1.0) >= rate {
                continue;
            }

            let left = genotype.cities()[i];
            let at_end = i + 1 == len;
            let right = if at_end { 0 } else { genotype.cities()[i + 1] };

            let rank = self.draw_rank(len, rng);
            let candidates = self.candidates(genotype, left, right);
            let Some(&city) = candidates.get(rank).or_else(|| candidates.last()) else {
                continue;
            };
            if rank >= candidates.len() {
                trace!(rank, candidates = candidates.len(), "clamping proximity rank");
            }

            let Some(from) = genotype.position(city) else {
                continue;
            };
            let to = if at_end { i } else { i + 1 };
            genotype.cities_mut().swap(from, to);
            swaps += 1;
        }

        swaps
    }
}
