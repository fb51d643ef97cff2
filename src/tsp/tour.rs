use std::sync::Arc;

use super::{instance::fitness_of_length, TspInstance};
use crate::{evolution::Challenge, genotype::Route};

/// Scores a route as the inverse of its closed tour length.
///
/// A tour whose legs all round to zero scores as a tour of length 1. A route
/// naming a city the instance does not have scores NaN, which the engine
/// reports as an invalid fitness value.
#[derive(Debug, Clone)]
pub struct TourLength {
    instance: Arc<TspInstance>,
}

impl TourLength {
    pub fn new(instance: Arc<TspInstance>) -> Self {
        Self { instance }
    }

    pub fn instance(&self) -> &TspInstance {
        &self.instance
    }
}

impl Challenge<Route> for TourLength {
    fn score(&self, genotype: &Route) -> f64 {
        self.instance
            .tour_length(genotype)
            .map_or(f64::NAN, fitness_of_length)
    }
}
