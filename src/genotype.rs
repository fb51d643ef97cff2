//! # Genotypes
//!
//! The `Genotype` trait describes the encoded representation of one candidate
//! solution. The engine only needs to clone genotypes, know their length,
//! create random ones and verify their encoding invariant; everything else
//! (crossover, mutation, scoring) lives in pluggable operators.
//!
//! Two encodings are provided:
//!
//! - [`BitString`]: a fixed-length boolean vector.
//! - [`Route`]: a permutation of the cities `1..=n` of an `n + 1` city tour.
//!   City 0 is the fixed start and end of every tour and is never stored.
//!
//! ## Example
//!
//! ```rust
//! use genroute::genotype::{Genotype, Route};
//! use genroute::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(3);
//! let route = Route::random(5, &mut rng);
//!
//! assert_eq!(route.len(), 5);
//! assert!(route.is_valid());
//! ```

use std::fmt::Debug;

use crate::rng::RandomSource;

/// Trait for types that encode an individual of the population.
///
/// Types implementing this trait must also implement `Clone`, `Debug`, `Send`,
/// and `Sync` so populations can be copied between generations and independent
/// trials can run on separate threads.
pub trait Genotype: Clone + Debug + Send + Sync {
    /// Number of genes.
    fn len(&self) -> usize;

    /// Returns `true` if the genotype has no genes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Creates a random genotype with `len` genes.
    fn random(len: usize, rng: &mut dyn RandomSource) -> Self;

    /// Checks the encoding invariant.
    ///
    /// Encodings without an invariant keep the default, which accepts
    /// everything.
    fn is_valid(&self) -> bool {
        true
    }
}

/// A fixed-length bit string.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BitString {
    bits: Vec<bool>,
}

impl BitString {
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn bits_mut(&mut self) -> &mut [bool] {
        &mut self.bits
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&bit| bit).count()
    }
}

impl From<Vec<bool>> for BitString {
    fn from(bits: Vec<bool>) -> Self {
        Self::new(bits)
    }
}

impl Genotype for BitString {
    fn len(&self) -> usize {
        self.bits.len()
    }

    fn random(len: usize, rng: &mut dyn RandomSource) -> Self {
        let bits = (0..len).map(|_| rng.uniform_int(0, 1) == 1).collect();
        Self { bits }
    }
}

/// A closed tour encoded as the visiting order of cities `1..=n`.
///
/// The tour implicitly starts and ends at city 0.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Route {
    cities: Vec<usize>,
}

impl Route {
    /// Wraps a visiting order without checking it.
    ///
    /// Use [`Route::try_new`] for input that is not known to be a permutation.
    pub fn new(cities: Vec<usize>) -> Self {
        Self { cities }
    }

    /// Wraps a visiting order, rejecting anything that is not a permutation
    /// of `1..=cities.len()`.
    pub fn try_new(cities: Vec<usize>) -> crate::error::Result<Self> {
        let route = Self { cities };
        if !route.is_permutation() {
            return Err(crate::error::GeneticError::InvalidGenotype(format!(
                "{:?} is not a permutation of 1..={}",
                route.cities,
                route.cities.len()
            )));
        }
        Ok(route)
    }

    /// The route visiting cities `1..=len` in index order.
    pub fn identity(len: usize) -> Self {
        Self {
            cities: (1..=len).collect(),
        }
    }

    /// A uniformly shuffled route over cities `1..=len` (Fisher–Yates).
    pub fn shuffled(len: usize, rng: &mut dyn RandomSource) -> Self {
        let mut route = Self::identity(len);
        for i in (1..len).rev() {
            let j = rng.uniform_int(0, i);
            route.cities.swap(i, j);
        }
        route
    }

    pub fn cities(&self) -> &[usize] {
        &self.cities
    }

    pub fn cities_mut(&mut self) -> &mut [usize] {
        &mut self.cities
    }

    /// Position of `city` in the route.
    pub fn position(&self, city: usize) -> Option<usize> {
        self.cities.iter().position(|&c| c == city)
    }

    /// Returns `true` if every city of `1..=len` appears exactly once.
    pub fn is_permutation(&self) -> bool {
        let n = self.cities.len();
        let mut seen = vec![false; n + 1];
        for &city in &self.cities {
            if city == 0 || city > n || seen[city] {
                return false;
            }
            seen[city] = true;
        }
        true
    }

    /// The full closed tour in 1-indexed city numbers, starting and ending at city 1.
    pub fn to_tour(&self) -> Vec<usize> {
        std::iter::once(1)
            .chain(self.cities.iter().map(|&c| c + 1))
            .chain(std::iter::once(1))
            .collect()
    }
}

impl From<Route> for Vec<usize> {
    fn from(route: Route) -> Self {
        route.cities
    }
}

impl Genotype for Route {
    fn len(&self) -> usize {
        self.cities.len()
    }

    fn random(len: usize, rng: &mut dyn RandomSource) -> Self {
        Self::shuffled(len, rng)
    }

    fn is_valid(&self) -> bool {
        self.is_permutation()
    }
}
