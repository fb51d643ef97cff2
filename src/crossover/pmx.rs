//! # Partially matched crossover
//!
//! For every position of a contiguous range the two parents exchange their
//! values. Each parent then repairs itself by moving the value it just lost to
//! the slot where the incoming value used to be, which amounts to a swap
//! inside each parent. Both parents therefore stay permutations of the same
//! cities.
//!
//! ## Example
//!
//! ```rust
//! use genroute::crossover::partially_matched;
//! use genroute::genotype::Route;
//!
//! let mut first = Route::new(vec![1, 2, 3, 4, 5]);
//! let mut second = Route::new(vec![3, 5, 1, 2, 4]);
//! let log = partially_matched(&mut first, &mut second, 1, 2).unwrap();
//!
//! assert_eq!(&first.cities()[1..=2], &[5, 1]);
//! assert_eq!(&second.cities()[1..=2], &[2, 3]);
//! assert!(first.is_permutation() && second.is_permutation());
//!
//! log.revert(&mut first, &mut second);
//! assert_eq!(first.cities(), &[1, 2, 3, 4, 5]);
//! assert_eq!(second.cities(), &[3, 5, 1, 2, 4]);
//! ```

use tracing::{trace, warn};

use super::Crossover;
use crate::{
    error::{GeneticError, Result},
    genotype::{Genotype, Route},
    rng::RandomSource,
};

/// Upper bound for drawing the crossover range.
///
/// The range is drawn as `begin` in `[0, B - 1]` and `end` in
/// `[begin + 1, B - 1]`. Bounding by the population size reproduces the
/// classic behaviour of this engine; it only matches the route length when
/// both happen to be equal, and indices past the route are clamped.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    PopulationSize(usize),
    GenotypeLength,
}

/// Partially matched crossover (PMX) for routes.
#[derive(Debug, Clone)]
pub struct PartiallyMatchedCrossover {
    bound: RangeBound,
}

impl PartiallyMatchedCrossover {
    pub fn new(bound: RangeBound) -> Self {
        Self { bound }
    }

    /// Draws ranges bounded by the population size.
    pub fn population_bounded(population_size: usize) -> Self {
        Self::new(RangeBound::PopulationSize(population_size))
    }

    /// Draws ranges bounded by the route length.
    pub fn genotype_bounded() -> Self {
        Self::new(RangeBound::GenotypeLength)
    }

    pub fn bound(&self) -> RangeBound {
        self.bound
    }

    /// Logs a warning when the range bound differs from the route length.
    pub fn check_bound(&self, genotype_len: usize) {
        if let RangeBound::PopulationSize(size) = self.bound {
            if size != genotype_len {
                warn!(
                    population_size = size,
                    genotype_len,
                    "crossover range is bounded by the population size, not the route length"
                );
            }
        }
    }

    /// Draws an inclusive `[begin, end]` range for routes of length `len`.
    pub fn draw_range(&self, len: usize, rng: &mut dyn RandomSource) -> (usize, usize) {
        let bound = match self.bound {
            RangeBound::PopulationSize(size) => size,
            RangeBound::GenotypeLength => len,
        }
        .max(1);

        let begin = rng.uniform_int(0, bound - 1);
        let end = if begin + 1 < bound {
            rng.uniform_int(begin + 1, bound - 1)
        } else {
            begin
        };

        let last = len.saturating_sub(1);
        if end > last {
            trace!(begin, end, last, "clamping crossover range to the route");
        }
        (begin.min(last), end.min(last))
    }
}

impl Crossover<Route> for PartiallyMatchedCrossover {
    fn crossover(
        &self,
        first: &mut Route,
        second: &mut Route,
        rng: &mut dyn RandomSource,
    ) -> Result<()> {
        if first.is_empty() {
            return Ok(());
        }
        let (begin, end) = self.draw_range(first.len(), rng);
        partially_matched(first, second, begin, end).map(|_| ())
    }
}

/// The swaps one PMX application made in each parent, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwapLog {
    first: Vec<(usize, usize)>,
    second: Vec<(usize, usize)>,
}

impl SwapLog {
    pub fn len(&self) -> usize {
        self.first.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    /// Undoes the crossover by replaying the swaps in reverse order.
    pub fn revert(&self, first: &mut Route, second: &mut Route) {
        for &(i, j) in self.first.iter().rev() {
            first.cities_mut().swap(i, j);
        }
        for &(i, j) in self.second.iter().rev() {
            second.cities_mut().swap(i, j);
        }
    }
}

/// Applies PMX over the inclusive range `[begin, end]`.
///
/// # Errors
///
/// Returns `InvalidGenotype` if the routes differ in length, the range does
/// not fit, or a value of one parent is missing from the other.
pub fn partially_matched(
    first: &mut Route,
    second: &mut Route,
    begin: usize,
    end: usize,
) -> Result<SwapLog> {
    if first.len() != second.len() {
        return Err(GeneticError::InvalidGenotype(format!(
            "cannot cross routes of length {} and {}",
            first.len(),
            second.len()
        )));
    }
    if begin > end || end >= first.len() {
        return Err(GeneticError::InvalidGenotype(format!(
            "crossover range [{}, {}] does not fit a route of length {}",
            begin,
            end,
            first.len()
        )));
    }

    // Incoming values are read from the parents as they were before any swap,
    // otherwise a later swap could undo a position already exchanged.
    let into_first = second.cities()[begin..=end].to_vec();
    let into_second = first.cities()[begin..=end].to_vec();

    let mut log = SwapLog::default();
    for (offset, i) in (begin..=end).enumerate() {
        let from_second = into_first[offset];
        let from_first = into_second[offset];

        let j = first.position(from_second).ok_or_else(|| {
            GeneticError::InvalidGenotype(format!("city {} missing from {:?}", from_second, first))
        })?;
        let k = second.position(from_first).ok_or_else(|| {
            GeneticError::InvalidGenotype(format!("city {} missing from {:?}", from_first, second))
        })?;

        first.cities_mut().swap(i, j);
        second.cities_mut().swap(i, k);
        log.first.push((i, j));
        log.second.push((i, k));
    }

    Ok(log)
}
