//! # Analytic test functions
//!
//! Classic real-valued benchmark functions driven through bit strings. A
//! [`FixedPointDecoder`] turns consecutive groups of bits into signed
//! fixed-point numbers: the first bit of a group is the sign, the remaining
//! bits are the magnitude (most significant first) divided by a per-problem
//! divisor.
//!
//! The functions are minimized with optimum 0. [`AnalyticChallenge`] rescales
//! them linearly against the function's worst value on the decodable box, so
//! scores land in `[0, 1]` with 1 at the optimum.
//!
//! ## Example
//!
//! ```rust
//! use genroute::evolution::Challenge;
//! use genroute::fitness::{AnalyticChallenge, FixedPointDecoder, Sphere};
//! use genroute::genotype::BitString;
//!
//! let decoder = FixedPointDecoder::new(8, 32.0).unwrap();
//! let challenge = AnalyticChallenge::new(Sphere, decoder, 2).unwrap();
//!
//! // Both values decode to +0.0, the optimum.
//! let origin = BitString::new(vec![false; 16]);
//! assert_eq!(challenge.score(&origin), 1.0);
//! ```

use std::f64::consts::PI;
use std::fmt::Debug;

use crate::{
    error::{GeneticError, Result},
    evolution::Challenge,
    genotype::{BitString, Genotype},
};

/// A real-valued function minimized at 0.
pub trait TestFunction: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn evaluate(&self, x: &[f64]) -> f64;

    /// Largest value (or an upper bound of it) over `[-bound, bound]^dimension`.
    fn worst_case(&self, bound: f64, dimension: usize) -> f64;
}

/// f(x) = Σxᵢ²
#[derive(Debug, Clone, Copy, Default)]
pub struct Sphere;

impl TestFunction for Sphere {
    fn name(&self) -> &'static str {
        "Sphere"
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        x.iter().map(|xi| xi * xi).sum()
    }

    fn worst_case(&self, bound: f64, dimension: usize) -> f64 {
        dimension as f64 * bound * bound
    }
}

/// f(x) = Σ[100(xᵢ₊₁ − xᵢ²)² + (1 − xᵢ)²]
#[derive(Debug, Clone, Copy, Default)]
pub struct Rosenbrock;

impl TestFunction for Rosenbrock {
    fn name(&self) -> &'static str {
        "Rosenbrock"
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        x.windows(2)
            .map(|w| 100.0 * (w[1] - w[0] * w[0]).powi(2) + (1.0 - w[0]).powi(2))
            .sum()
    }

    // Every term peaks at xᵢ = xᵢ₊₁ = -bound.
    fn worst_case(&self, bound: f64, dimension: usize) -> f64 {
        let term = 100.0 * (bound * bound + bound).powi(2) + (1.0 + bound).powi(2);
        dimension.saturating_sub(1) as f64 * term
    }
}

/// f(x) = 10n + Σ(xᵢ² − 10cos(2πxᵢ))
#[derive(Debug, Clone, Copy, Default)]
pub struct Rastrigin;

impl TestFunction for Rastrigin {
    fn name(&self) -> &'static str {
        "Rastrigin"
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        10.0 * x.len() as f64
            + x.iter()
                .map(|xi| xi * xi - 10.0 * (2.0 * PI * xi).cos())
                .sum::<f64>()
    }

    fn worst_case(&self, bound: f64, dimension: usize) -> f64 {
        dimension as f64 * (20.0 + bound * bound)
    }
}

/// Decodes groups of bits into signed fixed-point values.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPointDecoder {
    bits_per_value: usize,
    divisor: f64,
}

impl FixedPointDecoder {
    /// # Errors
    ///
    /// Returns `Configuration` unless there is a sign bit plus at least one
    /// magnitude bit (at most 53, the exact range of `f64`) and the divisor is
    /// positive and finite.
    pub fn new(bits_per_value: usize, divisor: f64) -> Result<Self> {
        if !(2..=54).contains(&bits_per_value) {
            return Err(GeneticError::Configuration(format!(
                "bits per value must be in [2, 54], got {}",
                bits_per_value
            )));
        }
        if !divisor.is_finite() || divisor <= 0.0 {
            return Err(GeneticError::Configuration(format!(
                "divisor must be positive and finite, got {}",
                divisor
            )));
        }
        Ok(Self {
            bits_per_value,
            divisor,
        })
    }

    pub fn bits_per_value(&self) -> usize {
        self.bits_per_value
    }

    /// Largest decodable magnitude.
    pub fn max_magnitude(&self) -> f64 {
        ((1u64 << (self.bits_per_value - 1)) - 1) as f64 / self.divisor
    }

    /// Bit-string length needed for `dimension` values.
    pub fn genotype_len(&self, dimension: usize) -> usize {
        self.bits_per_value * dimension
    }

    /// Decodes every complete group of bits; trailing bits are ignored.
    pub fn decode(&self, bits: &[bool]) -> Vec<f64> {
        bits.chunks_exact(self.bits_per_value)
            .map(|group| {
                let magnitude = group[1..]
                    .iter()
                    .fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit));
                let value = magnitude as f64 / self.divisor;
                if group[0] {
                    -value
                } else {
                    value
                }
            })
            .collect()
    }
}

/// Scores bit strings by a decoded [`TestFunction`], rescaled to `[0, 1]`.
#[derive(Debug, Clone)]
pub struct AnalyticChallenge<F: TestFunction> {
    function: F,
    decoder: FixedPointDecoder,
    dimension: usize,
    worst: f64,
}

impl<F: TestFunction> AnalyticChallenge<F> {
    /// # Errors
    ///
    /// Returns `Configuration` if the dimension is zero or the function has no
    /// positive worst case on the decodable box (e.g. Rosenbrock in one dimension).
    pub fn new(function: F, decoder: FixedPointDecoder, dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(GeneticError::Configuration(
                "analytic challenge needs at least one dimension".to_string(),
            ));
        }
        let worst = function.worst_case(decoder.max_magnitude(), dimension);
        if !worst.is_finite() || worst <= 0.0 {
            return Err(GeneticError::Configuration(format!(
                "{} has no usable worst case ({}) for dimension {}",
                function.name(),
                worst,
                dimension
            )));
        }
        Ok(Self {
            function,
            decoder,
            dimension,
            worst,
        })
    }

    pub fn function(&self) -> &F {
        &self.function
    }

    pub fn decoder(&self) -> &FixedPointDecoder {
        &self.decoder
    }

    /// Bit-string length this challenge expects.
    pub fn genotype_len(&self) -> usize {
        self.decoder.genotype_len(self.dimension)
    }

    /// The raw function value of a genotype.
    pub fn raw_value(&self, genotype: &BitString) -> f64 {
        self.function.evaluate(&self.decoder.decode(genotype.bits()))
    }
}

impl<F: TestFunction> Challenge<BitString> for AnalyticChallenge<F> {
    /// Strings of the wrong length score NaN, which the engine rejects.
    fn score(&self, genotype: &BitString) -> f64 {
        if genotype.len() != self.genotype_len() {
            return f64::NAN;
        }
        (1.0 - self.raw_value(genotype) / self.worst).clamp(0.0, 1.0)
    }
}
