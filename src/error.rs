//! # Error Types
//!
//! This module defines the error type shared by the whole crate. Configuration
//! problems, malformed problem instances, broken genotypes and invalid fitness
//! values each have their own variant so callers can tell a bad setup apart
//! from a defect in an operator.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use genroute::error::{GeneticError, Result};
//!
//! fn check_rate(rate: f64) -> Result<f64> {
//!     if !(0.0..=1.0).contains(&rate) {
//!         return Err(GeneticError::Configuration(format!("rate {} out of range", rate)));
//!     }
//!     Ok(rate)
//! }
//!
//! assert!(check_rate(0.5).is_ok());
//! assert!(check_rate(1.5).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use genroute::error::{GeneticError, OptionExt};
//!
//! fn best_score(scores: &[f64]) -> genroute::error::Result<f64> {
//!     scores
//!         .iter()
//!         .cloned()
//!         .fold(None, |best: Option<f64>, s| Some(best.map_or(s, |b| b.max(s))))
//!         .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
//! }
//!
//! assert_eq!(best_score(&[0.2, 0.7]).unwrap(), 0.7);
//! assert!(best_score(&[]).is_err());
//! ```

use thiserror::Error;

/// Represents errors that can occur while configuring or running an evolution.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// A genotype no longer satisfies its encoding invariant, e.g. a route
    /// with a duplicated or missing city. This always indicates a defect in
    /// an operator.
    #[error("Invalid genotype: {0}")]
    InvalidGenotype(String),

    /// Error that occurs when a problem instance or tour file is malformed.
    #[error("Invalid problem instance: {0}")]
    InvalidInstance(String),

    /// Error that occurs when NaN, infinite or negative fitness values are encountered.
    #[error("Invalid numeric value: {0}")]
    InvalidNumericValue(String),

    /// Error that occurs when an I/O operation fails.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for genetic algorithm operations.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using
    /// a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_ext_builds_error_lazily() {
        assert_eq!(Some(3).ok_or_else_genetic(|| GeneticError::EmptyPopulation).unwrap(), 3);
        let none: Option<usize> = None;
        assert!(matches!(
            none.ok_or_else_genetic(|| GeneticError::EmptyPopulation),
            Err(GeneticError::EmptyPopulation)
        ));
    }

    #[test]
    fn test_io_error_converts() {
        fn read() -> Result<String> {
            Ok(std::fs::read_to_string("/definitely/not/here")?)
        }
        assert!(matches!(read(), Err(GeneticError::Io(_))));
    }

    #[test]
    fn test_display() {
        let err = GeneticError::InvalidGenotype("city 3 appears twice".to_string());
        assert_eq!(err.to_string(), "Invalid genotype: city 3 appears twice");
    }
}
