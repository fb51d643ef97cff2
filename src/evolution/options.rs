//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct holds the run configuration of a generational
//! search: population size, mutation and crossover rates, the generation
//! ceiling, an optional target fitness and how much progress gets logged.
//!
//! ## Example
//!
//! ```rust
//! use genroute::evolution::options::{EvolutionOptions, LogLevel};
//!
//! // Create a new EvolutionOptions instance with custom parameters
//! let custom_options = EvolutionOptions::new(60, 0.02, 0.8, 5_000);
//! assert!(custom_options.validate().is_ok());
//!
//! // Create a new EvolutionOptions instance with default parameters
//! let default_options = EvolutionOptions::default();
//! assert_eq!(default_options.get_log_level(), &LogLevel::None);
//! ```
//!
//! ## Structs
//!
//! ### `EvolutionOptions`
//!
//! #### Fields
//!
//! - `population_size`: Number of members, fixed for the whole run.
//! - `mutation_rate`: Per-gene mutation probability.
//! - `crossover_rate`: Probability that a parent pair is crossed.
//! - `max_generations`: Generation ceiling.
//! - `target_fitness`: Stop once the best fitness reaches this value.
//! - `log_level`: How much progress the launcher reports.
//! - `report_interval`: Generations between `Minimal` progress reports.
//!
//! ### `LogLevel`
//!
//! - `Verbose`: Reports every generation, including the elite.
//! - `Minimal`: Reports every `report_interval` generations.
//! - `None`: Only start and end of a run.

use crate::error::{GeneticError, Result};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Verbose,
    Minimal,
    None,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    population_size: usize,
    mutation_rate: f64,
    crossover_rate: f64,
    max_generations: usize,
    target_fitness: Option<f64>,
    log_level: LogLevel,
    report_interval: usize,
}

impl EvolutionOptions {
    pub fn new(
        population_size: usize,
        mutation_rate: f64,
        crossover_rate: f64,
        max_generations: usize,
    ) -> Self {
        Self {
            population_size,
            mutation_rate,
            crossover_rate,
            max_generations,
            ..Self::default()
        }
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn get_crossover_rate(&self) -> f64 {
        self.crossover_rate
    }

    pub fn get_max_generations(&self) -> usize {
        self.max_generations
    }

    pub fn get_target_fitness(&self) -> Option<f64> {
        self.target_fitness
    }

    pub fn get_log_level(&self) -> &LogLevel {
        &self.log_level
    }

    pub fn get_report_interval(&self) -> usize {
        self.report_interval
    }

    /// Sets the population size.
    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    /// Sets the mutation rate.
    pub fn set_mutation_rate(&mut self, mutation_rate: f64) {
        self.mutation_rate = mutation_rate;
    }

    /// Sets the crossover rate.
    pub fn set_crossover_rate(&mut self, crossover_rate: f64) {
        self.crossover_rate = crossover_rate;
    }

    /// Sets the generation ceiling.
    pub fn set_max_generations(&mut self, max_generations: usize) {
        self.max_generations = max_generations;
    }

    /// Sets or clears the target fitness.
    pub fn set_target_fitness(&mut self, target_fitness: Option<f64>) {
        self.target_fitness = target_fitness;
    }

    /// Sets the log level.
    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    /// Sets the report interval.
    pub fn set_report_interval(&mut self, report_interval: usize) {
        self.report_interval = report_interval;
    }

    /// Checks the options before a run starts.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if the population has fewer than
    /// two members, a rate lies outside `[0, 1]`, the report interval is zero
    /// or the target fitness is not finite.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(GeneticError::Configuration(format!(
                "population size must be at least 2, got {}",
                self.population_size
            )));
        }
        for (name, rate) in [
            ("mutation rate", self.mutation_rate),
            ("crossover rate", self.crossover_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(GeneticError::Configuration(format!(
                    "{} must be in [0, 1], got {}",
                    name, rate
                )));
            }
        }
        if self.report_interval == 0 {
            return Err(GeneticError::Configuration(
                "report interval must be positive".to_string(),
            ));
        }
        if let Some(target) = self.target_fitness {
            if !target.is_finite() {
                return Err(GeneticError::Configuration(format!(
                    "target fitness must be finite, got {}",
                    target
                )));
            }
        }
        Ok(())
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    ///
    /// # Example
    ///
    /// ```rust
    /// use genroute::evolution::options::{EvolutionOptions, LogLevel};
    ///
    /// let options = EvolutionOptions::builder()
    ///     .population_size(50)
    ///     .mutation_rate(0.01)
    ///     .crossover_rate(0.9)
    ///     .max_generations(2_000)
    ///     .target_fitness(1.0)
    ///     .log_level(LogLevel::Minimal)
    ///     .report_interval(100)
    ///     .build();
    ///
    /// assert_eq!(options.get_target_fitness(), Some(1.0));
    /// ```
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            population_size: 100,
            mutation_rate: 0.01,
            crossover_rate: 0.7,
            max_generations: 50_000,
            target_fitness: None,
            log_level: LogLevel::None,
            report_interval: 2_000,
        }
    }
}

/// Builder for `EvolutionOptions`.
///
/// Unset fields take the values of [`EvolutionOptions::default`].
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    population_size: Option<usize>,
    mutation_rate: Option<f64>,
    crossover_rate: Option<f64>,
    max_generations: Option<usize>,
    target_fitness: Option<f64>,
    log_level: Option<LogLevel>,
    report_interval: Option<usize>,
}

impl EvolutionOptionsBuilder {
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn mutation_rate(mut self, value: f64) -> Self {
        self.mutation_rate = Some(value);
        self
    }

    pub fn crossover_rate(mut self, value: f64) -> Self {
        self.crossover_rate = Some(value);
        self
    }

    pub fn max_generations(mut self, value: usize) -> Self {
        self.max_generations = Some(value);
        self
    }

    pub fn target_fitness(mut self, value: f64) -> Self {
        self.target_fitness = Some(value);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    pub fn report_interval(mut self, value: usize) -> Self {
        self.report_interval = Some(value);
        self
    }

    /// Builds the `EvolutionOptions` instance.
    pub fn build(self) -> EvolutionOptions {
        let defaults = EvolutionOptions::default();
        EvolutionOptions {
            population_size: self.population_size.unwrap_or(defaults.population_size),
            mutation_rate: self.mutation_rate.unwrap_or(defaults.mutation_rate),
            crossover_rate: self.crossover_rate.unwrap_or(defaults.crossover_rate),
            max_generations: self.max_generations.unwrap_or(defaults.max_generations),
            target_fitness: self.target_fitness.or(defaults.target_fitness),
            log_level: self.log_level.unwrap_or(defaults.log_level),
            report_interval: self.report_interval.unwrap_or(defaults.report_interval),
        }
    }
}
