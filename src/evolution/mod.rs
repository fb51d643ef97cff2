pub mod builder;
pub mod challenge;
pub mod engine;
pub mod launcher;
pub mod options;
pub mod stats;

pub use builder::GenerationEngineBuilder;
pub use challenge::Challenge;
pub use engine::GenerationEngine;
pub use launcher::{EvolutionLauncher, EvolutionResult, TrialSummary};
pub use options::{EvolutionOptions, EvolutionOptionsBuilder, LogLevel};
pub use stats::{AveragedStats, GenerationStats, TrialAccumulator};
