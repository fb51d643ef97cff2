pub mod rank;
pub mod roulette;
pub mod selection_strategy;

pub use rank::RankProportionalSelection;
pub use roulette::FitnessProportionalSelection;
pub use selection_strategy::{SelectionReport, SelectionStrategy};
