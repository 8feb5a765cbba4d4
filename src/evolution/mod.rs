pub mod challenge;
pub mod launcher;
pub mod options;
pub mod population;

pub use challenge::Challenge;
pub use launcher::EvolutionLauncher;
pub use options::{EvolutionOptions, LogLevel};
pub use population::{Individual, Population};
