use crate::error::Result;
use crate::evolution::{EvolutionOptions, LogLevel};
use crate::local_search::AnnealingOptions;

/// Configuration of a full optimisation run: the genetic algorithm, the
/// annealing refinement, and an optional seed.
///
/// ```rust
/// use timetable_hybrid::evolution::EvolutionOptions;
/// use timetable_hybrid::hybrid::HybridOptions;
///
/// let options = HybridOptions::builder()
///     .evolution(EvolutionOptions::builder().num_generations(50).build())
///     .seed(42)
///     .build();
/// assert_eq!(options.seed(), Some(42));
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct HybridOptions {
    evolution: EvolutionOptions,
    annealing: AnnealingOptions,
    seed: Option<u64>,
}

impl HybridOptions {
    pub fn new(evolution: EvolutionOptions, annealing: AnnealingOptions) -> Self {
        Self {
            evolution,
            annealing,
            seed: None,
        }
    }

    pub fn evolution(&self) -> &EvolutionOptions {
        &self.evolution
    }

    pub fn annealing(&self) -> &AnnealingOptions {
        &self.annealing
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    /// Applies the same log level to both phases.
    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.evolution.set_log_level(log_level);
        self.annealing.set_log_level(log_level);
    }

    pub fn validate(&self) -> Result<()> {
        self.evolution.validate()?;
        self.annealing.validate()
    }

    pub fn builder() -> HybridOptionsBuilder {
        HybridOptionsBuilder::default()
    }
}

/// Builder for `HybridOptions`.
#[derive(Debug, Clone, Default)]
pub struct HybridOptionsBuilder {
    evolution: Option<EvolutionOptions>,
    annealing: Option<AnnealingOptions>,
    seed: Option<u64>,
    log_level: Option<LogLevel>,
}

impl HybridOptionsBuilder {
    pub fn evolution(mut self, value: EvolutionOptions) -> Self {
        self.evolution = Some(value);
        self
    }

    pub fn annealing(mut self, value: AnnealingOptions) -> Self {
        self.annealing = Some(value);
        self
    }

    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    /// Overrides the log level of both phases.
    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    pub fn build(self) -> HybridOptions {
        let mut options = HybridOptions {
            evolution: self.evolution.unwrap_or_default(),
            annealing: self.annealing.unwrap_or_default(),
            seed: self.seed,
        };
        if let Some(log_level) = self.log_level {
            options.set_log_level(log_level);
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_applies_to_both_phases() {
        let options = HybridOptions::builder().log_level(LogLevel::Minimal).build();
        assert_eq!(options.evolution().get_log_level(), LogLevel::Minimal);
        assert_eq!(options.annealing().get_log_level(), LogLevel::Minimal);
        assert_eq!(options.seed(), None);
    }

    #[test]
    fn test_validation_covers_both_phases() {
        let options = HybridOptions::builder()
            .evolution(EvolutionOptions::builder().population_size(2).build())
            .build();
        assert!(options.validate().is_err());

        let options = HybridOptions::builder()
            .annealing(AnnealingOptions::builder().cooling_ratio(1.5).build())
            .build();
        assert!(options.validate().is_err());
    }
}
