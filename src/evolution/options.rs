//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct represents the configuration of the
//! steady-state genetic algorithm phase.
//!
//! ## Example
//!
//! ```rust
//! use timetable_hybrid::evolution::options::{EvolutionOptions, LogLevel};
//!
//! // Create a new EvolutionOptions instance with custom parameters
//! let options = EvolutionOptions::builder()
//!     .num_generations(200)
//!     .population_size(20)
//!     .log_level(LogLevel::Minimal)
//!     .build();
//! assert!(options.validate().is_ok());
//!
//! // Create a new EvolutionOptions instance with default parameters
//! let default_options = EvolutionOptions::default();
//! assert_eq!(default_options.get_population_size(), 10);
//! ```
//!
//! ## Fields
//!
//! - `num_generations`: Number of replace-worst-two steps.
//! - `population_size`: Number of candidates kept throughout the phase.
//! - `log_level`: How much progress is reported through `tracing`.
//! - `log_interval`: Generations between progress events at `Minimal` level.
//! - `parallel_threshold`: Minimum number of candidates evaluated in parallel.
//! - `tournament_size`: Individuals drawn per selection tournament.
//! - `max_attempts`: Cap on redraws in selection and mutation.

use crate::breeding::DEFAULT_MAX_ATTEMPTS;
use crate::error::{Result, TimetableError};

/// How much progress a phase reports.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Every step at `debug`, plus the periodic `info` events.
    Verbose,
    /// A periodic `info` event and a summary per phase.
    Minimal,
    /// Nothing.
    None,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct EvolutionOptions {
    num_generations: usize,
    population_size: usize,
    log_level: LogLevel,
    log_interval: usize,
    /// Minimum number of candidates to evaluate in parallel
    parallel_threshold: usize,
    tournament_size: usize,
    max_attempts: usize,
}

impl EvolutionOptions {
    pub fn new(num_generations: usize, log_level: LogLevel, population_size: usize) -> Self {
        Self {
            num_generations,
            log_level,
            population_size,
            ..Self::default()
        }
    }

    pub fn get_num_generations(&self) -> usize {
        self.num_generations
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn get_log_interval(&self) -> usize {
        self.log_interval
    }

    /// Returns the minimum number of candidates to evaluate in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn get_tournament_size(&self) -> usize {
        self.tournament_size
    }

    pub fn get_max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub fn set_num_generations(&mut self, num_generations: usize) {
        self.num_generations = num_generations;
    }

    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    /// Checks the options before a run.
    ///
    /// The population must hold at least three candidates so that replacing
    /// the two worst never evicts the best.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 3 {
            return Err(TimetableError::Configuration(format!(
                "Population size must be at least 3, got {}",
                self.population_size
            )));
        }
        if self.tournament_size == 0 {
            return Err(TimetableError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(TimetableError::Configuration(
                "Maximum attempts must be greater than 0".to_string(),
            ));
        }
        if self.log_interval == 0 {
            return Err(TimetableError::Configuration(
                "Log interval must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            num_generations: 100,
            population_size: 10,
            log_level: LogLevel::None,
            log_interval: 5,
            parallel_threshold: 8,
            tournament_size: 2,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Builder for `EvolutionOptions`.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    num_generations: Option<usize>,
    population_size: Option<usize>,
    log_level: Option<LogLevel>,
    log_interval: Option<usize>,
    parallel_threshold: Option<usize>,
    tournament_size: Option<usize>,
    max_attempts: Option<usize>,
}

impl EvolutionOptionsBuilder {
    pub fn num_generations(mut self, value: usize) -> Self {
        self.num_generations = Some(value);
        self
    }

    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    pub fn log_interval(mut self, value: usize) -> Self {
        self.log_interval = Some(value);
        self
    }

    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    pub fn tournament_size(mut self, value: usize) -> Self {
        self.tournament_size = Some(value);
        self
    }

    pub fn max_attempts(mut self, value: usize) -> Self {
        self.max_attempts = Some(value);
        self
    }

    pub fn build(self) -> EvolutionOptions {
        let default = EvolutionOptions::default();
        EvolutionOptions {
            num_generations: self.num_generations.unwrap_or(default.num_generations),
            population_size: self.population_size.unwrap_or(default.population_size),
            log_level: self.log_level.unwrap_or(default.log_level),
            log_interval: self.log_interval.unwrap_or(default.log_interval),
            parallel_threshold: self.parallel_threshold.unwrap_or(default.parallel_threshold),
            tournament_size: self.tournament_size.unwrap_or(default.tournament_size),
            max_attempts: self.max_attempts.unwrap_or(default.max_attempts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let options = EvolutionOptions::builder()
            .num_generations(7)
            .population_size(4)
            .max_attempts(3)
            .build();

        assert_eq!(options.get_num_generations(), 7);
        assert_eq!(options.get_population_size(), 4);
        assert_eq!(options.get_max_attempts(), 3);
        assert_eq!(options.get_tournament_size(), 2);
        assert_eq!(options.get_log_level(), LogLevel::None);
    }

    #[test]
    fn test_small_population_rejected() {
        let options = EvolutionOptions::new(10, LogLevel::None, 2);
        match options.validate() {
            Err(TimetableError::Configuration(msg)) => assert!(msg.contains("at least 3")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_setters_update_fields() {
        let mut options = EvolutionOptions::default();
        options.set_num_generations(25);
        options.set_population_size(12);
        options.set_log_level(LogLevel::Verbose);

        assert_eq!(options.get_num_generations(), 25);
        assert_eq!(options.get_population_size(), 12);
        assert_eq!(options.get_log_level(), LogLevel::Verbose);
        assert!(options.validate().is_ok());

        options.set_population_size(1);
        assert!(options.validate().is_err());
    }
}
