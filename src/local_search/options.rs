//! # AnnealingOptions
//!
//! Configuration of the simulated annealing phase.
//!
//! ```rust
//! use timetable_hybrid::local_search::AnnealingOptions;
//!
//! let options = AnnealingOptions::builder()
//!     .cooling_ratio(0.99)
//!     .stop_fraction(1e-3)
//!     .build();
//! assert!(options.validate().is_ok());
//! assert_eq!(options.get_max_move_attempts(), 1000);
//! ```

use crate::breeding::DEFAULT_MAX_ATTEMPTS;
use crate::error::{Result, TimetableError};
use crate::evolution::LogLevel;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct AnnealingOptions {
    /// Factor applied to the temperature after every iteration.
    cooling_ratio: f64,
    /// The run stops once the temperature falls below this share of the
    /// initial temperature.
    stop_fraction: f64,
    /// Lower bound for the initial temperature derived from the population.
    min_initial_temperature: f64,
    max_move_attempts: usize,
    log_level: LogLevel,
    log_interval: usize,
}

impl AnnealingOptions {
    pub fn get_cooling_ratio(&self) -> f64 {
        self.cooling_ratio
    }

    pub fn get_stop_fraction(&self) -> f64 {
        self.stop_fraction
    }

    pub fn get_min_initial_temperature(&self) -> f64 {
        self.min_initial_temperature
    }

    pub fn get_max_move_attempts(&self) -> usize {
        self.max_move_attempts
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn get_log_interval(&self) -> usize {
        self.log_interval
    }

    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    /// Checks that the schedule terminates.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the cooling ratio is not in (0, 1),
    /// the stop fraction is not in (0, 1), the minimum initial temperature is
    /// not a positive finite number, or a count is zero.
    pub fn validate(&self) -> Result<()> {
        if !(self.cooling_ratio > 0.0 && self.cooling_ratio < 1.0) {
            return Err(TimetableError::Configuration(format!(
                "Cooling ratio must be between 0 and 1 (exclusive), got {}",
                self.cooling_ratio
            )));
        }
        if !(self.stop_fraction > 0.0 && self.stop_fraction < 1.0) {
            return Err(TimetableError::Configuration(format!(
                "Stop fraction must be between 0 and 1 (exclusive), got {}",
                self.stop_fraction
            )));
        }
        if !(self.min_initial_temperature.is_finite() && self.min_initial_temperature > 0.0) {
            return Err(TimetableError::Configuration(format!(
                "Minimum initial temperature must be positive, got {}",
                self.min_initial_temperature
            )));
        }
        if self.max_move_attempts == 0 {
            return Err(TimetableError::Configuration(
                "Maximum move attempts must be greater than 0".to_string(),
            ));
        }
        if self.log_interval == 0 {
            return Err(TimetableError::Configuration(
                "Log interval must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn builder() -> AnnealingOptionsBuilder {
        AnnealingOptionsBuilder::default()
    }
}

impl Default for AnnealingOptions {
    fn default() -> Self {
        Self {
            cooling_ratio: 0.9999,
            stop_fraction: 1e-4,
            min_initial_temperature: 1.0,
            max_move_attempts: DEFAULT_MAX_ATTEMPTS,
            log_level: LogLevel::None,
            log_interval: 50,
        }
    }
}

/// Builder for `AnnealingOptions`.
#[derive(Debug, Clone, Default)]
pub struct AnnealingOptionsBuilder {
    cooling_ratio: Option<f64>,
    stop_fraction: Option<f64>,
    min_initial_temperature: Option<f64>,
    max_move_attempts: Option<usize>,
    log_level: Option<LogLevel>,
    log_interval: Option<usize>,
}

impl AnnealingOptionsBuilder {
    pub fn cooling_ratio(mut self, value: f64) -> Self {
        self.cooling_ratio = Some(value);
        self
    }

    pub fn stop_fraction(mut self, value: f64) -> Self {
        self.stop_fraction = Some(value);
        self
    }

    pub fn min_initial_temperature(mut self, value: f64) -> Self {
        self.min_initial_temperature = Some(value);
        self
    }

    pub fn max_move_attempts(mut self, value: usize) -> Self {
        self.max_move_attempts = Some(value);
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

    pub fn build(self) -> AnnealingOptions {
        let default = AnnealingOptions::default();
        AnnealingOptions {
            cooling_ratio: self.cooling_ratio.unwrap_or(default.cooling_ratio),
            stop_fraction: self.stop_fraction.unwrap_or(default.stop_fraction),
            min_initial_temperature: self
                .min_initial_temperature
                .unwrap_or(default.min_initial_temperature),
            max_move_attempts: self.max_move_attempts.unwrap_or(default.max_move_attempts),
            log_level: self.log_level.unwrap_or(default.log_level),
            log_interval: self.log_interval.unwrap_or(default.log_interval),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = AnnealingOptions::default();
        assert_eq!(options.get_cooling_ratio(), 0.9999);
        assert_eq!(options.get_stop_fraction(), 1e-4);
        assert_eq!(options.get_min_initial_temperature(), 1.0);
        assert_eq!(options.get_log_interval(), 50);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_non_terminating_schedule_rejected() {
        assert!(AnnealingOptions::builder()
            .cooling_ratio(1.0)
            .build()
            .validate()
            .is_err());
        assert!(AnnealingOptions::builder()
            .stop_fraction(0.0)
            .build()
            .validate()
            .is_err());
        assert!(AnnealingOptions::builder()
            .min_initial_temperature(f64::NAN)
            .build()
            .validate()
            .is_err());
    }
}
