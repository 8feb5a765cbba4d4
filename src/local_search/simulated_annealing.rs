use tracing::{debug, info};

use super::neighborhood::Neighborhood;
use super::options::AnnealingOptions;
use crate::error::{Result, TimetableError};
use crate::evolution::{Challenge, LogLevel};
use crate::model::{Chromosome, Problem};
use crate::rng::RandomNumberGenerator;

/// Metropolis acceptance: improvements are always taken, a worsening of
/// `delta` is taken with probability `exp(-delta / temperature)`.
pub fn metropolis_accept(delta: i64, temperature: f64, rng: &mut RandomNumberGenerator) -> bool {
    if delta < 0 {
        return true;
    }
    rng.probability() < (-(delta as f64) / temperature).exp()
}

/// Geometric cooling schedule `T(k+1) = ratio * T(k)`, stopping once the
/// temperature drops below `stop_fraction * T0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometricCooling {
    temperature: f64,
    ratio: f64,
    stop_temperature: f64,
}

impl GeometricCooling {
    /// # Errors
    ///
    /// Returns `InvalidNumericValue` if `initial_temperature` is not a
    /// positive finite number, and a `Configuration` error if `ratio` or
    /// `stop_fraction` is outside (0, 1).
    pub fn new(initial_temperature: f64, ratio: f64, stop_fraction: f64) -> Result<Self> {
        if !initial_temperature.is_finite() || initial_temperature <= 0.0 {
            return Err(TimetableError::InvalidNumericValue(format!(
                "Initial temperature must be positive and finite, got {}",
                initial_temperature
            )));
        }
        if !(ratio > 0.0 && ratio < 1.0) {
            return Err(TimetableError::Configuration(format!(
                "Cooling ratio must be between 0 and 1 (exclusive), got {}",
                ratio
            )));
        }
        if !(stop_fraction > 0.0 && stop_fraction < 1.0) {
            return Err(TimetableError::Configuration(format!(
                "Stop fraction must be between 0 and 1 (exclusive), got {}",
                stop_fraction
            )));
        }

        Ok(Self {
            temperature: initial_temperature,
            ratio,
            stop_temperature: initial_temperature * stop_fraction,
        })
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn is_frozen(&self) -> bool {
        self.temperature < self.stop_temperature
    }

    pub fn cool(&mut self) {
        self.temperature *= self.ratio;
    }
}

/// Result of an annealing run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct AnnealingOutcome {
    pub best: Chromosome,
    pub best_penalty: i64,
    pub iterations: usize,
    pub accepted_moves: usize,
    /// Accepted moves that lowered the current penalty.
    pub improving_moves: usize,
    pub final_temperature: f64,
    /// Best penalty after every iteration.
    pub progress: Vec<i64>,
}

/// Single-solution refinement by simulated annealing over the four
/// neighbourhood moves.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use timetable_hybrid::constraints::PenaltyEvaluator;
/// use timetable_hybrid::error::Phase;
/// use timetable_hybrid::evolution::Challenge;
/// use timetable_hybrid::local_search::{AnnealingOptions, SimulatedAnnealing};
/// use timetable_hybrid::model::{ProblemBuilder, RefereePreference, SlotLayout};
/// use timetable_hybrid::rng::RandomNumberGenerator;
///
/// let layout = SlotLayout::new(1, 2, 2).unwrap();
/// let problem = Arc::new(
///     ProblemBuilder::new(layout, 2, 1)
///         .assign(0, 0)
///         .assign(1, 0)
///         .preference(0, RefereePreference::new(2, 1, false))
///         .build()
///         .unwrap(),
/// );
/// let evaluator = PenaltyEvaluator::new(problem.clone());
///
/// // Both matches at the same time in different venues.
/// let mut start = problem.availability().clone();
/// start.assign(0, 0, Phase::Generation).unwrap();
/// start.assign(2, 1, Phase::Generation).unwrap();
/// let penalty = evaluator.penalty(&start).unwrap();
///
/// let options = AnnealingOptions::builder().cooling_ratio(0.95).build();
/// let mut rng = RandomNumberGenerator::from_seed(5);
/// let outcome = SimulatedAnnealing::new(options)
///     .unwrap()
///     .anneal(start, penalty, 10.0, &problem, &evaluator, &mut rng)
///     .unwrap();
///
/// assert!(outcome.best_penalty < 1000);
/// ```
#[derive(Debug, Clone)]
pub struct SimulatedAnnealing {
    options: AnnealingOptions,
}

impl SimulatedAnnealing {
    pub fn new(options: AnnealingOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &AnnealingOptions {
        &self.options
    }

    /// Anneals from `start`, whose penalty is `start_penalty`, until the
    /// temperature falls below the stop threshold.
    ///
    /// One neighbourhood is drawn per iteration. An iteration whose move finds
    /// nothing within the attempt cap proposes nothing and counts as rejected.
    /// The temperature cools every iteration either way.
    ///
    /// # Errors
    ///
    /// Returns `InvalidNumericValue` if `initial_temperature` is not a
    /// positive finite number. Move and evaluation errors abort the run.
    pub fn anneal<C>(
        &self,
        start: Chromosome,
        start_penalty: i64,
        initial_temperature: f64,
        problem: &Problem,
        challenge: &C,
        rng: &mut RandomNumberGenerator,
    ) -> Result<AnnealingOutcome>
    where
        C: Challenge<Chromosome>,
    {
        let mut cooling = GeometricCooling::new(
            initial_temperature,
            self.options.get_cooling_ratio(),
            self.options.get_stop_fraction(),
        )?;

        let mut current = start;
        let mut current_penalty = start_penalty;
        let mut best = current.clone();
        let mut best_penalty = current_penalty;

        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut progress = Vec::new();

        while !cooling.is_frozen() {
            let neighborhood = Neighborhood::random(rng);
            let mut proposal = current.clone();
            let moved = neighborhood.apply(
                &mut proposal,
                problem,
                self.options.get_max_move_attempts(),
                rng,
            )?;

            if moved {
                let proposal_penalty = challenge.penalty(&proposal)?;
                let delta = proposal_penalty - current_penalty;

                if metropolis_accept(delta, cooling.temperature(), rng) {
                    current = proposal;
                    current_penalty = proposal_penalty;
                    accepted_moves += 1;
                    if delta < 0 {
                        improving_moves += 1;
                    }
                }
            }

            if current_penalty < best_penalty {
                best = current.clone();
                best_penalty = current_penalty;
            }

            cooling.cool();
            iterations += 1;
            progress.push(best_penalty);

            match self.options.get_log_level() {
                LogLevel::Verbose => {
                    debug!(
                        iteration = iterations,
                        ?neighborhood,
                        moved,
                        current = current_penalty,
                        best = best_penalty,
                        temperature = cooling.temperature(),
                        "Annealing step"
                    );
                    if iterations % self.options.get_log_interval() == 0 {
                        info!(iteration = iterations, best = best_penalty, "Annealing progress");
                    }
                }
                LogLevel::Minimal => {
                    if iterations % self.options.get_log_interval() == 0 {
                        info!(iteration = iterations, best = best_penalty, "Annealing progress");
                    }
                }
                LogLevel::None => {}
            }
        }

        if self.options.get_log_level() != LogLevel::None {
            info!(
                iterations,
                accepted_moves,
                improving_moves,
                best = best_penalty,
                "Annealing finished"
            );
        }

        Ok(AnnealingOutcome {
            best,
            best_penalty,
            iterations,
            accepted_moves,
            improving_moves,
            final_temperature: cooling.temperature(),
            progress,
        })
    }
}
