//! # Hybrid scheduling
//!
//! Runs the full pipeline on a [`Problem`]: a random initial population, the
//! steady-state genetic algorithm, then simulated annealing from the best
//! timetable the GA found. The annealing temperature starts at the spread
//! between the worst and the best member of the final population.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use timetable_hybrid::evolution::EvolutionOptions;
//! use timetable_hybrid::hybrid::{HybridOptions, HybridScheduler};
//! use timetable_hybrid::local_search::AnnealingOptions;
//! use timetable_hybrid::model::{ProblemBuilder, RefereePreference, SlotLayout};
//!
//! let layout = SlotLayout::new(1, 2, 2).unwrap();
//! let problem = ProblemBuilder::new(layout, 2, 1)
//!     .assign(0, 0)
//!     .assign(1, 0)
//!     .preference(0, RefereePreference::new(2, 1, false))
//!     .build()
//!     .unwrap();
//!
//! let options = HybridOptions::builder()
//!     .evolution(EvolutionOptions::builder().num_generations(10).population_size(4).build())
//!     .annealing(AnnealingOptions::builder().cooling_ratio(0.95).build())
//!     .seed(7)
//!     .build();
//!
//! let outcome = HybridScheduler::new(Arc::new(problem), options).optimize().unwrap();
//! assert!(outcome.evaluation.is_feasible());
//! ```

use std::sync::Arc;

use tracing::{info, warn};

use crate::breeding::{CandidateGenerator, TimetableStrategy};
use crate::constraints::{Evaluation, PenaltyEvaluator};
use crate::error::Result;
use crate::evolution::{EvolutionLauncher, LogLevel, Population};
use crate::local_search::SimulatedAnnealing;
use crate::model::{Chromosome, Problem};
use crate::rng::RandomNumberGenerator;

pub mod options;

pub use options::{HybridOptions, HybridOptionsBuilder};

/// The result of a full optimisation run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct ScheduleOutcome {
    /// The best timetable found.
    pub schedule: Chromosome,
    /// Penalty breakdown and referee statistics of `schedule`.
    pub evaluation: Evaluation,
    /// Best penalty after every GA generation, then after every annealing
    /// iteration.
    pub progress: Vec<i64>,
    pub generations: usize,
    pub annealing_iterations: usize,
    pub initial_temperature: f64,
}

impl ScheduleOutcome {
    pub fn penalty(&self) -> i64 {
        self.evaluation.penalty
    }
}

/// Runs the genetic algorithm followed by simulated annealing.
#[derive(Debug, Clone)]
pub struct HybridScheduler {
    problem: Arc<Problem>,
    options: HybridOptions,
}

impl HybridScheduler {
    pub fn new(problem: Arc<Problem>, options: HybridOptions) -> Self {
        Self { problem, options }
    }

    pub fn problem(&self) -> &Arc<Problem> {
        &self.problem
    }

    pub fn options(&self) -> &HybridOptions {
        &self.options
    }

    /// Runs with a generator seeded from `HybridOptions::seed`, or from
    /// system entropy when no seed is set.
    pub fn optimize(&self) -> Result<ScheduleOutcome> {
        let mut rng = match self.options.seed() {
            Some(seed) => RandomNumberGenerator::from_seed(seed),
            None => RandomNumberGenerator::new(),
        };
        self.optimize_with_rng(&mut rng)
    }

    /// Runs the full pipeline drawing all randomness from `rng`.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error for invalid options, `InfeasibleInput`
    /// if some match has no slot it could ever be placed in, and any error an
    /// operator raises during the run. Nothing is returned on failure.
    pub fn optimize_with_rng(&self, rng: &mut RandomNumberGenerator) -> Result<ScheduleOutcome> {
        self.options.validate()?;
        let evolution = self.options.evolution();
        let annealing = self.options.annealing();

        let evaluator = PenaltyEvaluator::new(self.problem.clone());
        let generator = CandidateGenerator::new(self.problem.clone());

        let candidates = generator.generate_many(evolution.get_population_size(), rng)?;
        let mut population =
            Population::evaluate(candidates, &evaluator, evolution.get_parallel_threshold())?;

        if evolution.get_log_level() != LogLevel::None {
            info!(
                population = population.len(),
                best = population.best()?.penalty,
                worst = population.worst()?.penalty,
                "Initial population evaluated"
            );
        }

        let launcher = EvolutionLauncher::new(
            TimetableStrategy::new(evolution.get_max_attempts()),
            evaluator,
        );
        let mut progress = launcher.evolve(evolution, &mut population, rng)?;

        let spread = population.spread()? as f64;
        let floor = annealing.get_min_initial_temperature();
        let initial_temperature = if spread < floor {
            warn!(
                spread,
                floor, "Population spread below minimum temperature, using the minimum"
            );
            floor
        } else {
            spread
        };

        let best = population.best()?;
        let outcome = SimulatedAnnealing::new(annealing.clone())?.anneal(
            best.phenotype.clone(),
            best.penalty,
            initial_temperature,
            &self.problem,
            launcher.challenge(),
            rng,
        )?;

        let evaluation = launcher.challenge().evaluate(&outcome.best)?;
        let generations = evolution.get_num_generations();
        let annealing_iterations = outcome.iterations;
        progress.extend(outcome.progress);

        if evolution.get_log_level() != LogLevel::None {
            info!(
                penalty = evaluation.penalty,
                hard = evaluation.hard_violations,
                soft = evaluation.soft_violations,
                "Optimisation finished"
            );
        }

        Ok(ScheduleOutcome {
            schedule: outcome.best,
            evaluation,
            progress,
            generations,
            annealing_iterations,
            initial_temperature,
        })
    }
}
