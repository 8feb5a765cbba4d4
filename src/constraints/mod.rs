//! # Penalty Evaluation
//!
//! This module scores a candidate timetable against the fixed constraint
//! catalogue. Lower is better.
//!
//! ## Hard constraint
//!
//! - **Concurrency**: two matches sharing a referee must not run at the same
//!   time of day on the same day. Each clashing pair costs
//!   [`CONCURRENCY_WEIGHT`] and is charged once per evaluation.
//!
//! ## Soft constraints (per referee)
//!
//! - **Consecutive runs**: a run of back-to-back presentations shorter than the
//!   referee's target costs [`SHORT_RUN_WEIGHT`] per missing presentation; a
//!   longer run costs [`LONG_RUN_WEIGHT`] per extra presentation and counts as
//!   a soft violation.
//! - **Active days**: every day above the referee's target costs
//!   [`EXTRA_DAY_WEIGHT`].
//! - **Venue changes**: referees who avoid them pay [`VENUE_CHANGE_WEIGHT`] per
//!   change within a run.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use timetable_hybrid::constraints::PenaltyEvaluator;
//! use timetable_hybrid::error::Phase;
//! use timetable_hybrid::model::{ProblemBuilder, RefereePreference, SlotLayout};
//!
//! // One day, two venues, two periods: slots 0 and 2 run at the same time.
//! let layout = SlotLayout::new(1, 2, 2).unwrap();
//! let problem = ProblemBuilder::new(layout, 2, 1)
//!     .assign(0, 0)
//!     .assign(1, 0)
//!     .preference(0, RefereePreference::new(1, 1, false))
//!     .build()
//!     .unwrap();
//!
//! let mut candidate = problem.availability().clone();
//! candidate.assign(0, 0, Phase::Generation).unwrap();
//! candidate.assign(2, 1, Phase::Generation).unwrap();
//!
//! let evaluator = PenaltyEvaluator::new(Arc::new(problem));
//! let evaluation = evaluator.evaluate(&candidate).unwrap();
//! assert_eq!(evaluation.penalty, 1000);
//! assert_eq!(evaluation.hard_violations, 1);
//! ```

use std::cell::RefCell;
use std::sync::Arc;

use rayon::prelude::*;
use thread_local::ThreadLocal;

use crate::error::{Phase, Result, TimetableError};
use crate::evolution::Challenge;
use crate::model::{Chromosome, Problem, RefereeStatistics};

pub mod concurrency;
pub mod referee;

pub use concurrency::CONCURRENCY_WEIGHT;
pub use referee::{EXTRA_DAY_WEIGHT, LONG_RUN_WEIGHT, SHORT_RUN_WEIGHT, VENUE_CHANGE_WEIGHT};

use referee::{score_referee, RefereeScore};

/// Referee counts at or above this are scored on the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// The outcome of scoring one candidate.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Total penalty points, hard and soft.
    pub penalty: i64,
    /// Number of concurrency clashes.
    pub hard_violations: u32,
    /// Number of soft-constraint violations.
    pub soft_violations: u32,
    /// Per-referee diagnostics, indexed by referee.
    pub statistics: Vec<RefereeStatistics>,
}

impl Evaluation {
    /// `true` if no hard constraint is violated.
    pub fn is_feasible(&self) -> bool {
        self.hard_violations == 0
    }
}

/// Scores candidates against a shared [`Problem`].
///
/// Evaluation is deterministic and does not modify the problem. The
/// pair-charging scratch buffer is kept per thread and reused across calls.
#[derive(Debug)]
pub struct PenaltyEvaluator {
    problem: Arc<Problem>,
    parallel_threshold: usize,
    scratch: ThreadLocal<RefCell<Vec<bool>>>,
}

impl PenaltyEvaluator {
    pub fn new(problem: Arc<Problem>) -> Self {
        Self::with_parallel_threshold(problem, DEFAULT_PARALLEL_THRESHOLD)
    }

    /// Creates an evaluator that scores referees in parallel once there are
    /// at least `parallel_threshold` of them.
    pub fn with_parallel_threshold(problem: Arc<Problem>, parallel_threshold: usize) -> Self {
        Self {
            problem,
            parallel_threshold,
            scratch: ThreadLocal::new(),
        }
    }

    pub fn problem(&self) -> &Arc<Problem> {
        &self.problem
    }

    /// Computes the penalty, violation counts and referee statistics of a candidate.
    ///
    /// # Errors
    ///
    /// Returns an invariant violation if the candidate does not match the
    /// problem's dimensions or some match is not held by exactly one slot.
    pub fn evaluate(&self, candidate: &Chromosome) -> Result<Evaluation> {
        let problem = self.problem.as_ref();

        if candidate.slot_count() != problem.slot_count()
            || candidate.match_count() != problem.match_count()
        {
            return Err(TimetableError::invariant(
                Phase::Evaluation,
                None,
                None,
                format!(
                    "candidate is {}x{}, problem is {}x{}",
                    candidate.slot_count(),
                    candidate.match_count(),
                    problem.slot_count(),
                    problem.match_count()
                ),
            ));
        }

        let assignments = candidate.assignments(Phase::Evaluation)?;

        let (hard_penalty, hard_violations) = self.charge_hard(candidate, &assignments);

        // The scratch borrow is released above: rayon may run another
        // evaluation on this thread while we wait for the referee scores.
        let scores: Vec<RefereeScore> = if problem.referee_count() >= self.parallel_threshold {
            (0..problem.referee_count())
                .into_par_iter()
                .map(|referee| score_referee(problem, referee, &assignments))
                .collect()
        } else {
            (0..problem.referee_count())
                .map(|referee| score_referee(problem, referee, &assignments))
                .collect()
        };

        let mut evaluation = Evaluation {
            penalty: hard_penalty,
            hard_violations,
            soft_violations: 0,
            statistics: Vec::with_capacity(scores.len()),
        };

        for score in scores {
            evaluation.penalty += score.penalty;
            evaluation.soft_violations += score.soft_violations;
            evaluation.statistics.push(score.statistics);
        }

        Ok(evaluation)
    }

    fn charge_hard(&self, candidate: &Chromosome, assignments: &[usize]) -> (i64, u32) {
        let cell = self.scratch.get_or(|| RefCell::new(Vec::new()));
        match cell.try_borrow_mut() {
            Ok(mut charged) => {
                concurrency::charge_concurrency(&self.problem, candidate, assignments, &mut charged)
            }
            Err(_) => {
                let mut charged = Vec::new();
                concurrency::charge_concurrency(&self.problem, candidate, assignments, &mut charged)
            }
        }
    }
}

impl Clone for PenaltyEvaluator {
    fn clone(&self) -> Self {
        Self::with_parallel_threshold(Arc::clone(&self.problem), self.parallel_threshold)
    }
}

impl Challenge<Chromosome> for PenaltyEvaluator {
    fn penalty(&self, phenotype: &Chromosome) -> Result<i64> {
        self.evaluate(phenotype).map(|evaluation| evaluation.penalty)
    }
}
