//! # Error Types
//!
//! This module defines the error type for the timetabling engine. Every
//! failure that aborts a run carries the [`Phase`] that detected it and, where
//! one exists, the offending match or slot index.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use timetable_hybrid::error::{Phase, Result, TimetableError};
//!
//! fn place(match_index: usize, free_slots: &[usize]) -> Result<usize> {
//!     free_slots.first().copied().ok_or(TimetableError::InfeasibleInput {
//!         phase: Phase::Generation,
//!         match_index,
//!     })
//! }
//!
//! assert!(place(3, &[]).is_err());
//! assert_eq!(place(3, &[7]).unwrap(), 7);
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use timetable_hybrid::error::{OptionExt, TimetableError};
//!
//! fn best_penalty(penalties: &[i64]) -> timetable_hybrid::error::Result<i64> {
//!     penalties.iter().min().copied().ok_or_else_timetable(||
//!         TimetableError::EmptyPopulation
//!     )
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// The stage of a run in which an error was detected.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Building an initial candidate from the availability template.
    Generation,
    /// Re-placing matches that collided after a crossover.
    Repair,
    /// Exchanging match columns between two parents.
    Crossover,
    /// Swap mutation of a child.
    Mutation,
    /// Tournament selection of parents.
    Selection,
    /// Penalty evaluation.
    Evaluation,
    /// Simulated annealing refinement.
    Annealing,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Generation => "generation",
            Phase::Repair => "repair",
            Phase::Crossover => "crossover",
            Phase::Mutation => "mutation",
            Phase::Selection => "selection",
            Phase::Evaluation => "evaluation",
            Phase::Annealing => "annealing",
        };
        f.write_str(name)
    }
}

/// Represents errors that can occur while building or optimizing a timetable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimetableError {
    /// No slot is both available for the match and empty.
    #[error("Infeasible input during {phase}: no available empty slot for match {match_index}")]
    InfeasibleInput { phase: Phase, match_index: usize },

    /// A candidate broke the one-slot-per-match or one-match-per-slot invariant.
    #[error("Invariant violation during {phase}: {detail}{}", located(.match_index, .slot))]
    InvariantViolation {
        phase: Phase,
        match_index: Option<usize>,
        slot: Option<usize>,
        detail: String,
    },

    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input matrices whose shapes or indices do not agree.
    #[error("Dimension error: {0}")]
    Dimension(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when NaN or infinity values are encountered.
    #[error("Invalid numeric value: {0}")]
    InvalidNumericValue(String),
}

impl TimetableError {
    /// Returns the phase that detected the error, if it is tied to one.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            TimetableError::InfeasibleInput { phase, .. }
            | TimetableError::InvariantViolation { phase, .. } => Some(*phase),
            _ => None,
        }
    }

    pub(crate) fn invariant(
        phase: Phase,
        match_index: Option<usize>,
        slot: Option<usize>,
        detail: impl Into<String>,
    ) -> Self {
        TimetableError::InvariantViolation {
            phase,
            match_index,
            slot,
            detail: detail.into(),
        }
    }
}

fn located(match_index: &Option<usize>, slot: &Option<usize>) -> String {
    let mut out = String::new();
    if let Some(m) = match_index {
        out.push_str(&format!(" (match {})", m));
    }
    if let Some(s) = slot {
        out.push_str(&format!(" (slot {})", s));
    }
    out
}

/// A specialized Result type for timetabling operations.
pub type Result<T> = std::result::Result<T, TimetableError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, TimetableError>` using
    /// a closure to generate the error.
    fn ok_or_else_timetable<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> TimetableError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_timetable<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> TimetableError,
    {
        self.ok_or_else(err_fn)
    }
}
