//! # Neighbourhood moves
//!
//! The four moves the annealing engine draws from. Each one edits a
//! chromosome in place, keeps the assignment invariant, and reports whether
//! it found a legal move within the attempt cap. A move that finds nothing
//! leaves the chromosome untouched.

use tracing::trace;

use crate::error::{Phase, Result, TimetableError};
use crate::model::{Chromosome, Problem};
use crate::rng::RandomNumberGenerator;

/// A neighbourhood structure of the annealing phase.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Neighborhood {
    /// Two matches of one referee exchange slots.
    RefereePairSwap,
    /// A match moves to another venue at the same day and time.
    VenueChange,
    /// A match moves to any slot that is available for it and empty.
    Relocation,
    /// A match conflicting with a random match moves next to it, to build
    /// consecutive runs for their shared referee.
    ConsecutiveNudge,
}

impl Neighborhood {
    pub const ALL: [Neighborhood; 4] = [
        Neighborhood::RefereePairSwap,
        Neighborhood::VenueChange,
        Neighborhood::Relocation,
        Neighborhood::ConsecutiveNudge,
    ];

    /// Draws one of the four moves uniformly.
    pub fn random(rng: &mut RandomNumberGenerator) -> Self {
        Self::ALL[rng.index(Self::ALL.len())]
    }

    /// Applies the move to `candidate`, redrawing its random choices up to
    /// `max_attempts` times. Returns whether the chromosome changed.
    pub fn apply(
        &self,
        candidate: &mut Chromosome,
        problem: &Problem,
        max_attempts: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<bool> {
        if candidate.match_count() == 0 {
            return Ok(false);
        }

        for _ in 0..max_attempts {
            let moved = match self {
                Neighborhood::RefereePairSwap => referee_pair_swap(candidate, problem, rng)?,
                Neighborhood::VenueChange => venue_change(candidate, problem, rng)?,
                Neighborhood::Relocation => relocation(candidate, rng)?,
                Neighborhood::ConsecutiveNudge => consecutive_nudge(candidate, problem, rng)?,
            };
            if moved {
                return Ok(true);
            }
        }

        trace!(neighborhood = ?self, max_attempts, "no legal move found");
        Ok(false)
    }
}

fn current_slot(candidate: &Chromosome, match_index: usize) -> Result<usize> {
    candidate.assigned_slot(match_index).ok_or_else(|| {
        TimetableError::invariant(
            Phase::Annealing,
            Some(match_index),
            None,
            "match is not assigned to any slot",
        )
    })
}

fn referee_pair_swap(
    candidate: &mut Chromosome,
    problem: &Problem,
    rng: &mut RandomNumberGenerator,
) -> Result<bool> {
    let referee_count = problem.referee_count();
    if referee_count == 0 {
        return Ok(false);
    }

    let matches = problem.match_referee().matches_of(rng.index(referee_count));
    if matches.len() < 2 {
        return Ok(false);
    }

    let first = matches[rng.index(matches.len())];
    let second = matches[rng.index(matches.len())];
    if first == second {
        return Ok(false);
    }

    candidate.swap_matches(first, second, Phase::Annealing)
}

fn venue_change(
    candidate: &mut Chromosome,
    problem: &Problem,
    rng: &mut RandomNumberGenerator,
) -> Result<bool> {
    let match_index = rng.index(candidate.match_count());
    let slot = current_slot(candidate, match_index)?;

    let targets: Vec<usize> = problem
        .layout()
        .concurrent_slots(slot)
        .filter(|&target| {
            target != slot
                && candidate.can_host(target, match_index)
                && candidate.is_slot_empty(target)
        })
        .collect();

    match rng.choose(&targets) {
        Some(&target) => {
            candidate.move_match(match_index, target, Phase::Annealing)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

fn relocation(candidate: &mut Chromosome, rng: &mut RandomNumberGenerator) -> Result<bool> {
    let match_index = rng.index(candidate.match_count());
    let targets = candidate.free_slots_for(match_index);

    match rng.choose(&targets) {
        Some(&target) => {
            candidate.move_match(match_index, target, Phase::Annealing)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

fn consecutive_nudge(
    candidate: &mut Chromosome,
    problem: &Problem,
    rng: &mut RandomNumberGenerator,
) -> Result<bool> {
    let layout = problem.layout();
    let match_index = rng.index(candidate.match_count());
    let slot = current_slot(candidate, match_index)?;
    let adjacent = layout.adjacent_slot(slot, rng.coin());

    // Same venue first, then the other venues at that time.
    let targets = std::iter::once(adjacent).chain(
        layout
            .concurrent_slots(adjacent)
            .filter(move |&target| target != adjacent),
    );

    let conflicting = problem.conflicts().conflicting_matches(match_index);

    for target in targets {
        if !candidate.has_free_cell(target) || !candidate.is_slot_empty(target) {
            continue;
        }

        let Some(&chosen) = rng.choose(&conflicting) else {
            return Ok(false);
        };

        if candidate.can_host(target, chosen) {
            candidate.move_match(chosen, target, Phase::Annealing)?;
            return Ok(true);
        }
    }

    Ok(false)
}
