//! # Problem Builder
//!
//! Turns the raw facts a loader reads (who examines what, when staff and
//! venues are unavailable, what each referee prefers) into a validated
//! [`Problem`].
//!
//! ## Example
//!
//! ```rust
//! use timetable_hybrid::model::{ProblemBuilder, RefereePreference, SlotLayout};
//!
//! let layout = SlotLayout::new(1, 2, 2).unwrap();
//! let problem = ProblemBuilder::new(layout, 2, 1)
//!     .assign(0, 0)
//!     .assign(1, 0)
//!     .staff_unavailable(0, &[3])
//!     .venue_unavailable(&[2])
//!     .preference(0, RefereePreference::new(2, 1, true))
//!     .build()
//!     .unwrap();
//!
//! assert!(problem.conflicts().conflicts(0, 1));
//! assert!(!problem.availability().can_host(3, 0));
//! ```

use crate::error::{Result, TimetableError};

use super::{Chromosome, MatchRefereeMatrix, Problem, RefereePreference, SlotLayout};

/// Builder for [`Problem`].
#[derive(Debug, Clone)]
pub struct ProblemBuilder {
    layout: SlotLayout,
    match_count: usize,
    referee_count: usize,
    examinations: Vec<(usize, usize)>,
    staff_unavailability: Vec<(usize, Vec<usize>)>,
    venue_unavailability: Vec<usize>,
    preferences: Vec<(usize, RefereePreference)>,
    default_preference: Option<RefereePreference>,
}

impl ProblemBuilder {
    pub fn new(layout: SlotLayout, match_count: usize, referee_count: usize) -> Self {
        Self {
            layout,
            match_count,
            referee_count,
            examinations: Vec::new(),
            staff_unavailability: Vec::new(),
            venue_unavailability: Vec::new(),
            preferences: Vec::new(),
            default_preference: None,
        }
    }

    /// Records that `referee` examines `match_index`.
    pub fn assign(mut self, match_index: usize, referee: usize) -> Self {
        self.examinations.push((match_index, referee));
        self
    }

    /// Marks slots in which the referee cannot attend any presentation.
    pub fn staff_unavailable(mut self, referee: usize, slots: &[usize]) -> Self {
        self.staff_unavailability.push((referee, slots.to_vec()));
        self
    }

    /// Marks slots whose venue cannot be used at all.
    pub fn venue_unavailable(mut self, slots: &[usize]) -> Self {
        self.venue_unavailability.extend_from_slice(slots);
        self
    }

    /// Sets the preferences of one referee.
    pub fn preference(mut self, referee: usize, preference: RefereePreference) -> Self {
        self.preferences.push((referee, preference));
        self
    }

    /// Preference used for every referee without an explicit one. Without it,
    /// `build` rejects referees whose preference was never stated.
    pub fn default_preference(mut self, preference: RefereePreference) -> Self {
        self.default_preference = Some(preference);
        self
    }

    fn check_match(&self, match_index: usize) -> Result<()> {
        if match_index >= self.match_count {
            return Err(TimetableError::Dimension(format!(
                "Match {} is out of range (0..{})",
                match_index, self.match_count
            )));
        }
        Ok(())
    }

    fn check_referee(&self, referee: usize) -> Result<()> {
        if referee >= self.referee_count {
            return Err(TimetableError::Dimension(format!(
                "Referee {} is out of range (0..{})",
                referee, self.referee_count
            )));
        }
        Ok(())
    }

    fn check_slot(&self, slot: usize) -> Result<()> {
        if slot >= self.layout.slot_count() {
            return Err(TimetableError::Dimension(format!(
                "Slot {} is out of range (0..{})",
                slot,
                self.layout.slot_count()
            )));
        }
        Ok(())
    }

    /// Validates every index and builds the problem.
    pub fn build(self) -> Result<Problem> {
        let mut match_referee = MatchRefereeMatrix::empty(self.match_count, self.referee_count);
        for &(match_index, referee) in &self.examinations {
            self.check_match(match_index)?;
            self.check_referee(referee)?;
            match_referee.set(match_index, referee);
        }

        let mut availability = Chromosome::available(self.layout.slot_count(), self.match_count);

        for (referee, slots) in &self.staff_unavailability {
            self.check_referee(*referee)?;
            let examined = match_referee.matches_of(*referee);
            for &slot in slots {
                self.check_slot(slot)?;
                for &match_index in &examined {
                    availability.mark_unavailable(slot, match_index);
                }
            }
        }

        for &slot in &self.venue_unavailability {
            self.check_slot(slot)?;
            for match_index in 0..self.match_count {
                availability.mark_unavailable(slot, match_index);
            }
        }

        let mut stated = vec![self.default_preference; self.referee_count];
        for &(referee, preference) in &self.preferences {
            self.check_referee(referee)?;
            stated[referee] = Some(preference);
        }
        let preferences = stated
            .into_iter()
            .enumerate()
            .map(|(referee, preference)| {
                preference.ok_or_else(|| {
                    TimetableError::Dimension(format!(
                        "Referee {} has no stated preference",
                        referee
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Problem::new(self.layout, match_referee, availability, preferences)
    }
}
