use crate::error::{Result, TimetableError};

use super::{Chromosome, ConflictMatrix, MatchRefereeMatrix, RefereePreference, SlotLayout};

/// All static input of a timetabling run.
///
/// Constructed once and shared read-only (usually behind an `Arc`) by the
/// evaluator, the genetic operators and the annealing moves.
#[derive(Debug, Clone)]
pub struct Problem {
    layout: SlotLayout,
    match_referee: MatchRefereeMatrix,
    conflicts: ConflictMatrix,
    availability: Chromosome,
    preferences: Vec<RefereePreference>,
}

impl Problem {
    /// Builds a problem and derives the conflict matrix from shared referees.
    ///
    /// # Errors
    ///
    /// Returns a `Dimension` error if the matrices disagree on the number of
    /// slots, matches or referees, or if `availability` already assigns matches.
    pub fn new(
        layout: SlotLayout,
        match_referee: MatchRefereeMatrix,
        availability: Chromosome,
        preferences: Vec<RefereePreference>,
    ) -> Result<Self> {
        let conflicts = ConflictMatrix::derive(&match_referee);
        Self::with_conflicts(layout, match_referee, conflicts, availability, preferences)
    }

    /// Builds a problem from a conflict matrix supplied by the loader.
    pub fn with_conflicts(
        layout: SlotLayout,
        match_referee: MatchRefereeMatrix,
        conflicts: ConflictMatrix,
        availability: Chromosome,
        preferences: Vec<RefereePreference>,
    ) -> Result<Self> {
        let match_count = match_referee.match_count();

        if availability.slot_count() != layout.slot_count() {
            return Err(TimetableError::Dimension(format!(
                "Availability covers {} slots but the layout has {}",
                availability.slot_count(),
                layout.slot_count()
            )));
        }
        if availability.match_count() != match_count {
            return Err(TimetableError::Dimension(format!(
                "Availability covers {} matches but {} are refereed",
                availability.match_count(),
                match_count
            )));
        }
        if conflicts.match_count() != match_count {
            return Err(TimetableError::Dimension(format!(
                "Conflict matrix covers {} matches, expected {}",
                conflicts.match_count(),
                match_count
            )));
        }
        if preferences.len() != match_referee.referee_count() {
            return Err(TimetableError::Dimension(format!(
                "{} referee preferences given for {} referees",
                preferences.len(),
                match_referee.referee_count()
            )));
        }
        if !availability.is_template() {
            return Err(TimetableError::Dimension(
                "Availability template must not assign any match".to_string(),
            ));
        }

        Ok(Self {
            layout,
            match_referee,
            conflicts,
            availability,
            preferences,
        })
    }

    pub fn layout(&self) -> &SlotLayout {
        &self.layout
    }

    pub fn match_referee(&self) -> &MatchRefereeMatrix {
        &self.match_referee
    }

    pub fn conflicts(&self) -> &ConflictMatrix {
        &self.conflicts
    }

    /// The unassigned template every candidate starts from.
    pub fn availability(&self) -> &Chromosome {
        &self.availability
    }

    pub fn preferences(&self) -> &[RefereePreference] {
        &self.preferences
    }

    pub fn match_count(&self) -> usize {
        self.match_referee.match_count()
    }

    pub fn referee_count(&self) -> usize {
        self.match_referee.referee_count()
    }

    pub fn slot_count(&self) -> usize {
        self.layout.slot_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Phase;

    fn layout() -> SlotLayout {
        SlotLayout::new(1, 2, 2).unwrap()
    }

    #[test]
    fn test_shapes_validated() {
        let referees = MatchRefereeMatrix::empty(2, 1);
        let prefs = vec![RefereePreference::default()];
        let build = |availability: Chromosome, prefs: Vec<RefereePreference>| {
            Problem::new(layout(), referees.clone(), availability, prefs)
        };

        assert!(build(Chromosome::available(4, 2), prefs.clone()).is_ok());
        assert!(build(Chromosome::available(3, 2), prefs.clone()).is_err());
        assert!(build(Chromosome::available(4, 3), prefs.clone()).is_err());
        assert!(build(Chromosome::available(4, 2), vec![]).is_err());
    }

    #[test]
    fn test_assigned_template_rejected() {
        let mut availability = Chromosome::available(4, 2);
        availability.assign(0, 0, Phase::Generation).unwrap();
        let result = Problem::new(
            layout(),
            MatchRefereeMatrix::empty(2, 1),
            availability,
            vec![RefereePreference::default()],
        );
        assert!(matches!(result, Err(TimetableError::Dimension(_))));
    }
}
