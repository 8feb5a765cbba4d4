use crate::error::{Result, TimetableError};
use crate::rng::RandomNumberGenerator;

/// Tournament selection over penalties (lower is better).
///
/// Each tournament draws `tournament_size` individuals uniformly with
/// replacement and keeps the one with the lowest penalty; ties go to the
/// earliest draw. Two tournaments pick the two parents of a generation, and
/// the second is re-run until it picks someone other than the first.
///
/// # Examples
///
/// ```
/// use timetable_hybrid::rng::RandomNumberGenerator;
/// use timetable_hybrid::selection::TournamentSelection;
///
/// let penalties = vec![10, 20, 30, 40];
/// let mut rng = RandomNumberGenerator::from_seed(1);
///
/// let (first, second) = TournamentSelection::default()
///     .select_parents(&penalties, &mut rng)
///     .unwrap();
/// assert_ne!(first, second);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct TournamentSelection {
    tournament_size: usize,
    max_attempts: usize,
}

impl TournamentSelection {
    /// Creates a new TournamentSelection strategy.
    ///
    /// # Arguments
    ///
    /// * `tournament_size` - The number of individuals drawn per tournament. A
    ///   size of 1 is equivalent to random selection.
    /// * `max_attempts` - How many times the second tournament is re-run when
    ///   it picks the first parent again, before a random other individual is
    ///   taken instead.
    ///
    /// # Errors
    ///
    /// Returns an error if either argument is 0.
    pub fn new(tournament_size: usize, max_attempts: usize) -> Result<Self> {
        if tournament_size < 1 {
            return Err(TimetableError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        if max_attempts < 1 {
            return Err(TimetableError::Configuration(
                "Selection attempts must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            tournament_size,
            max_attempts,
        })
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Runs a single tournament and returns the index of the winner.
    pub fn run_tournament(&self, penalties: &[i64], rng: &mut RandomNumberGenerator) -> usize {
        let mut best = rng.index(penalties.len());
        for _ in 1..self.tournament_size {
            let challenger = rng.index(penalties.len());
            if penalties[challenger] < penalties[best] {
                best = challenger;
            }
        }
        best
    }

    /// Picks two distinct parents.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two individuals are given.
    pub fn select_parents(
        &self,
        penalties: &[i64],
        rng: &mut RandomNumberGenerator,
    ) -> Result<(usize, usize)> {
        if penalties.len() < 2 {
            return Err(TimetableError::Configuration(format!(
                "Tournament selection needs at least two individuals, got {}",
                penalties.len()
            )));
        }

        let first = self.run_tournament(penalties, rng);

        for _ in 0..self.max_attempts {
            let second = self.run_tournament(penalties, rng);
            if second != first {
                return Ok((first, second));
            }
        }

        let mut second = rng.index(penalties.len() - 1);
        if second >= first {
            second += 1;
        }
        Ok((first, second))
    }
}

impl Default for TournamentSelection {
    /// Binary tournament.
    fn default() -> Self {
        Self {
            tournament_size: 2,
            max_attempts: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_configuration() {
        assert!(TournamentSelection::new(0, 10).is_err());
        assert!(TournamentSelection::new(2, 0).is_err());
    }

    #[test]
    fn test_parents_always_distinct() {
        let selection = TournamentSelection::default();
        let mut rng = RandomNumberGenerator::from_seed(17);
        let penalties = vec![5, 1];

        for _ in 0..500 {
            let (a, b) = selection.select_parents(&penalties, &mut rng).unwrap();
            assert_ne!(a, b);
            assert!(a < 2 && b < 2);
        }
    }

    #[test]
    fn test_fallback_after_exhausted_attempts() {
        // A huge tournament on a clear winner always picks index 0.
        let selection = TournamentSelection::new(200, 1).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(3);
        let (a, b) = selection.select_parents(&[0, 50, 50], &mut rng).unwrap();
        assert_eq!(a, 0);
        assert!(b == 1 || b == 2);
    }

    #[test]
    fn test_tournament_prefers_lower_penalty() {
        let selection = TournamentSelection::default();
        let mut rng = RandomNumberGenerator::from_seed(99);
        let penalties = vec![0, 100, 200, 300];
        let mut wins = [0usize; 4];

        for _ in 0..4000 {
            wins[selection.run_tournament(&penalties, &mut rng)] += 1;
        }

        // Expected shares for a binary tournament: 7/16, 5/16, 3/16, 1/16.
        assert!(wins[0] > wins[1]);
        assert!(wins[1] > wins[2]);
        assert!(wins[2] > wins[3]);
    }

    #[test]
    fn test_too_small_population() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        assert!(TournamentSelection::default()
            .select_parents(&[1], &mut rng)
            .is_err());
    }
}
