use std::sync::Arc;

use crate::error::{Phase, Result};
use crate::model::{Chromosome, Problem};
use crate::rng::RandomNumberGenerator;

/// Builds random initial candidates from the problem's availability template.
///
/// Every generated candidate gives each match one available slot and never
/// double-books a slot. Referee clashes are not avoided; the evaluator
/// charges them and the search removes them.
#[derive(Debug, Clone)]
pub struct CandidateGenerator {
    problem: Arc<Problem>,
}

impl CandidateGenerator {
    pub fn new(problem: Arc<Problem>) -> Self {
        Self { problem }
    }

    /// Places every match, in index order, in a uniformly chosen slot that is
    /// available for it and still empty.
    ///
    /// # Errors
    ///
    /// Returns `InfeasibleInput` naming the first match for which no such
    /// slot is left.
    pub fn generate(&self, rng: &mut RandomNumberGenerator) -> Result<Chromosome> {
        let mut candidate = self.problem.availability().clone();
        for match_index in 0..self.problem.match_count() {
            candidate.place_randomly(match_index, rng, Phase::Generation)?;
        }
        Ok(candidate)
    }

    /// Generates `count` independent candidates.
    pub fn generate_many(
        &self,
        count: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Chromosome>> {
        (0..count).map(|_| self.generate(rng)).collect()
    }
}
