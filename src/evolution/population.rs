use rayon::prelude::*;

use crate::error::{OptionExt, Result, TimetableError};
use crate::evolution::Challenge;
use crate::phenotype::Phenotype;

/// A phenotype together with its penalty.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Individual<P: Phenotype> {
    pub phenotype: P,
    pub penalty: i64,
}

impl<P: Phenotype> Individual<P> {
    pub fn new(phenotype: P, penalty: i64) -> Self {
        Self { phenotype, penalty }
    }
}

/// A fixed-size population kept sorted by ascending penalty.
///
/// Members are owned values; nothing is shared between two positions.
#[derive(Debug, Clone)]
pub struct Population<P: Phenotype> {
    individuals: Vec<Individual<P>>,
}

impl<P: Phenotype> Population<P> {
    /// Wraps already scored individuals and sorts them.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPopulation` if `individuals` is empty.
    pub fn from_individuals(mut individuals: Vec<Individual<P>>) -> Result<Self> {
        if individuals.is_empty() {
            return Err(TimetableError::EmptyPopulation);
        }
        individuals.sort_by_key(|individual| individual.penalty);
        Ok(Self { individuals })
    }

    /// Scores `candidates` and builds a sorted population.
    ///
    /// Scoring runs on the rayon pool once there are at least
    /// `parallel_threshold` candidates; the result does not depend on it.
    pub fn evaluate<C>(candidates: Vec<P>, challenge: &C, parallel_threshold: usize) -> Result<Self>
    where
        C: Challenge<P>,
    {
        let individuals: Result<Vec<Individual<P>>> = if candidates.len() >= parallel_threshold {
            candidates
                .into_par_iter()
                .map(|candidate| {
                    let penalty = challenge.penalty(&candidate)?;
                    Ok(Individual::new(candidate, penalty))
                })
                .collect()
        } else {
            candidates
                .into_iter()
                .map(|candidate| {
                    let penalty = challenge.penalty(&candidate)?;
                    Ok(Individual::new(candidate, penalty))
                })
                .collect()
        };

        Self::from_individuals(individuals?)
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn individuals(&self) -> &[Individual<P>] {
        &self.individuals
    }

    pub fn get(&self, index: usize) -> Option<&Individual<P>> {
        self.individuals.get(index)
    }

    /// Penalties in population order (ascending).
    pub fn penalties(&self) -> Vec<i64> {
        self.individuals.iter().map(|i| i.penalty).collect()
    }

    pub fn best(&self) -> Result<&Individual<P>> {
        self.individuals
            .first()
            .ok_or_else_timetable(|| TimetableError::EmptyPopulation)
    }

    pub fn worst(&self) -> Result<&Individual<P>> {
        self.individuals
            .last()
            .ok_or_else_timetable(|| TimetableError::EmptyPopulation)
    }

    /// Difference between the worst and the best penalty.
    pub fn spread(&self) -> Result<i64> {
        Ok(self.worst()?.penalty - self.best()?.penalty)
    }

    /// Replaces the two worst members with `children`, unconditionally, and
    /// re-sorts.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the population has fewer than two
    /// members.
    pub fn replace_worst(&mut self, children: [Individual<P>; 2]) -> Result<()> {
        let len = self.individuals.len();
        if len < 2 {
            return Err(TimetableError::Configuration(format!(
                "Cannot replace two members of a population of {}",
                len
            )));
        }

        let [first, second] = children;
        self.individuals[len - 1] = first;
        self.individuals[len - 2] = second;
        self.individuals.sort_by_key(|individual| individual.penalty);
        Ok(())
    }
}
