//! # Breeding
//!
//! Operators that create and vary candidate timetables: the random
//! [`CandidateGenerator`], two-point column [`crossover`] with [`repair`], and
//! [`swap_mutation`]. Every operator hands back chromosomes in which each
//! match holds exactly one slot and no slot holds two matches.
//!
//! A [`BreedStrategy`] packages crossover and mutation into the single step
//! the genetic algorithm performs per generation.

use std::fmt::Debug;

use crate::error::Result;
use crate::model::Chromosome;
use crate::phenotype::Phenotype;
use crate::rng::RandomNumberGenerator;

pub mod crossover;
pub mod generator;
pub mod mutation;

pub use crossover::{crossover, crossover_range, repair};
pub use generator::CandidateGenerator;
pub use mutation::swap_mutation;

/// Default cap on redraws for operators that sample until a legal move is found.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

/// Produces two mutated children from two parents.
pub trait BreedStrategy<P: Phenotype>: Debug + Send + Sync {
    fn breed(&self, first: &P, second: &P, rng: &mut RandomNumberGenerator) -> Result<(P, P)>;
}

/// Crossover followed by mutation of both children, using the phenotype's
/// own operators.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrdinaryStrategy;

impl<P: Phenotype> BreedStrategy<P> for OrdinaryStrategy {
    fn breed(&self, first: &P, second: &P, rng: &mut RandomNumberGenerator) -> Result<(P, P)> {
        let (mut first_child, mut second_child) = first.crossover(second, rng)?;
        first_child.mutate(rng)?;
        second_child.mutate(rng)?;
        Ok((first_child, second_child))
    }
}

/// Timetable breeding with a configurable mutation retry cap.
#[derive(Debug, Clone, Copy)]
pub struct TimetableStrategy {
    max_attempts: usize,
}

impl TimetableStrategy {
    pub fn new(max_attempts: usize) -> Self {
        Self { max_attempts }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }
}

impl Default for TimetableStrategy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl BreedStrategy<Chromosome> for TimetableStrategy {
    fn breed(
        &self,
        first: &Chromosome,
        second: &Chromosome,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Chromosome, Chromosome)> {
        let (mut first_child, mut second_child) = crossover(first, second, rng)?;
        swap_mutation(&mut first_child, self.max_attempts, rng)?;
        swap_mutation(&mut second_child, self.max_attempts, rng)?;
        Ok((first_child, second_child))
    }
}

impl Phenotype for Chromosome {
    fn crossover(&self, other: &Self, rng: &mut RandomNumberGenerator) -> Result<(Self, Self)> {
        crossover(self, other, rng)
    }

    fn mutate(&mut self, rng: &mut RandomNumberGenerator) -> Result<()> {
        swap_mutation(self, DEFAULT_MAX_ATTEMPTS, rng).map(|_| ())
    }
}
