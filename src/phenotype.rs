//! # Phenotype Trait
//!
//! The `Phenotype` trait defines the interface for types that represent
//! individuals in the genetic algorithm: two-parent crossover producing two
//! children, and in-place mutation. Both take the run's random number
//! generator explicitly and may fail, since repairing a child can discover
//! that the input leaves no legal placement.
//!
//! ## Example
//!
//! ```rust
//! use timetable_hybrid::error::Result;
//! use timetable_hybrid::phenotype::Phenotype;
//! use timetable_hybrid::rng::RandomNumberGenerator;
//!
//! #[derive(Clone, Debug)]
//! struct Genes {
//!     values: Vec<u8>,
//! }
//!
//! impl Phenotype for Genes {
//!     fn crossover(&self, other: &Self, rng: &mut RandomNumberGenerator) -> Result<(Self, Self)> {
//!         let cut = rng.index(self.values.len());
//!         let mut first = self.clone();
//!         let mut second = other.clone();
//!         first.values[cut..].copy_from_slice(&other.values[cut..]);
//!         second.values[cut..].copy_from_slice(&self.values[cut..]);
//!         Ok((first, second))
//!     }
//!
//!     fn mutate(&mut self, rng: &mut RandomNumberGenerator) -> Result<()> {
//!         let idx = rng.index(self.values.len());
//!         self.values[idx] ^= 1;
//!         Ok(())
//!     }
//! }
//! ```

use std::fmt::Debug;

use crate::error::Result;
use crate::rng::RandomNumberGenerator;

/// Trait for types that represent individuals in the genetic algorithm.
///
/// Types implementing this trait must also implement `Clone` (a deep copy),
/// `Debug`, `Send`, and `Sync`.
pub trait Phenotype: Clone + Debug + Send + Sync {
    /// Combines `self` and `other` into two children. Neither parent is modified.
    fn crossover(&self, other: &Self, rng: &mut RandomNumberGenerator) -> Result<(Self, Self)>;

    /// Introduces a random change into the individual.
    fn mutate(&mut self, rng: &mut RandomNumberGenerator) -> Result<()>;
}
