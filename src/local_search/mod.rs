//! # Local Search
//!
//! Simulated annealing refinement of a single timetable. The engine draws one
//! of four [`Neighborhood`] moves per iteration, accepts by the Metropolis
//! rule and cools geometrically until the temperature falls below a fixed
//! share of where it started.

pub mod neighborhood;
pub mod options;
pub mod simulated_annealing;

pub use neighborhood::Neighborhood;
pub use options::{AnnealingOptions, AnnealingOptionsBuilder};
pub use simulated_annealing::{
    metropolis_accept, AnnealingOutcome, GeometricCooling, SimulatedAnnealing,
};
