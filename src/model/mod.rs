//! # Constraint Model
//!
//! Static data of a timetabling run: the slot grid, who examines which match,
//! which matches clash, which slots are available, and what each referee
//! prefers. Everything here is built once and read-only afterwards, with the
//! exception of [`Chromosome`], which is the value the optimizer evolves.

pub mod builder;
pub mod chromosome;
pub mod layout;
pub mod matrix;
pub mod preference;
pub mod problem;

pub use builder::ProblemBuilder;
pub use chromosome::{Chromosome, SlotState};
pub use layout::SlotLayout;
pub use matrix::{ConflictMatrix, MatchRefereeMatrix};
pub use preference::{RefereePreference, RefereeStatistics};
pub use problem::Problem;
