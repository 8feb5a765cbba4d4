//! # timetable-hybrid
//!
//! Assigns presentations ("matches") to (day, venue, time) slots so that no
//! referee has to be in two places at once, while respecting each referee's
//! preferences for consecutive runs, active days and venue changes as far as
//! possible.
//!
//! The search is a steady-state genetic algorithm whose best timetable is
//! refined by simulated annealing. [`hybrid::HybridScheduler`] runs both
//! phases; the building blocks are public for finer control.
//!
//! ```rust
//! use std::sync::Arc;
//! use timetable_hybrid::{
//!     AnnealingOptions, EvolutionOptions, HybridOptions, HybridScheduler, ProblemBuilder,
//!     RefereePreference, Report, SlotLayout,
//! };
//!
//! let layout = SlotLayout::new(1, 2, 3).unwrap();
//! let problem = Arc::new(
//!     ProblemBuilder::new(layout, 3, 1)
//!         .assign(0, 0)
//!         .assign(1, 0)
//!         .assign(2, 0)
//!         .preference(0, RefereePreference::new(2, 1, false))
//!         .build()
//!         .unwrap(),
//! );
//!
//! let options = HybridOptions::builder()
//!     .evolution(EvolutionOptions::builder().num_generations(20).build())
//!     .annealing(AnnealingOptions::builder().cooling_ratio(0.98).build())
//!     .seed(11)
//!     .build();
//! let outcome = HybridScheduler::new(problem.clone(), options).optimize().unwrap();
//! println!("{}", Report::new(&problem, &outcome));
//! ```

pub mod breeding;
pub mod constraints;
pub mod error;
pub mod evolution;
pub mod hybrid;
pub mod local_search;
pub mod model;
pub mod phenotype;
pub mod report;
pub mod rng;
pub mod selection;

// Re-export commonly used types for convenience
pub use constraints::{Evaluation, PenaltyEvaluator};
pub use error::{OptionExt, Phase, Result, TimetableError};
pub use evolution::{EvolutionOptions, LogLevel};
pub use hybrid::{HybridOptions, HybridScheduler, ScheduleOutcome};
pub use local_search::AnnealingOptions;
pub use model::{Chromosome, Problem, ProblemBuilder, RefereePreference, SlotLayout};
pub use report::Report;
pub use rng::RandomNumberGenerator;
