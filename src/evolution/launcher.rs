use std::marker::PhantomData;

use tracing::{debug, info};

use super::{
    challenge::Challenge,
    options::{EvolutionOptions, LogLevel},
    population::{Individual, Population},
};
use crate::{
    breeding::BreedStrategy,
    error::{Result, TimetableError},
    phenotype::Phenotype,
    rng::RandomNumberGenerator,
    selection::TournamentSelection,
};

/// Runs the steady-state genetic algorithm with a breeding strategy and a
/// challenge.
///
/// Each generation selects two parents by tournament, breeds two children,
/// scores them and lets them replace the two worst members of the population.
/// Since the population holds at least three members, the best one is never
/// replaced and the best penalty never increases.
#[derive(Debug, Clone)]
pub struct EvolutionLauncher<Pheno, Strategy, Chall>
where
    Pheno: Phenotype,
    Chall: Challenge<Pheno>,
    Strategy: BreedStrategy<Pheno>,
{
    strategy: Strategy,
    challenge: Chall,
    selection: Option<TournamentSelection>,
    _marker: PhantomData<Pheno>,
}

impl<Pheno, Strategy, Chall> EvolutionLauncher<Pheno, Strategy, Chall>
where
    Pheno: Phenotype,
    Chall: Challenge<Pheno>,
    Strategy: BreedStrategy<Pheno>,
{
    /// Creates a launcher whose tournament is configured from the options
    /// passed to [`evolve`](Self::evolve).
    pub fn new(strategy: Strategy, challenge: Chall) -> Self {
        Self {
            strategy,
            challenge,
            selection: None,
            _marker: PhantomData,
        }
    }

    /// Creates a launcher with an explicit selection operator.
    pub fn with_selection(
        strategy: Strategy,
        challenge: Chall,
        selection: TournamentSelection,
    ) -> Self {
        Self {
            strategy,
            challenge,
            selection: Some(selection),
            _marker: PhantomData,
        }
    }

    pub fn challenge(&self) -> &Chall {
        &self.challenge
    }

    /// Evolves `population` in place for `options.get_num_generations()`
    /// generations.
    ///
    /// # Returns
    ///
    /// The best penalty after each generation.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid, the population is smaller
    /// than three, or any operator fails. Operator errors carry the phase and
    /// index that failed and abort the run.
    pub fn evolve(
        &self,
        options: &EvolutionOptions,
        population: &mut Population<Pheno>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<i64>> {
        options.validate()?;
        if population.len() < 3 {
            return Err(TimetableError::Configuration(format!(
                "Evolution needs a population of at least 3, got {}",
                population.len()
            )));
        }

        let selection = match &self.selection {
            Some(selection) => selection.clone(),
            None => TournamentSelection::new(
                options.get_tournament_size(),
                options.get_max_attempts(),
            )?,
        };

        let generations = options.get_num_generations();
        let mut progress = Vec::with_capacity(generations);

        for generation in 0..generations {
            let penalties = population.penalties();
            let (first, second) = selection.select_parents(&penalties, rng)?;

            let (first_child, second_child) = {
                let individuals = population.individuals();
                self.strategy.breed(
                    &individuals[first].phenotype,
                    &individuals[second].phenotype,
                    rng,
                )?
            };

            let first_penalty = self.challenge.penalty(&first_child)?;
            let second_penalty = self.challenge.penalty(&second_child)?;

            population.replace_worst([
                Individual::new(first_child, first_penalty),
                Individual::new(second_child, second_penalty),
            ])?;

            let best = population.best()?.penalty;
            progress.push(best);

            match options.get_log_level() {
                LogLevel::Verbose => {
                    debug!(
                        generation,
                        parents = ?(first, second),
                        children = ?(first_penalty, second_penalty),
                        best,
                        "Generation complete"
                    );
                    if generation % options.get_log_interval() == 0 {
                        info!(generation, best, "Evolution progress");
                    }
                }
                LogLevel::Minimal => {
                    if generation % options.get_log_interval() == 0 {
                        info!(generation, best, "Evolution progress");
                    }
                }
                LogLevel::None => {}
            }
        }

        if options.get_log_level() != LogLevel::None {
            info!(
                generations,
                best = population.best()?.penalty,
                worst = population.worst()?.penalty,
                "Evolution finished"
            );
        }

        Ok(progress)
    }
}
