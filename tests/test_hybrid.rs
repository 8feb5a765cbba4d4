use std::sync::Arc;

use timetable_hybrid::{
    breeding::{CandidateGenerator, TimetableStrategy},
    constraints::PenaltyEvaluator,
    error::{Phase, TimetableError},
    evolution::{EvolutionLauncher, EvolutionOptions, LogLevel, Population},
    hybrid::{HybridOptions, HybridScheduler},
    local_search::AnnealingOptions,
    model::{Problem, ProblemBuilder, RefereePreference, SlotLayout},
    report::Report,
    rng::RandomNumberGenerator,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_test_writer()
        .try_init();
}

/// Two days, two venues, three periods; six matches over three referees,
/// with matches 0-3 shared between referees 0 and 1.
fn problem() -> Arc<Problem> {
    let layout = SlotLayout::new(2, 2, 3).unwrap();
    Arc::new(
        ProblemBuilder::new(layout, 6, 3)
            .assign(0, 0)
            .assign(1, 0)
            .assign(2, 0)
            .assign(2, 1)
            .assign(3, 1)
            .assign(4, 2)
            .assign(5, 2)
            .staff_unavailable(2, &[0, 3])
            .preference(0, RefereePreference::new(3, 1, true))
            .preference(1, RefereePreference::new(2, 1, false))
            .preference(2, RefereePreference::new(2, 2, false))
            .build()
            .unwrap(),
    )
}

fn options(seed: u64) -> HybridOptions {
    HybridOptions::builder()
        .evolution(
            EvolutionOptions::builder()
                .num_generations(40)
                .population_size(8)
                .build(),
        )
        .annealing(
            AnnealingOptions::builder()
                .cooling_ratio(0.98)
                .stop_fraction(1e-3)
                .build(),
        )
        .seed(seed)
        .build()
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let problem = problem();
    let first = HybridScheduler::new(problem.clone(), options(5))
        .optimize()
        .unwrap();
    let second = HybridScheduler::new(problem.clone(), options(5))
        .optimize()
        .unwrap();

    assert_eq!(first.schedule, second.schedule);
    assert_eq!(first.evaluation, second.evaluation);
    assert_eq!(first.progress, second.progress);
}

#[test]
fn test_outcome_is_consistent() {
    init_tracing();
    let problem = problem();
    let mut options = options(12);
    options.set_log_level(LogLevel::Minimal);
    let outcome = HybridScheduler::new(problem.clone(), options)
        .optimize()
        .unwrap();

    outcome.schedule.validate(Phase::Annealing).unwrap();
    assert_eq!(outcome.generations, 40);
    assert_eq!(outcome.progress.len(), 40 + outcome.annealing_iterations);
    assert!(outcome.initial_temperature >= 1.0);
    assert_eq!(outcome.progress.last().copied(), Some(outcome.penalty()));
    assert_eq!(
        PenaltyEvaluator::new(problem.clone())
            .evaluate(&outcome.schedule)
            .unwrap(),
        outcome.evaluation
    );

    // Each phase keeps its best; annealing starts from the GA's best.
    let (ga, sa) = outcome.progress.split_at(40);
    assert!(ga.windows(2).all(|w| w[1] <= w[0]));
    assert!(sa.windows(2).all(|w| w[1] <= w[0]));
    assert!(sa[0] <= ga[39]);

    let report = Report::new(&problem, &outcome).to_string();
    assert!(report.starts_with(&format!("Penalty: {}", outcome.penalty())));
    assert!(report.contains("[R003]"));
}

#[test]
fn test_population_best_never_worsens() {
    let problem = problem();
    let evaluator = PenaltyEvaluator::new(problem.clone());
    let mut rng = RandomNumberGenerator::from_seed(90);
    let candidates = CandidateGenerator::new(problem.clone())
        .generate_many(6, &mut rng)
        .unwrap();
    let mut population = Population::evaluate(candidates, &evaluator, 2).unwrap();
    let initial_best = population.best().unwrap().penalty;

    let launcher = EvolutionLauncher::new(TimetableStrategy::default(), evaluator);
    let options = EvolutionOptions::builder().num_generations(150).build();
    let progress = launcher.evolve(&options, &mut population, &mut rng).unwrap();

    assert!(progress[0] <= initial_best);
    assert!(progress.windows(2).all(|w| w[1] <= w[0]));
    assert_eq!(population.len(), 6);

    let penalties = population.penalties();
    assert!(penalties.windows(2).all(|w| w[0] <= w[1]));
    for individual in population.individuals() {
        individual.phenotype.validate(Phase::Crossover).unwrap();
    }
}

#[test]
fn test_infeasible_problem_fails_cleanly() {
    let layout = SlotLayout::new(1, 1, 2).unwrap();
    let problem = Arc::new(
        ProblemBuilder::new(layout, 3, 1)
            .preference(0, RefereePreference::new(2, 1, false))
            .build()
            .unwrap(),
    );

    let result = HybridScheduler::new(problem, options(1)).optimize();
    assert!(matches!(
        result,
        Err(TimetableError::InfeasibleInput {
            phase: Phase::Generation,
            ..
        })
    ));
}

#[test]
fn test_scheduler_keeps_its_inputs() {
    let problem = problem();
    let scheduler = HybridScheduler::new(problem.clone(), options(4));

    assert!(Arc::ptr_eq(scheduler.problem(), &problem));
    assert_eq!(scheduler.options().seed(), Some(4));
    assert_eq!(scheduler.options().evolution().get_num_generations(), 40);
}

#[test]
fn test_invalid_options_are_rejected() {
    let options = HybridOptions::builder()
        .evolution(EvolutionOptions::builder().population_size(2).build())
        .build();

    let result = HybridScheduler::new(problem(), options).optimize();
    assert!(matches!(result, Err(TimetableError::Configuration(_))));
}

#[cfg(feature = "serde")]
#[test]
fn test_outcome_serializes() {
    let outcome = HybridScheduler::new(problem(), options(3))
        .optimize()
        .unwrap();
    let json = serde_json::to_string(&outcome).unwrap();
    let restored: timetable_hybrid::hybrid::ScheduleOutcome = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.schedule, outcome.schedule);
    assert_eq!(restored.evaluation, outcome.evaluation);
}

#[cfg(feature = "serde")]
#[test]
fn test_malformed_model_does_not_deserialize() {
    use timetable_hybrid::model::{Chromosome, ConflictMatrix};

    let layout: Result<SlotLayout, _> =
        serde_json::from_str(r#"{"day_count":0,"venue_count":2,"time_slot_count":3}"#);
    assert!(layout.is_err());

    let chromosome: Result<Chromosome, _> =
        serde_json::from_str(r#"{"slot_count":2,"match_count":2,"cells":["Free"]}"#);
    assert!(chromosome.is_err());

    let conflicts: Result<ConflictMatrix, _> =
        serde_json::from_str(r#"{"match_count":2,"cells":[false,true,false,false]}"#);
    assert!(conflicts.is_err());

    let layout = SlotLayout::new(2, 2, 3).unwrap();
    let json = serde_json::to_string(&layout).unwrap();
    assert_eq!(serde_json::from_str::<SlotLayout>(&json).unwrap(), layout);
}
