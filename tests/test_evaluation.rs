use std::sync::Arc;

use timetable_hybrid::{
    breeding::CandidateGenerator,
    constraints::{PenaltyEvaluator, CONCURRENCY_WEIGHT},
    error::{Phase, TimetableError},
    evolution::Challenge,
    model::{Chromosome, Problem, ProblemBuilder, RefereePreference, SlotLayout},
    rng::RandomNumberGenerator,
};

fn place(problem: &Problem, slots: &[usize]) -> Chromosome {
    let mut candidate = problem.availability().clone();
    for (match_index, &slot) in slots.iter().enumerate() {
        candidate.assign(slot, match_index, Phase::Generation).unwrap();
    }
    candidate
}

/// One day, two venues, two periods: {0, 2} and {1, 3} run concurrently.
fn two_match_problem() -> Arc<Problem> {
    let layout = SlotLayout::new(1, 2, 2).unwrap();
    Arc::new(
        ProblemBuilder::new(layout, 2, 1)
            .assign(0, 0)
            .assign(1, 0)
            .preference(0, RefereePreference::new(1, 1, false))
            .build()
            .unwrap(),
    )
}

#[test]
fn test_two_match_example() {
    let problem = two_match_problem();
    let evaluator = PenaltyEvaluator::new(problem.clone());
    let layout = problem.layout();

    for a in 0..4 {
        for b in 0..4 {
            if a == b {
                continue;
            }
            let evaluation = evaluator.evaluate(&place(&problem, &[a, b])).unwrap();

            if layout.time_of(a) == layout.time_of(b) {
                assert_eq!(evaluation.penalty, 1000, "slots {} and {}", a, b);
                assert_eq!(evaluation.hard_violations, 1);
                assert!(!evaluation.is_feasible());
            } else {
                // Back-to-back run of two against a target of one.
                assert_eq!(evaluation.hard_violations, 0, "slots {} and {}", a, b);
                assert_eq!(evaluation.penalty, 10);
                assert_eq!(evaluation.soft_violations, 1);
            }
        }
    }
}

#[test]
fn test_conflicting_pair_charged_once() {
    // Three matches of one referee at the same time in three venues.
    let layout = SlotLayout::new(1, 3, 1).unwrap();
    let problem = Arc::new(
        ProblemBuilder::new(layout, 3, 1)
            .assign(0, 0)
            .assign(1, 0)
            .assign(2, 0)
            .preference(0, RefereePreference::new(1, 1, false))
            .build()
            .unwrap(),
    );
    let evaluation = PenaltyEvaluator::new(problem.clone())
        .evaluate(&place(&problem, &[0, 1, 2]))
        .unwrap();

    assert_eq!(evaluation.hard_violations, 3);
    assert_eq!(evaluation.penalty, 3 * CONCURRENCY_WEIGHT);
}

#[test]
fn test_unrelated_matches_may_share_a_time() {
    let layout = SlotLayout::new(1, 2, 1).unwrap();
    let problem = Arc::new(
        ProblemBuilder::new(layout, 2, 2)
            .assign(0, 0)
            .assign(1, 1)
            .preference(0, RefereePreference::new(1, 1, false))
            .preference(1, RefereePreference::new(1, 1, false))
            .build()
            .unwrap(),
    );
    let evaluation = PenaltyEvaluator::new(problem.clone())
        .evaluate(&place(&problem, &[0, 1]))
        .unwrap();

    assert_eq!(evaluation.penalty, 0);
    assert!(evaluation.is_feasible());
}

#[test]
fn test_run_lengths_reset_between_runs() {
    // One day, one venue, four periods; runs of 2 and 1 against a target of 2.
    let layout = SlotLayout::new(1, 1, 4).unwrap();
    let problem = Arc::new(
        ProblemBuilder::new(layout, 3, 1)
            .assign(0, 0)
            .assign(1, 0)
            .assign(2, 0)
            .preference(0, RefereePreference::new(2, 1, false))
            .build()
            .unwrap(),
    );
    let evaluation = PenaltyEvaluator::new(problem.clone())
        .evaluate(&place(&problem, &[0, 1, 3]))
        .unwrap();

    assert_eq!(evaluation.penalty, 1);
    assert_eq!(evaluation.soft_violations, 0);
    assert_eq!(evaluation.statistics[0].consecutive_violations, 1);
}

#[test]
fn test_statistics_and_soft_penalties() {
    // Two days, two venues, three periods. Slots: day * 6 + venue * 3 + time.
    let layout = SlotLayout::new(2, 2, 3).unwrap();
    let problem = Arc::new(
        ProblemBuilder::new(layout, 3, 1)
            .assign(0, 0)
            .assign(1, 0)
            .assign(2, 0)
            .preference(0, RefereePreference::new(2, 1, true))
            .build()
            .unwrap(),
    );
    // Day 1: venue 1 period 1, then venue 2 period 2 (one change). Day 2: period 1.
    let evaluation = PenaltyEvaluator::new(problem.clone())
        .evaluate(&place(&problem, &[0, 4, 6]))
        .unwrap();
    let statistics = evaluation.statistics[0];

    assert_eq!(statistics.active_days, 2);
    assert_eq!(statistics.venue_changes, 1);
    assert_eq!(statistics.consecutive_violations, 1);
    // Short run on day 2 (1), one extra day (10), one venue change (10).
    assert_eq!(evaluation.penalty, 21);
    assert_eq!(evaluation.soft_violations, 2);
    assert_eq!(evaluation.hard_violations, 0);

    // The input preferences are untouched by evaluation.
    assert_eq!(problem.preferences()[0], RefereePreference::new(2, 1, true));
}

#[test]
fn test_evaluation_is_deterministic_and_thread_independent() {
    let layout = SlotLayout::new(3, 3, 4).unwrap();
    let mut builder = ProblemBuilder::new(layout, 20, 8);
    for m in 0..20 {
        builder = builder.assign(m, m % 8).assign(m, (m * 3 + 1) % 8);
    }
    for r in 0..8 {
        builder = builder.preference(r, RefereePreference::new(3, 2, r % 2 == 0));
    }
    let problem = Arc::new(builder.build().unwrap());

    let sequential = PenaltyEvaluator::with_parallel_threshold(problem.clone(), usize::MAX);
    let parallel = PenaltyEvaluator::with_parallel_threshold(problem.clone(), 1);
    let generator = CandidateGenerator::new(problem.clone());
    let mut rng = RandomNumberGenerator::from_seed(31);

    for _ in 0..20 {
        let candidate = generator.generate(&mut rng).unwrap();
        let first = sequential.evaluate(&candidate).unwrap();
        let second = sequential.evaluate(&candidate).unwrap();
        let third = parallel.evaluate(&candidate).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, third);
        assert_eq!(sequential.penalty(&candidate).unwrap(), first.penalty);
    }
}

#[test]
fn test_broken_candidate_is_reported() {
    let problem = two_match_problem();
    let evaluator = PenaltyEvaluator::new(problem.clone());

    let mut candidate = problem.availability().clone();
    candidate.assign(0, 0, Phase::Generation).unwrap();

    match evaluator.evaluate(&candidate) {
        Err(TimetableError::InvariantViolation {
            phase, match_index, ..
        }) => {
            assert_eq!(phase, Phase::Evaluation);
            assert_eq!(match_index, Some(1));
        }
        other => panic!("Expected invariant violation, got {:?}", other),
    }
}
