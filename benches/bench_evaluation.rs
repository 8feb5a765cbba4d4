use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use timetable_hybrid::{
    breeding::CandidateGenerator,
    constraints::PenaltyEvaluator,
    model::{Problem, ProblemBuilder, RefereePreference, SlotLayout},
    rng::RandomNumberGenerator,
};

/// The default five-day, four-venue, five-period grid with each match
/// examined by two of `referee_count` referees.
fn problem(match_count: usize, referee_count: usize) -> Arc<Problem> {
    let mut builder = ProblemBuilder::new(SlotLayout::default(), match_count, referee_count);
    for m in 0..match_count {
        builder = builder
            .assign(m, m % referee_count)
            .assign(m, (m * 7 + 3) % referee_count);
    }
    for r in 0..referee_count {
        builder = builder.preference(r, RefereePreference::new(3, 2, r % 3 == 0));
    }
    Arc::new(builder.build().expect("benchmark problem is valid"))
}

fn bench_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("penalty_evaluation");

    for &(matches, referees) in [(20, 8), (60, 24), (100, 80)].iter() {
        let problem = problem(matches, referees);
        let mut rng = RandomNumberGenerator::from_seed(1);
        let candidate = CandidateGenerator::new(problem.clone())
            .generate(&mut rng)
            .expect("benchmark problem is feasible");

        let sequential = PenaltyEvaluator::with_parallel_threshold(problem.clone(), usize::MAX);
        group.bench_with_input(
            BenchmarkId::new("sequential", referees),
            &candidate,
            |b, candidate| b.iter(|| sequential.evaluate(black_box(candidate))),
        );

        let parallel = PenaltyEvaluator::with_parallel_threshold(problem.clone(), 1);
        group.bench_with_input(
            BenchmarkId::new("parallel", referees),
            &candidate,
            |b, candidate| b.iter(|| parallel.evaluate(black_box(candidate))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_evaluation);
criterion_main!(benches);
