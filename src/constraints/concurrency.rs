use crate::model::{Chromosome, Problem};

/// Penalty for two matches sharing a referee at the same time of day.
pub const CONCURRENCY_WEIGHT: i64 = 1000;

/// Charges every pair of conflicting matches that run concurrently.
///
/// `charged` is a `match × match` scratch buffer; a pair is marked in both
/// orientations when charged so it is only counted once. The buffer is reset
/// here, callers only provide the storage.
///
/// Returns the penalty and the number of hard violations.
pub(crate) fn charge_concurrency(
    problem: &Problem,
    candidate: &Chromosome,
    assignments: &[usize],
    charged: &mut Vec<bool>,
) -> (i64, u32) {
    let match_count = problem.match_count();
    let layout = problem.layout();
    let conflicts = problem.conflicts();

    charged.clear();
    charged.resize(match_count * match_count, false);

    let mut penalty = 0;
    let mut violations = 0;

    for (match_index, &slot) in assignments.iter().enumerate() {
        for concurrent in layout.concurrent_slots(slot) {
            let Some(other) = candidate.occupant(concurrent) else {
                continue;
            };

            let pair = match_index * match_count + other;
            if conflicts.conflicts(match_index, other) && !charged[pair] {
                charged[pair] = true;
                charged[other * match_count + match_index] = true;
                penalty += CONCURRENCY_WEIGHT;
                violations += 1;
            }
        }
    }

    (penalty, violations)
}
