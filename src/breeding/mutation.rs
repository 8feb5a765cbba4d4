use tracing::trace;

use crate::error::{Phase, Result};
use crate::model::Chromosome;
use crate::rng::RandomNumberGenerator;

/// Swap mutation: two distinct matches exchange slots.
///
/// A pair is only swapped when each match is available in the other's slot;
/// otherwise a new pair is drawn, up to `max_attempts` times. Returns whether
/// a swap happened. When every draw is blocked the chromosome is left as it
/// was.
pub fn swap_mutation(
    chromosome: &mut Chromosome,
    max_attempts: usize,
    rng: &mut RandomNumberGenerator,
) -> Result<bool> {
    let match_count = chromosome.match_count();
    if match_count < 2 {
        return Ok(false);
    }

    for _ in 0..max_attempts {
        let first = rng.index(match_count);
        let second = rng.index(match_count);
        if first == second {
            continue;
        }

        if chromosome.swap_matches(first, second, Phase::Mutation)? {
            return Ok(true);
        }
    }

    trace!(max_attempts, "swap mutation found no legal pair");
    Ok(false)
}
