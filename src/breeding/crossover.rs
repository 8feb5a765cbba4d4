use std::ops::Range;

use crate::error::{Phase, Result, TimetableError};
use crate::model::Chromosome;
use crate::rng::RandomNumberGenerator;

/// Two-point column crossover with repair.
///
/// Two distinct cut points `low < high` are drawn from the match indices and
/// the matches in `low..high` trade slots between the parents. Both children
/// are repaired before they are returned.
pub fn crossover(
    first: &Chromosome,
    second: &Chromosome,
    rng: &mut RandomNumberGenerator,
) -> Result<(Chromosome, Chromosome)> {
    let match_count = first.match_count();
    if match_count < 2 {
        return Ok((first.clone(), second.clone()));
    }

    let a = rng.index(match_count);
    let mut b = rng.index(match_count - 1);
    if b >= a {
        b += 1;
    }

    crossover_range(first, second, a.min(b)..a.max(b), rng)
}

/// Column crossover over an explicit range of matches.
///
/// # Errors
///
/// Returns a `Dimension` error if the parents differ in shape, and whatever
/// [`repair`] reports for either child.
pub fn crossover_range(
    first: &Chromosome,
    second: &Chromosome,
    range: Range<usize>,
    rng: &mut RandomNumberGenerator,
) -> Result<(Chromosome, Chromosome)> {
    if first.slot_count() != second.slot_count() || first.match_count() != second.match_count() {
        return Err(TimetableError::Dimension(
            "Crossover parents must have the same shape".to_string(),
        ));
    }
    if range.end > first.match_count() {
        return Err(TimetableError::Dimension(format!(
            "Crossover range {:?} exceeds {} matches",
            range,
            first.match_count()
        )));
    }

    let mut first_child = first.clone();
    let mut second_child = second.clone();

    for match_index in range.clone() {
        swap_column(&mut first_child, second, match_index)?;
        swap_column(&mut second_child, first, match_index)?;
    }

    repair(&mut first_child, range.clone(), rng)?;
    repair(&mut second_child, range, rng)?;

    first_child.validate(Phase::Crossover)?;
    second_child.validate(Phase::Crossover)?;

    Ok((first_child, second_child))
}

/// Gives `child` the slot that `donor` uses for the match.
fn swap_column(child: &mut Chromosome, donor: &Chromosome, match_index: usize) -> Result<()> {
    let missing = || {
        TimetableError::invariant(
            Phase::Crossover,
            Some(match_index),
            None,
            "parent does not assign the match",
        )
    };
    let own = child.assigned_slot(match_index).ok_or_else(missing)?;
    let donated = donor.assigned_slot(match_index).ok_or_else(missing)?;

    if own != donated {
        child.unassign(own, match_index);
        child.assign(donated, match_index, Phase::Crossover)?;
    }
    Ok(())
}

/// Moves every match in `range` that now shares its slot to a random
/// available, empty slot. Matches outside `range` are never touched.
///
/// # Errors
///
/// Returns `InfeasibleInput` if a colliding match has nowhere to go.
pub fn repair(
    chromosome: &mut Chromosome,
    range: Range<usize>,
    rng: &mut RandomNumberGenerator,
) -> Result<()> {
    for match_index in range {
        let slot = chromosome.assigned_slot(match_index).ok_or_else(|| {
            TimetableError::invariant(
                Phase::Repair,
                Some(match_index),
                None,
                "match is not assigned to any slot",
            )
        })?;

        if chromosome.occupancy(slot) > 1 {
            chromosome.unassign(slot, match_index);
            chromosome.place_randomly(match_index, rng, Phase::Repair)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chromosome(slots: usize, assignment: &[usize]) -> Chromosome {
        let mut c = Chromosome::available(slots, assignment.len());
        for (m, &slot) in assignment.iter().enumerate() {
            c.assign(slot, m, Phase::Generation).unwrap();
        }
        c
    }

    #[test]
    fn test_range_swap_without_collisions() {
        let first = chromosome(8, &[0, 1, 2, 3]);
        let second = chromosome(8, &[4, 5, 6, 7]);
        let mut rng = RandomNumberGenerator::from_seed(2);

        let (a, b) = crossover_range(&first, &second, 1..3, &mut rng).unwrap();
        assert_eq!(a.assignments(Phase::Crossover).unwrap(), vec![0, 5, 6, 3]);
        assert_eq!(b.assignments(Phase::Crossover).unwrap(), vec![4, 1, 2, 7]);
    }

    #[test]
    fn test_collision_moves_only_swapped_match() {
        // Match 1 of the second parent lands on match 0's slot in the first child.
        let first = chromosome(6, &[0, 1, 2]);
        let second = chromosome(6, &[3, 0, 4]);
        let mut rng = RandomNumberGenerator::from_seed(8);

        let (a, _) = crossover_range(&first, &second, 1..2, &mut rng).unwrap();
        let slots = a.assignments(Phase::Repair).unwrap();
        assert_eq!(slots[0], 0);
        assert_eq!(slots[2], 2);
        assert!(slots[1] != 0 && slots[1] != 2);
    }

    #[test]
    fn test_random_crossover_keeps_invariant() {
        let first = chromosome(10, &[0, 1, 2, 3, 4]);
        let second = chromosome(10, &[4, 3, 2, 1, 0]);
        let mut rng = RandomNumberGenerator::from_seed(21);

        for _ in 0..50 {
            let (a, b) = crossover(&first, &second, &mut rng).unwrap();
            a.validate(Phase::Crossover).unwrap();
            b.validate(Phase::Crossover).unwrap();
        }
    }

    #[test]
    fn test_collision_repaired_into_vacated_slot() {
        let first = chromosome(2, &[0, 1]);
        let second = chromosome(2, &[1, 0]);
        let mut rng = RandomNumberGenerator::from_seed(4);

        // Match 0 takes slot 1 from the second parent; the only room left is slot 0.
        let (a, _) = crossover_range(&first, &second, 0..1, &mut rng).unwrap();
        assert_eq!(a.assignments(Phase::Repair).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_repair_without_room_is_infeasible() {
        let mut rng = RandomNumberGenerator::from_seed(4);
        let mut blocked = Chromosome::from_rows(&[vec![-1, 0], vec![1, 1]]).unwrap();

        let err = repair(&mut blocked, 0..1, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            TimetableError::InfeasibleInput {
                phase: Phase::Repair,
                match_index: 0
            }
        ));
    }
}
