//! # Chromosome
//!
//! A `Chromosome` is one complete candidate timetable: a `slot × match` matrix
//! whose cells say whether the slot is permanently unavailable for the match,
//! free, or holds the match.
//!
//! A valid chromosome assigns every match to exactly one slot and never puts
//! two matches in the same slot. Operators may break the second rule
//! transiently (crossover does) but must restore it before handing the
//! chromosome back.

use crate::error::{Phase, Result, TimetableError};
use crate::rng::RandomNumberGenerator;

/// The state of one `(slot, match)` cell.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum SlotState {
    /// The match can never be held in this slot.
    Unavailable = -1,
    /// The slot is available for the match but does not hold it.
    Free = 0,
    /// The slot holds the match.
    Assigned = 1,
}

impl SlotState {
    pub fn as_i8(self) -> i8 {
        self as i8
    }

    pub fn from_i8(value: i8) -> Option<Self> {
        match value {
            -1 => Some(SlotState::Unavailable),
            0 => Some(SlotState::Free),
            1 => Some(SlotState::Assigned),
            _ => None,
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawChromosome"))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chromosome {
    slot_count: usize,
    match_count: usize,
    cells: Vec<SlotState>,
}

/// Unchecked wire form of [`Chromosome`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawChromosome {
    slot_count: usize,
    match_count: usize,
    cells: Vec<SlotState>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawChromosome> for Chromosome {
    type Error = TimetableError;

    fn try_from(raw: RawChromosome) -> Result<Self> {
        if raw.cells.len() != raw.slot_count * raw.match_count {
            return Err(TimetableError::Dimension(format!(
                "Chromosome of {}x{} holds {} cells",
                raw.slot_count,
                raw.match_count,
                raw.cells.len()
            )));
        }
        Ok(Self {
            slot_count: raw.slot_count,
            match_count: raw.match_count,
            cells: raw.cells,
        })
    }
}

impl Chromosome {
    /// A template in which every slot is available for every match.
    pub fn available(slot_count: usize, match_count: usize) -> Self {
        Self {
            slot_count,
            match_count,
            cells: vec![SlotState::Free; slot_count * match_count],
        }
    }

    /// Builds a chromosome from the `-1 / 0 / 1` encoding, one row per slot.
    pub fn from_rows(rows: &[Vec<i8>]) -> Result<Self> {
        let slot_count = rows.len();
        let match_count = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(slot_count * match_count);

        for (slot, row) in rows.iter().enumerate() {
            if row.len() != match_count {
                return Err(TimetableError::Dimension(format!(
                    "Slot {} has {} cells, expected {}",
                    slot,
                    row.len(),
                    match_count
                )));
            }
            for (match_index, &value) in row.iter().enumerate() {
                let state = SlotState::from_i8(value).ok_or_else(|| {
                    TimetableError::Dimension(format!(
                        "Cell ({}, {}) holds {}, expected -1, 0 or 1",
                        slot, match_index, value
                    ))
                })?;
                cells.push(state);
            }
        }

        Ok(Self {
            slot_count,
            match_count,
            cells,
        })
    }

    /// The `-1 / 0 / 1` encoding, one row per slot.
    pub fn to_rows(&self) -> Vec<Vec<i8>> {
        self.cells
            .chunks(self.match_count.max(1))
            .take(self.slot_count)
            .map(|row| row.iter().map(|s| s.as_i8()).collect())
            .collect()
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    pub fn match_count(&self) -> usize {
        self.match_count
    }

    pub fn state(&self, slot: usize, match_index: usize) -> SlotState {
        self.cells[slot * self.match_count + match_index]
    }

    fn set(&mut self, slot: usize, match_index: usize, state: SlotState) {
        self.cells[slot * self.match_count + match_index] = state;
    }

    fn row(&self, slot: usize) -> &[SlotState] {
        &self.cells[slot * self.match_count..(slot + 1) * self.match_count]
    }

    pub(crate) fn mark_unavailable(&mut self, slot: usize, match_index: usize) {
        self.set(slot, match_index, SlotState::Unavailable);
    }

    /// `true` if the slot is available for the match and does not already hold it.
    pub fn can_host(&self, slot: usize, match_index: usize) -> bool {
        self.state(slot, match_index) == SlotState::Free
    }

    /// `true` if at least one match could ever be placed in the slot.
    pub fn has_free_cell(&self, slot: usize) -> bool {
        self.row(slot).contains(&SlotState::Free)
    }

    pub fn is_slot_empty(&self, slot: usize) -> bool {
        !self.row(slot).contains(&SlotState::Assigned)
    }

    pub fn occupancy(&self, slot: usize) -> usize {
        self.row(slot)
            .iter()
            .filter(|&&s| s == SlotState::Assigned)
            .count()
    }

    /// The lowest-numbered match held by the slot.
    pub fn occupant(&self, slot: usize) -> Option<usize> {
        self.row(slot).iter().position(|&s| s == SlotState::Assigned)
    }

    /// The lowest-numbered slot holding the match.
    pub fn assigned_slot(&self, match_index: usize) -> Option<usize> {
        (0..self.slot_count).find(|&slot| self.state(slot, match_index) == SlotState::Assigned)
    }

    fn assigned_slots(&self, match_index: usize) -> Vec<usize> {
        (0..self.slot_count)
            .filter(|&slot| self.state(slot, match_index) == SlotState::Assigned)
            .collect()
    }

    /// The slot of every match, in match order.
    ///
    /// # Errors
    ///
    /// Returns an invariant violation if any match is held by zero or several slots.
    pub fn assignments(&self, phase: Phase) -> Result<Vec<usize>> {
        let mut slots = vec![None; self.match_count];

        for slot in 0..self.slot_count {
            for (match_index, &state) in self.row(slot).iter().enumerate() {
                if state != SlotState::Assigned {
                    continue;
                }
                if slots[match_index].is_some() {
                    return Err(TimetableError::invariant(
                        phase,
                        Some(match_index),
                        Some(slot),
                        "match is assigned to more than one slot",
                    ));
                }
                slots[match_index] = Some(slot);
            }
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(match_index, slot)| {
                slot.ok_or_else(|| {
                    TimetableError::invariant(
                        phase,
                        Some(match_index),
                        None,
                        "match is not assigned to any slot",
                    )
                })
            })
            .collect()
    }

    /// Slots that are available for the match and hold no other match.
    pub fn free_slots_for(&self, match_index: usize) -> Vec<usize> {
        (0..self.slot_count)
            .filter(|&slot| self.can_host(slot, match_index) && self.is_slot_empty(slot))
            .collect()
    }

    pub fn assign(&mut self, slot: usize, match_index: usize, phase: Phase) -> Result<()> {
        if self.state(slot, match_index) == SlotState::Unavailable {
            return Err(TimetableError::invariant(
                phase,
                Some(match_index),
                Some(slot),
                "slot is unavailable for the match",
            ));
        }
        self.set(slot, match_index, SlotState::Assigned);
        Ok(())
    }

    pub fn unassign(&mut self, slot: usize, match_index: usize) {
        if self.state(slot, match_index) == SlotState::Assigned {
            self.set(slot, match_index, SlotState::Free);
        }
    }

    /// Moves the match from its current slot to `to`.
    pub fn move_match(&mut self, match_index: usize, to: usize, phase: Phase) -> Result<()> {
        let from = self.assigned_slot(match_index).ok_or_else(|| {
            TimetableError::invariant(
                phase,
                Some(match_index),
                None,
                "cannot move a match that is not assigned",
            )
        })?;
        self.unassign(from, match_index);
        self.assign(to, match_index, phase)
    }

    /// Exchanges the slots of two matches if each is available in the other's
    /// slot. Returns whether the swap happened.
    pub fn swap_matches(&mut self, a: usize, b: usize, phase: Phase) -> Result<bool> {
        let missing = |m: usize| {
            TimetableError::invariant(phase, Some(m), None, "match is not assigned to any slot")
        };
        let slot_a = self.assigned_slot(a).ok_or_else(|| missing(a))?;
        let slot_b = self.assigned_slot(b).ok_or_else(|| missing(b))?;

        if !self.can_host(slot_b, a) || !self.can_host(slot_a, b) {
            return Ok(false);
        }

        self.unassign(slot_a, a);
        self.unassign(slot_b, b);
        self.assign(slot_b, a, phase)?;
        self.assign(slot_a, b, phase)?;
        Ok(true)
    }

    /// Assigns the match to a uniformly chosen free slot and returns it.
    ///
    /// # Errors
    ///
    /// Returns `InfeasibleInput` when no slot is both available for the match
    /// and empty.
    pub fn place_randomly(
        &mut self,
        match_index: usize,
        rng: &mut RandomNumberGenerator,
        phase: Phase,
    ) -> Result<usize> {
        let candidates = self.free_slots_for(match_index);
        let slot = *rng
            .choose(&candidates)
            .ok_or(TimetableError::InfeasibleInput { phase, match_index })?;
        self.assign(slot, match_index, phase)?;
        Ok(slot)
    }

    /// Checks both halves of the assignment invariant.
    pub fn validate(&self, phase: Phase) -> Result<()> {
        for slot in 0..self.slot_count {
            if self.occupancy(slot) > 1 {
                return Err(TimetableError::invariant(
                    phase,
                    self.occupant(slot),
                    Some(slot),
                    "slot holds more than one match",
                ));
            }
        }

        for match_index in 0..self.match_count {
            let slots = self.assigned_slots(match_index);
            if slots.len() != 1 {
                return Err(TimetableError::invariant(
                    phase,
                    Some(match_index),
                    slots.get(1).copied(),
                    format!("match is assigned to {} slots", slots.len()),
                ));
            }
        }

        Ok(())
    }

    /// `true` if no match is assigned anywhere.
    pub fn is_template(&self) -> bool {
        !self.cells.contains(&SlotState::Assigned)
    }
}
