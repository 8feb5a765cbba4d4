use crate::error::{Result, TimetableError};

/// The fixed day × venue × time-of-day grid that slots are drawn from.
///
/// Slots are numbered day-major, then venue, then time of day:
/// `slot = day * (venues * time_slots) + venue * time_slots + time`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSlotLayout"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotLayout {
    day_count: usize,
    venue_count: usize,
    time_slot_count: usize,
}

/// Unchecked wire form of [`SlotLayout`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawSlotLayout {
    day_count: usize,
    venue_count: usize,
    time_slot_count: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSlotLayout> for SlotLayout {
    type Error = TimetableError;

    fn try_from(raw: RawSlotLayout) -> Result<Self> {
        Self::new(raw.day_count, raw.venue_count, raw.time_slot_count)
    }
}

impl SlotLayout {
    /// Creates a layout, rejecting any zero dimension.
    pub fn new(day_count: usize, venue_count: usize, time_slot_count: usize) -> Result<Self> {
        if day_count == 0 || venue_count == 0 || time_slot_count == 0 {
            return Err(TimetableError::Dimension(format!(
                "Slot layout dimensions must be non-zero, got {}x{}x{}",
                day_count, venue_count, time_slot_count
            )));
        }

        Ok(Self {
            day_count,
            venue_count,
            time_slot_count,
        })
    }

    pub fn day_count(&self) -> usize {
        self.day_count
    }

    pub fn venue_count(&self) -> usize {
        self.venue_count
    }

    pub fn time_slot_count(&self) -> usize {
        self.time_slot_count
    }

    /// Number of slots in a single day.
    pub fn slots_per_day(&self) -> usize {
        self.venue_count * self.time_slot_count
    }

    pub fn slot_count(&self) -> usize {
        self.day_count * self.slots_per_day()
    }

    pub fn slot(&self, day: usize, venue: usize, time: usize) -> usize {
        day * self.slots_per_day() + venue * self.time_slot_count + time
    }

    pub fn day_of(&self, slot: usize) -> usize {
        slot / self.slots_per_day()
    }

    pub fn venue_of(&self, slot: usize) -> usize {
        (slot / self.time_slot_count) % self.venue_count
    }

    pub fn time_of(&self, slot: usize) -> usize {
        slot % self.time_slot_count
    }

    /// Slots sharing the day and time of day of `slot`, one per venue, in
    /// venue order. `slot` itself is included.
    pub fn concurrent_slots(&self, slot: usize) -> impl Iterator<Item = usize> {
        let first = self.day_of(slot) * self.slots_per_day() + self.time_of(slot);
        let step = self.time_slot_count;
        (0..self.venue_count).map(move |venue| first + venue * step)
    }

    /// The slot before (`forward == false`) or after `slot`, wrapping around
    /// the whole timetable.
    pub fn adjacent_slot(&self, slot: usize, forward: bool) -> usize {
        let count = self.slot_count();
        if forward {
            (slot + 1) % count
        } else {
            (slot + count - 1) % count
        }
    }
}

impl Default for SlotLayout {
    /// Five days of four venues with five presentation periods each.
    fn default() -> Self {
        Self {
            day_count: 5,
            venue_count: 4,
            time_slot_count: 5,
        }
    }
}
