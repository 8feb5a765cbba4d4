/// What a referee would like their timetable to look like. Fixed input data.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RefereePreference {
    /// Preferred length of a run of back-to-back presentations.
    pub consecutive_target: u32,
    /// Preferred maximum number of days with at least one presentation.
    pub day_target: u32,
    /// The referee would rather not change venue between consecutive presentations.
    pub avoids_venue_change: bool,
}

impl RefereePreference {
    pub fn new(consecutive_target: u32, day_target: u32, avoids_venue_change: bool) -> Self {
        Self {
            consecutive_target,
            day_target,
            avoids_venue_change,
        }
    }
}

/// How a candidate timetable actually treats one referee.
///
/// Produced fresh by every evaluation; it is never stored back into the
/// referee's preferences.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RefereeStatistics {
    /// Runs whose length missed the consecutive target, in either direction.
    pub consecutive_violations: u32,
    /// Days on which the referee examines at least one match.
    pub active_days: u32,
    /// Venue changes between back-to-back presentations.
    pub venue_changes: u32,
}
