use crate::model::{Problem, RefereeStatistics};

/// Penalty per presentation a run falls short of the consecutive target.
pub const SHORT_RUN_WEIGHT: i64 = 1;
/// Penalty per presentation a run exceeds the consecutive target.
pub const LONG_RUN_WEIGHT: i64 = 10;
/// Penalty per active day above the day target.
pub const EXTRA_DAY_WEIGHT: i64 = 10;
/// Penalty per venue change for referees who avoid them.
pub const VENUE_CHANGE_WEIGHT: i64 = 10;

/// Soft-constraint score of one referee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct RefereeScore {
    pub penalty: i64,
    pub soft_violations: u32,
    pub statistics: RefereeStatistics,
}

/// Scores how well the timetable suits one referee.
///
/// The referee's presentations are projected onto a `day × time` grid holding
/// `venue + 1` (0 is empty). Each day row has one extra empty column so a run
/// reaching the last period is closed like any other.
pub(crate) fn score_referee(
    problem: &Problem,
    referee: usize,
    assignments: &[usize],
) -> RefereeScore {
    let layout = problem.layout();
    let preference = problem.preferences()[referee];
    let width = layout.time_slot_count() + 1;
    let mut grid = vec![0usize; layout.day_count() * width];

    for match_index in problem.match_referee().matches_of(referee) {
        let slot = assignments[match_index];
        grid[layout.day_of(slot) * width + layout.time_of(slot)] = layout.venue_of(slot) + 1;
    }

    let target = i64::from(preference.consecutive_target);
    let mut score = RefereeScore::default();

    for day in grid.chunks(width) {
        let mut run_length = 0i64;
        let mut previous_venue = 0;
        let mut active = false;

        for &venue in day {
            if venue != 0 {
                if run_length > 0 && venue != previous_venue {
                    score.statistics.venue_changes += 1;
                }
                run_length += 1;
                previous_venue = venue;
                active = true;
                continue;
            }

            if run_length > 0 {
                if run_length < target {
                    score.penalty += (target - run_length) * SHORT_RUN_WEIGHT;
                    score.statistics.consecutive_violations += 1;
                } else if run_length > target {
                    score.penalty += (run_length - target) * LONG_RUN_WEIGHT;
                    score.statistics.consecutive_violations += 1;
                    score.soft_violations += 1;
                }
            }
            run_length = 0;
        }

        if active {
            score.statistics.active_days += 1;
        }
    }

    let days = score.statistics.active_days;
    if days > preference.day_target {
        score.penalty += i64::from(days - preference.day_target) * EXTRA_DAY_WEIGHT;
        score.soft_violations += 1;
    }

    let changes = score.statistics.venue_changes;
    if preference.avoids_venue_change && changes > 0 {
        score.penalty += i64::from(changes) * VENUE_CHANGE_WEIGHT;
        score.soft_violations += 1;
    }

    score
}
