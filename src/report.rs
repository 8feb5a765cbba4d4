//! # Report
//!
//! Plain-text rendering of a timetable: a penalty header, the grid of matches
//! per day and venue, and one line of statistics per referee.
//!
//! ```text
//! Penalty: 20 | Hard violations: 0 | Soft violations: 1
//!
//! +-------+---------+----------+----------+----------+
//! | Day   | Venue   | Period 1 | Period 2 | Period 3 |
//! +-------+---------+----------+----------+----------+
//! | Day 1 | Venue 1 | M1       | M2       |          |
//! +-------+---------+----------+----------+----------+
//! |       | Venue 2 |          |          |          |
//! +-------+---------+----------+----------+----------+
//!
//! [R001] Consecutive target: 2, violations: 0 | Day target: 1, active days: 1 | Avoids venue change: no, changes: 0
//! ```

use std::fmt::{self, Display};

use tabled::{builder::Builder, settings::Style, Table};

use crate::constraints::Evaluation;
use crate::hybrid::ScheduleOutcome;
use crate::model::{Chromosome, Problem};

/// Borrows a problem, a schedule and its evaluation for display.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    problem: &'a Problem,
    schedule: &'a Chromosome,
    evaluation: &'a Evaluation,
}

impl<'a> Report<'a> {
    pub fn new(problem: &'a Problem, outcome: &'a ScheduleOutcome) -> Self {
        Self::from_parts(problem, &outcome.schedule, &outcome.evaluation)
    }

    pub fn from_parts(
        problem: &'a Problem,
        schedule: &'a Chromosome,
        evaluation: &'a Evaluation,
    ) -> Self {
        Self {
            problem,
            schedule,
            evaluation,
        }
    }

    /// Builds the day/venue grid, one column per time slot and a blank row
    /// between days.
    fn grid(&self) -> Table {
        let layout = self.problem.layout();
        let columns = 2 + layout.time_slot_count();
        let mut builder = Builder::default();

        let mut header = vec!["Day".to_string(), "Venue".to_string()];
        header.extend((1..=layout.time_slot_count()).map(|time| format!("Period {}", time)));
        builder.push_record(header);

        for day in 0..layout.day_count() {
            if day > 0 {
                builder.push_record(vec![String::new(); columns]);
            }
            for venue in 0..layout.venue_count() {
                let mut row = Vec::with_capacity(columns);
                row.push(if venue == 0 {
                    format!("Day {}", day + 1)
                } else {
                    String::new()
                });
                row.push(format!("Venue {}", venue + 1));
                row.extend((0..layout.time_slot_count()).map(|time| {
                    self.schedule
                        .occupant(layout.slot(day, venue, time))
                        .map(|match_index| format!("M{}", match_index + 1))
                        .unwrap_or_default()
                }));
                builder.push_record(row);
            }
        }

        let mut table = builder.build();
        table.with(Style::ascii());
        table
    }

    fn write_referees(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let preferences = self.problem.preferences();

        for (referee, statistics) in self.evaluation.statistics.iter().enumerate() {
            let preference = preferences.get(referee).copied().unwrap_or_default();
            writeln!(
                f,
                "[R{:03}] Consecutive target: {}, violations: {} | Day target: {}, active days: {} | Avoids venue change: {}, changes: {}",
                referee + 1,
                preference.consecutive_target,
                statistics.consecutive_violations,
                preference.day_target,
                statistics.active_days,
                if preference.avoids_venue_change { "yes" } else { "no" },
                statistics.venue_changes,
            )?;
        }
        Ok(())
    }
}

impl Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Penalty: {} | Hard violations: {} | Soft violations: {}",
            self.evaluation.penalty,
            self.evaluation.hard_violations,
            self.evaluation.soft_violations
        )?;
        writeln!(f)?;
        writeln!(f, "{}", self.grid())?;
        writeln!(f)?;
        self.write_referees(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::PenaltyEvaluator;
    use crate::error::Phase;
    use crate::model::{ProblemBuilder, RefereePreference, SlotLayout};
    use std::sync::Arc;

    #[test]
    fn test_report_lists_matches_and_referees() {
        let layout = SlotLayout::new(2, 2, 3).unwrap();
        let problem = Arc::new(
            ProblemBuilder::new(layout, 3, 2)
                .assign(0, 0)
                .assign(1, 0)
                .assign(2, 1)
                .preference(0, RefereePreference::new(2, 1, true))
                .preference(1, RefereePreference::new(1, 1, false))
                .build()
                .unwrap(),
        );
        let mut schedule = problem.availability().clone();
        schedule.assign(0, 0, Phase::Generation).unwrap();
        schedule.assign(1, 1, Phase::Generation).unwrap();
        schedule.assign(8, 2, Phase::Generation).unwrap();

        let evaluation = PenaltyEvaluator::new(problem.clone())
            .evaluate(&schedule)
            .unwrap();
        let report = Report::from_parts(&problem, &schedule, &evaluation);
        let text = report.to_string();
        assert!(text.starts_with(&format!("Penalty: {}", evaluation.penalty)));

        let grid = report.grid();
        // Header, two venues on day 1, a blank separator, two venues on day 2.
        assert_eq!(grid.count_rows(), 6);
        assert_eq!(grid.count_columns(), 5);

        let rows: Vec<&str> = text.lines().filter(|line| line.starts_with('|')).collect();
        assert!(rows[0].contains("Period 3"));
        assert!(rows[1].contains("Day 1") && rows[1].contains("M1") && rows[1].contains("M2"));
        assert!(!rows[2].contains("Day"));
        // Day 2, venue 1 holds slots 6..9; M3 sits in its last period.
        assert!(rows[4].contains("Day 2") && rows[4].contains("M3"));
        assert!(text.contains("[R001] Consecutive target: 2"));
        assert!(text.contains("Avoids venue change: yes"));
        assert!(text.contains("[R002]"));
    }
}
