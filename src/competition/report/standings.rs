use super::super::summary::{DaySummary, Summary};
use super::views::{DayStandings, StandingEntry};

impl Summary {
    /// Every day bucket with all known athletes ranked by descending
    /// cumulative score. Ties keep first-seen athlete order.
    pub fn standings(&self) -> Vec<DayStandings> {
        self.days()
            .iter()
            .enumerate()
            .map(|(index, day)| DayStandings {
                day: index + 1,
                date: day.date(),
                entries: ranked_entries(day, self.athletes()),
            })
            .collect()
    }
}

fn ranked_entries(day: &DaySummary, athletes: &[String]) -> Vec<StandingEntry> {
    let mut entries: Vec<StandingEntry> = athletes
        .iter()
        .map(|athlete| StandingEntry {
            athlete: athlete.clone(),
            points_today: day.points_earned(athlete).unwrap_or(0),
            cumulative: day.cumulative(athlete).unwrap_or(0),
        })
        .collect();

    entries.sort_by(|left, right| right.cumulative.cmp(&left.cumulative));
    entries
}
